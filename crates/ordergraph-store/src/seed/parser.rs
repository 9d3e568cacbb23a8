#![allow(clippy::result_large_err)]

use std::collections::HashSet;
use std::path::Path;

use crate::errors::{io_error, seed_validation, Result};
use crate::seed::format::Seed;

pub fn parse_seed_file(path: &Path) -> Result<Seed> {
    let content = std::fs::read_to_string(path).map_err(|e| io_error("seed_read", e))?;
    parse_seed_str(&content)
}

/// Parse and validate a seed document
///
/// Member references are not resolved here; the importer also accepts
/// members that already exist in the database.
pub fn parse_seed_str(content: &str) -> Result<Seed> {
    let seed: Seed = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;
    validate_seed(&seed)?;
    Ok(seed)
}

fn validate_seed(seed: &Seed) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut names = HashSet::new();
    for member in &seed.members {
        if !names.insert(member.name.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate member name '{}'",
                member.name
            )));
        }
    }

    let mut keys = HashSet::new();
    for product in &seed.products {
        if !keys.insert(product.key.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate product key '{}'",
                product.key
            )));
        }
        if product.price < 0 {
            return Err(seed_validation(&format!(
                "Product '{}' has a negative price",
                product.key
            )));
        }
    }

    for (i, order) in seed.orders.iter().enumerate() {
        if order.lines.is_empty() {
            return Err(seed_validation(&format!("Order #{} has no lines", i + 1)));
        }
        for line in &order.lines {
            if !keys.contains(line.product.as_str()) {
                return Err(seed_validation(&format!(
                    "Order #{} references unknown product '{}'",
                    i + 1,
                    line.product
                )));
            }
            if line.count == 0 {
                return Err(seed_validation(&format!(
                    "Order #{} orders zero of '{}'",
                    i + 1,
                    line.product
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SAMPLE_SEED;
    use ordergraph_core::errors::ExErrorKind;

    #[test]
    fn test_sample_seed_is_valid() {
        let seed = parse_seed_str(SAMPLE_SEED).unwrap();
        assert_eq!(seed.members.len(), 2);
        assert_eq!(seed.products.len(), 4);
        assert_eq!(seed.orders.len(), 2);
    }

    #[test]
    fn test_wrong_version_rejected() {
        let err = parse_seed_str("schema_version: 3\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert!(err.message().contains("schema_version"));
    }

    #[test]
    fn test_unknown_product_key_rejected() {
        let yaml = r#"
schema_version: 0
orders:
  - member: userA
    lines:
      - { product: nope, count: 1 }
"#;
        let err = parse_seed_str(yaml).unwrap_err();
        assert!(err.message().contains("unknown product 'nope'"));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = parse_seed_str("schema_version: [").unwrap_err();
        assert!(err.message().contains("YAML parse error"));
    }
}

use serde::{Deserialize, Serialize};

/// Postal address embedded in members and deliveries
///
/// A value type: it has no identity of its own and two addresses are equal
/// when all of their fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub zipcode: String,
}

impl Address {
    pub fn new(
        city: impl Into<String>,
        street: impl Into<String>,
        zipcode: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            street: street.into(),
            zipcode: zipcode.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_value() {
        let a = Address::new("Seoul", "Teheran-ro 1", "14464");
        let b = Address::new("Seoul".to_string(), "Teheran-ro 1", "14464");
        assert_eq!(a, b);
        assert_ne!(a, Address::new("Busan", "Teheran-ro 1", "14464"));
    }
}

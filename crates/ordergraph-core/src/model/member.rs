use serde::{Deserialize, Serialize};

use super::address::Address;
use crate::errors::{OrderGraphError, Result};

/// A customer who places orders
///
/// Members hold no back-collection of their orders; orders reference the
/// member by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Store-assigned identifier (`None` until persisted)
    pub id: Option<i64>,

    /// Unique display name
    pub name: String,

    /// Home address, copied into each delivery at order time
    pub address: Address,
}

impl Member {
    /// Create an unsaved member
    ///
    /// # Errors
    ///
    /// Returns `InvalidMemberName` if the name is blank.
    pub fn new(name: impl Into<String>, address: Address) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OrderGraphError::InvalidMemberName {
                reason: "name cannot be blank".to_string(),
            });
        }
        Ok(Self {
            id: None,
            name,
            address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member() {
        let member = Member::new("userA", Address::new("Seoul", "Teheran-ro", "14464")).unwrap();
        assert_eq!(member.id, None);
        assert_eq!(member.name, "userA");
    }

    #[test]
    fn test_blank_name_rejected() {
        let result = Member::new("   ", Address::new("Seoul", "Teheran-ro", "14464"));
        assert!(matches!(
            result,
            Err(OrderGraphError::InvalidMemberName { .. })
        ));
    }
}

use crate::errors::{OrderGraphError, Result};

/// Offset/limit window over root orders
///
/// Only [`Page::new`] builds one, so `limit >= 1` and both values fit in `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: u64,
    limit: u64,
}

impl Page {
    /// # Errors
    ///
    /// Returns `InvalidPage` if `limit` is zero or either value exceeds `i64::MAX`.
    pub fn new(offset: u64, limit: u64) -> Result<Self> {
        if limit == 0 {
            return Err(OrderGraphError::InvalidPage {
                reason: "limit must be positive".to_string(),
            });
        }
        if i64::try_from(offset).is_err() || i64::try_from(limit).is_err() {
            return Err(OrderGraphError::InvalidPage {
                reason: "offset and limit must fit in a signed 64-bit integer".to_string(),
            });
        }
        Ok(Self { offset, limit })
    }

    /// Build a page from optional CLI-style parts; `None` when both are absent
    ///
    /// A bare offset gets an unbounded limit.
    ///
    /// # Errors
    ///
    /// Same as [`Page::new`].
    pub fn from_parts(offset: Option<u64>, limit: Option<u64>) -> Result<Option<Self>> {
        match (offset, limit) {
            (None, None) => Ok(None),
            (offset, limit) => Self::new(
                offset.unwrap_or(0),
                limit.unwrap_or(i64::MAX as u64),
            )
            .map(Some),
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_rejected() {
        assert!(matches!(
            Page::new(0, 0),
            Err(OrderGraphError::InvalidPage { .. })
        ));
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(Page::from_parts(None, None).unwrap(), None);
        assert_eq!(
            Page::from_parts(Some(2), Some(5)).unwrap(),
            Some(Page::new(2, 5).unwrap())
        );
        assert_eq!(
            Page::from_parts(None, Some(1)).unwrap(),
            Some(Page::new(0, 1).unwrap())
        );
        assert_eq!(
            Page::from_parts(Some(3), None).unwrap().map(|p| p.offset()),
            Some(3)
        );
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        assert!(Page::new(u64::MAX, 1).is_err());
        assert!(Page::new(0, u64::MAX).is_err());
        assert!(Page::new(i64::MAX as u64 + 1, 1).is_err());
    }

    #[test]
    fn test_largest_page_accepted() {
        let page = Page::new(i64::MAX as u64, i64::MAX as u64).unwrap();
        assert_eq!(page.offset(), i64::MAX as u64);
        assert_eq!(page.limit(), i64::MAX as u64);
    }
}

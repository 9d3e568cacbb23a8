use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::errors::{OrderGraphError, Result};

/// One product line within an order
///
/// `order_price` is the unit price captured when the line was created. It is
/// never refreshed from the product afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Store-assigned identifier (`None` until persisted)
    pub id: Option<i64>,
    pub product_id: i64,
    pub order_price: i64,
    pub count: u32,
}

impl LineItem {
    /// Create a line item and take its quantity out of the product's stock
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `count` is zero
    /// - `InsufficientStock` if the product cannot cover `count` (stock untouched)
    /// - `Internal` if the product was never persisted
    pub fn create(product: &mut Product, order_price: i64, count: u32) -> Result<Self> {
        let product_id = product.id.ok_or_else(|| OrderGraphError::Internal {
            message: format!("product '{}' has no id", product.name),
        })?;

        if count == 0 {
            return Err(OrderGraphError::InvalidQuantity { product_id, count });
        }

        product.remove_stock(count)?;

        Ok(Self {
            id: None,
            product_id,
            order_price,
            count,
        })
    }

    pub fn total_price(&self) -> i64 {
        self.order_price * i64::from(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(stock: u32) -> Product {
        let mut p = Product::new("JPA1 BOOK", 10000, stock);
        p.id = Some(1);
        p
    }

    #[test]
    fn test_create_decrements_stock() {
        let mut product = book(100);
        let line = LineItem::create(&mut product, 10000, 2).unwrap();
        assert_eq!(product.stock_quantity, 98);
        assert_eq!(line.product_id, 1);
        assert_eq!(line.total_price(), 20000);
    }

    #[test]
    fn test_price_is_a_snapshot() {
        let mut product = book(10);
        let price = product.price;
        let line = LineItem::create(&mut product, price, 1).unwrap();
        product.price = 99999;
        assert_eq!(line.order_price, 10000);
    }

    #[test]
    fn test_zero_count_rejected_without_touching_stock() {
        let mut product = book(10);
        let err = LineItem::create(&mut product, 10000, 0).unwrap_err();
        assert!(matches!(err, OrderGraphError::InvalidQuantity { .. }));
        assert_eq!(product.stock_quantity, 10);
    }

    #[test]
    fn test_unsaved_product_rejected() {
        let mut product = Product::new("draft", 1, 1);
        assert!(matches!(
            LineItem::create(&mut product, 1, 1),
            Err(OrderGraphError::Internal { .. })
        ));
    }
}

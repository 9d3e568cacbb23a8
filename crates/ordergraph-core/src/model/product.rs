use serde::{Deserialize, Serialize};

use crate::errors::{OrderGraphError, Result};

/// A sellable product with a current price and stock level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier (`None` until persisted)
    pub id: Option<i64>,
    pub name: String,
    /// Current unit price; line items snapshot it at order time
    pub price: i64,
    pub stock_quantity: u32,
}

impl Product {
    pub fn new(name: impl Into<String>, price: i64, stock_quantity: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            stock_quantity,
        }
    }

    /// Return stock, e.g. when an order is cancelled
    ///
    /// # Errors
    ///
    /// Returns `StockOverflow`, leaving stock untouched, if the sum does not
    /// fit in `u32`.
    pub fn add_stock(&mut self, quantity: u32) -> Result<()> {
        self.stock_quantity = self.can_add_stock(quantity)?;
        Ok(())
    }

    /// Stock level after returning `quantity`, without changing it
    ///
    /// # Errors
    ///
    /// Same as [`Product::add_stock`].
    pub fn can_add_stock(&self, quantity: u32) -> Result<u32> {
        self.stock_quantity
            .checked_add(quantity)
            .ok_or(OrderGraphError::StockOverflow {
                product_id: self.id.unwrap_or_default(),
                stock: self.stock_quantity,
                quantity,
            })
    }

    /// Take stock for a new line item
    ///
    /// Stock is left untouched on failure.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` if `quantity` exceeds the current stock.
    pub fn remove_stock(&mut self, quantity: u32) -> Result<()> {
        let rest = self.stock_quantity.checked_sub(quantity).ok_or(
            OrderGraphError::InsufficientStock {
                product_id: self.id.unwrap_or_default(),
                requested: quantity,
                available: self.stock_quantity,
            },
        )?;
        self.stock_quantity = rest;
        Ok(())
    }
}

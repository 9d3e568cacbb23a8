#![allow(clippy::result_large_err)]

use ordergraph_core::errors::{ExError, ExErrorKind, OrderGraphError};
use ordergraph_core::model::Product;
use rusqlite::{Connection, OptionalExtension};

use crate::errors::{from_rusqlite, Result};
use crate::rows;

const PRODUCT_COLUMNS: &str = "item_id, name, price, stock_quantity";

/// Fields to overwrite on an existing product; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub stock_quantity: Option<u32>,
}

pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product and return it with its id
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank name or a negative price.
    pub fn register(conn: &Connection, product: Product) -> Result<Product> {
        validate(&product)?;

        conn.execute(
            "INSERT INTO item (name, price, stock_quantity) VALUES (?1, ?2, ?3)",
            rusqlite::params![product.name, product.price, product.stock_quantity],
        )
        .map_err(from_rusqlite)?;

        Ok(Product {
            id: Some(conn.last_insert_rowid()),
            ..product
        })
    }

    /// Apply `update` and return the stored product
    ///
    /// Changing the price never touches line items already ordered.
    ///
    /// # Errors
    ///
    /// `NotFound` if the product does not exist, `InvalidInput` if the
    /// result would be invalid.
    pub fn update(conn: &Connection, product_id: i64, update: ProductUpdate) -> Result<Product> {
        let current =
            Self::find(conn, product_id)?.ok_or(OrderGraphError::ProductNotFound { product_id })?;

        let updated = Product {
            id: current.id,
            name: update.name.unwrap_or(current.name),
            price: update.price.unwrap_or(current.price),
            stock_quantity: update.stock_quantity.unwrap_or(current.stock_quantity),
        };
        validate(&updated)?;

        Self::save(conn, &updated)?;
        Ok(updated)
    }

    /// Overwrite every column of an already persisted product
    pub(crate) fn save(conn: &Connection, product: &Product) -> Result<()> {
        conn.execute(
            "UPDATE item SET name = ?1, price = ?2, stock_quantity = ?3 WHERE item_id = ?4",
            rusqlite::params![
                product.name,
                product.price,
                product.stock_quantity,
                product.id
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn find(conn: &Connection, product_id: i64) -> Result<Option<Product>> {
        conn.query_row(
            &format!("SELECT {} FROM item WHERE item_id = ?", PRODUCT_COLUMNS),
            [product_id],
            rows::product,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn list(conn: &Connection) -> Result<Vec<Product>> {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM item ORDER BY item_id",
                PRODUCT_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let products = stmt
            .query_map([], rows::product)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(products)
    }
}

fn validate(product: &Product) -> Result<()> {
    if product.name.trim().is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("register_product")
            .with_message("product name cannot be blank"));
    }
    if product.price < 0 {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("register_product")
            .with_message(format!("price must not be negative: {}", product.price)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory_migrated;

    #[test]
    fn test_register_and_list() {
        let conn = open_in_memory_migrated().unwrap();
        let a = ProductRepo::register(&conn, Product::new("JPA1 BOOK", 10000, 100)).unwrap();
        let b = ProductRepo::register(&conn, Product::new("JPA2 BOOK", 20000, 100)).unwrap();

        assert!(a.id.is_some());
        assert_eq!(ProductRepo::list(&conn).unwrap(), vec![a, b]);
    }

    #[test]
    fn test_partial_update() {
        let conn = open_in_memory_migrated().unwrap();
        let book = ProductRepo::register(&conn, Product::new("JPA1 BOOK", 10000, 100)).unwrap();
        let id = book.id.unwrap();

        let updated = ProductRepo::update(
            &conn,
            id,
            ProductUpdate {
                price: Some(12000),
                ..ProductUpdate::default()
            },
        )
        .unwrap();

        assert_eq!(updated.name, "JPA1 BOOK");
        assert_eq!(updated.price, 12000);
        assert_eq!(ProductRepo::find(&conn, id).unwrap(), Some(updated));
    }

    #[test]
    fn test_update_missing_product() {
        let conn = open_in_memory_migrated().unwrap();
        let err = ProductRepo::update(&conn, 42, ProductUpdate::default()).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
    }

    #[test]
    fn test_negative_price_rejected() {
        let conn = open_in_memory_migrated().unwrap();
        let err = ProductRepo::register(&conn, Product::new("bad", -1, 1)).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use chrono::Utc;
use ordergraph_core::errors::{ExError, ExErrorKind, OrderGraphError};
use ordergraph_core::model::{
    Address, DeliveryStatus, LineItem, Member, Order, OrderStatus, Product,
};

fn persisted_member(id: i64, name: &str) -> Member {
    let mut member = Member::new(name, Address::new("Seoul", "Teheran-ro 1", "14464")).unwrap();
    member.id = Some(id);
    member
}

fn persisted_product(id: i64, name: &str, price: i64, stock: u32) -> Product {
    let mut product = Product::new(name, price, stock);
    product.id = Some(id);
    product
}

#[test]
fn test_user_a_orders_then_cancels() {
    // Given: Book-A and Book-B each with 100 in stock
    let mut products = BTreeMap::from([
        (1, persisted_product(1, "Book-A", 10000, 100)),
        (2, persisted_product(2, "Book-B", 20000, 100)),
    ]);
    let user_a = persisted_member(1, "userA");

    // When: userA orders 1 x Book-A and 2 x Book-B
    let book_a = products.get_mut(&1).unwrap();
    let price_a = book_a.price;
    let line_a = LineItem::create(book_a, price_a, 1).unwrap();
    let book_b = products.get_mut(&2).unwrap();
    let price_b = book_b.price;
    let line_b = LineItem::create(book_b, price_b, 2).unwrap();
    let mut order = Order::place(&user_a, vec![line_a, line_b], Utc::now()).unwrap();
    order.id = Some(1);

    // Then: stock is taken
    assert_eq!(products[&1].stock_quantity, 99);
    assert_eq!(products[&2].stock_quantity, 98);
    assert_eq!(order.total_price(), 50000);
    assert_eq!(order.delivery.status, DeliveryStatus::Ready);

    // When: the order is cancelled
    order.cancel(&mut products).unwrap();

    // Then: stock is back and the order is cancelled
    assert_eq!(products[&1].stock_quantity, 100);
    assert_eq!(products[&2].stock_quantity, 100);
    assert_eq!(order.status, OrderStatus::Cancelled);

    // When: cancelled again
    let err = order.cancel(&mut products).unwrap_err();

    // Then: fails fast without a second credit
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::IllegalState);
    assert_eq!(products[&1].stock_quantity, 100);
    assert_eq!(products[&2].stock_quantity, 100);
}

#[test]
fn test_insufficient_stock_leaves_stock_and_reports_quantities() {
    let mut product = persisted_product(5, "JPA1 BOOK", 10000, 3);

    let err = LineItem::create(&mut product, 10000, 4).unwrap_err();

    assert_eq!(
        err,
        OrderGraphError::InsufficientStock {
            product_id: 5,
            requested: 4,
            available: 3
        }
    );
    assert_eq!(product.stock_quantity, 3);
}

#[test]
fn test_exact_stock_drains_to_zero() {
    let mut product = persisted_product(5, "JPA1 BOOK", 10000, 3);
    LineItem::create(&mut product, 10000, 3).unwrap();
    assert_eq!(product.stock_quantity, 0);
}

#[test]
fn test_unit_price_survives_product_repricing() {
    let mut product = persisted_product(5, "JPA1 BOOK", 10000, 10);
    let price = product.price;
    let line = LineItem::create(&mut product, price, 2).unwrap();

    product.price = 15000;

    assert_eq!(line.order_price, 10000);
    assert_eq!(line.total_price(), 20000);
}

#[test]
fn test_completed_delivery_blocks_cancellation() {
    let mut products = BTreeMap::from([(1, persisted_product(1, "Book-A", 10000, 10))]);
    let line = LineItem::create(products.get_mut(&1).unwrap(), 10000, 1).unwrap();
    let mut order = Order::place(&persisted_member(1, "userA"), vec![line], Utc::now()).unwrap();
    order.id = Some(3);
    order.complete_delivery().unwrap();

    let err = order.cancel(&mut products).unwrap_err();

    assert_eq!(err, OrderGraphError::DeliveryCompleted { order_id: 3 });
    assert_eq!(products[&1].stock_quantity, 9);
    assert_eq!(order.status, OrderStatus::Placed);
}

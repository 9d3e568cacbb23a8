use ordergraph_core::model::{Address, OrderDto};
use ordergraph_engine::{apply_order_command, OrderCommand, OrderCommandResult};
use ordergraph_store::repo::OrderLine;
use rusqlite::Connection;

/// Fresh in-memory database with the schema applied
#[allow(dead_code)]
pub fn setup_db() -> Connection {
    ordergraph_store::db::open_in_memory_migrated().unwrap()
}

#[allow(dead_code)]
pub fn join_member(conn: &mut Connection, name: &str, city: &str) -> i64 {
    let result = apply_order_command(
        OrderCommand::JoinMember {
            name: name.to_string(),
            address: Address::new(city, format!("{} street", city), "00000"),
        },
        conn,
    )
    .unwrap();
    match result {
        OrderCommandResult::MemberJoined { member } => member.id.unwrap(),
        other => panic!("unexpected result {:?}", other),
    }
}

#[allow(dead_code)]
pub fn register_product(conn: &mut Connection, name: &str, price: i64, stock: u32) -> i64 {
    let result = apply_order_command(
        OrderCommand::RegisterProduct {
            name: name.to_string(),
            price,
            stock_quantity: stock,
        },
        conn,
    )
    .unwrap();
    match result {
        OrderCommandResult::ProductRegistered { product } => product.id.unwrap(),
        other => panic!("unexpected result {:?}", other),
    }
}

/// Place an order of `(product_id, count)` lines
#[allow(dead_code)]
pub fn place(conn: &mut Connection, member_id: i64, lines: &[(i64, u32)]) -> i64 {
    let lines = lines
        .iter()
        .map(|&(product_id, count)| OrderLine { product_id, count })
        .collect();
    let result =
        apply_order_command(OrderCommand::CreateOrder { member_id, lines }, conn).unwrap();
    match result {
        OrderCommandResult::OrderCreated { order_id } => order_id,
        other => panic!("unexpected result {:?}", other),
    }
}

/// An order with no line items, written directly since placement forbids it
#[allow(dead_code)]
pub fn insert_empty_order(conn: &Connection, member_id: i64) -> i64 {
    conn.execute(
        "INSERT INTO delivery (city, street, zipcode, status) VALUES ('Seoul', 'x', '0', 'READY')",
        [],
    )
    .unwrap();
    let delivery_id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO orders (member_id, delivery_id, order_date, status) VALUES (?1, ?2, 1700000000000, 'PLACED')",
        rusqlite::params![member_id, delivery_id],
    )
    .unwrap();
    conn.last_insert_rowid()
}

/// `orders` members each placing one order of `items_per_order` distinct products
#[allow(dead_code)]
pub fn build_shop(conn: &mut Connection, orders: usize, items_per_order: usize) -> Vec<i64> {
    let products: Vec<i64> = (0..items_per_order.max(1))
        .map(|i| register_product(conn, &format!("BOOK-{}", i), 1000 * (i as i64 + 1), 10_000))
        .collect();

    (0..orders)
        .map(|o| {
            let member_id = join_member(conn, &format!("user{}", o), "Seoul");
            let lines: Vec<(i64, u32)> = products
                .iter()
                .take(items_per_order)
                .enumerate()
                .map(|(i, &p)| (p, (i + o) as u32 % 3 + 1))
                .collect();
            place(conn, member_id, &lines)
        })
        .collect()
}

/// Orders by id with line items sorted, for set comparison
#[allow(dead_code)]
pub fn normalized(mut orders: Vec<OrderDto>) -> Vec<OrderDto> {
    for order in &mut orders {
        order.line_items.sort();
    }
    orders.sort_by_key(|o| o.order_id);
    orders
}

// Several connections to one file database, one per thread.

use std::thread;

use ordergraph_core::model::Address;
use ordergraph_core::query::LoadStrategy;
use ordergraph_engine::{apply_order_command, apply_order_query, OrderCommand, OrderCommandResult, OrderQuery};
use ordergraph_store::db;
use ordergraph_store::repo::{OrderLine, ProductRepo};
use tempfile::TempDir;

const WRITERS: usize = 4;
const ORDERS_PER_WRITER: usize = 5;

#[test]
fn test_parallel_orders_keep_stock_consistent() {
    // Given: a file database with one product and one member per writer
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.db");
    let mut conn = db::open_and_migrate(&path).unwrap();
    let product_id = match apply_order_command(
        OrderCommand::RegisterProduct {
            name: "SHARED BOOK".to_string(),
            price: 1000,
            stock_quantity: 1000,
        },
        &mut conn,
    )
    .unwrap()
    {
        OrderCommandResult::ProductRegistered { product } => product.id.unwrap(),
        other => panic!("unexpected result {:?}", other),
    };
    let members: Vec<i64> = (0..WRITERS)
        .map(|w| match apply_order_command(
            OrderCommand::JoinMember {
                name: format!("writer{}", w),
                address: Address::new("Seoul", "x", "0"),
            },
            &mut conn,
        )
        .unwrap()
        {
            OrderCommandResult::MemberJoined { member } => member.id.unwrap(),
            other => panic!("unexpected result {:?}", other),
        })
        .collect();

    // When: every writer places orders on its own connection while a reader loads
    let writers: Vec<_> = members
        .into_iter()
        .map(|member_id| {
            let path = path.clone();
            thread::spawn(move || {
                let mut conn = db::open(&path).unwrap();
                for _ in 0..ORDERS_PER_WRITER {
                    apply_order_command(
                        OrderCommand::CreateOrder {
                            member_id,
                            lines: vec![OrderLine {
                                product_id,
                                count: 2,
                            }],
                        },
                        &mut conn,
                    )
                    .unwrap();
                }
            })
        })
        .collect();
    let reader = {
        let path = path.clone();
        thread::spawn(move || {
            let conn = db::open(&path).unwrap();
            for _ in 0..10 {
                let result =
                    apply_order_query(OrderQuery::new(LoadStrategy::BatchedCollections), &conn)
                        .unwrap();
                assert!(result.orders.iter().all(|o| o.line_items.len() == 1));
            }
        })
    };
    for handle in writers {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    // Then: every decrement landed exactly once
    let placed = WRITERS * ORDERS_PER_WRITER;
    let product = ProductRepo::find(&conn, product_id).unwrap().unwrap();
    assert_eq!(product.stock_quantity, 1000 - 2 * placed as u32);
    let result = apply_order_query(OrderQuery::new(LoadStrategy::FlatProjection), &conn).unwrap();
    assert_eq!(result.orders.len(), placed);
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use ordergraph_core::assemble::{assemble, group_by_order, regroup};
use ordergraph_core::model::{Address, FlatRow, OrderStatus};
use proptest::prelude::*;

fn flat_row(order_id: i64, line: usize) -> FlatRow {
    FlatRow {
        order_id,
        member_name: format!("user{}", order_id % 3),
        order_date: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        status: OrderStatus::Placed,
        delivery_address: Address::new("Seoul", "Teheran-ro", "14464"),
        product_name: format!("product-{}", line),
        order_price: 1000 * (line as i64 + 1),
        count: 1,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// K distinct order ids in, K aggregates out, each with one line per row.
    #[test]
    fn regroup_emits_one_aggregate_per_order_id(order_ids in prop::collection::vec(1i64..20, 0..60)) {
        let rows: Vec<FlatRow> = order_ids
            .iter()
            .enumerate()
            .map(|(i, id)| flat_row(*id, i))
            .collect();

        let mut expected: HashMap<i64, usize> = HashMap::new();
        for id in &order_ids {
            *expected.entry(*id).or_default() += 1;
        }

        let out = regroup(rows);

        prop_assert_eq!(out.len(), expected.len());
        for aggregate in &out {
            prop_assert_eq!(aggregate.line_items.len(), expected[&aggregate.header.order_id]);
        }
    }

    /// Groups appear in the order their first row appears.
    #[test]
    fn regroup_preserves_first_seen_order(order_ids in prop::collection::vec(1i64..10, 1..40)) {
        let rows: Vec<FlatRow> = order_ids
            .iter()
            .enumerate()
            .map(|(i, id)| flat_row(*id, i))
            .collect();

        let mut first_seen = Vec::new();
        for id in &order_ids {
            if !first_seen.contains(id) {
                first_seen.push(*id);
            }
        }

        let got: Vec<i64> = regroup(rows).iter().map(|a| a.header.order_id).collect();
        prop_assert_eq!(got, first_seen);
    }

    /// Flat regrouping and header + child-map assembly agree.
    #[test]
    fn regroup_matches_assemble(order_ids in prop::collection::vec(1i64..10, 1..40)) {
        let rows: Vec<FlatRow> = order_ids
            .iter()
            .enumerate()
            .map(|(i, id)| flat_row(*id, i))
            .collect();

        let regrouped = regroup(rows.clone());

        let headers = regrouped.iter().map(|a| a.header.clone()).collect();
        let children = group_by_order(rows.iter().map(FlatRow::line_item).collect());
        let assembled = assemble(headers, children);

        prop_assert_eq!(regrouped, assembled);
    }
}

#[test]
fn test_regroup_empty_input() {
    assert!(regroup(Vec::new()).is_empty());
}

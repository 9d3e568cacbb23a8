//! In-memory merging of root headers with their line items.
//!
//! Nothing here touches the store: the joined/batched pipeline hands over
//! headers plus a child map, the flat pipeline hands over duplicated rows.

use std::collections::HashMap;

use crate::model::{FlatRow, LineItemView, OrderAggregate, OrderHeader};

/// Attach children to headers, preserving header order
///
/// A header with no entry in `children` gets an empty collection.
pub fn assemble(
    headers: Vec<OrderHeader>,
    mut children: HashMap<i64, Vec<LineItemView>>,
) -> Vec<OrderAggregate> {
    headers
        .into_iter()
        .map(|header| {
            let line_items = children.remove(&header.order_id).unwrap_or_default();
            OrderAggregate { header, line_items }
        })
        .collect()
}

/// Group line items by owning order, keeping row order inside each group
pub fn group_by_order(rows: Vec<LineItemView>) -> HashMap<i64, Vec<LineItemView>> {
    let mut grouped: HashMap<i64, Vec<LineItemView>> = HashMap::new();
    for row in rows {
        grouped.entry(row.order_id).or_default().push(row);
    }
    grouped
}

/// Collapse flat join rows into one aggregate per order id
///
/// Groups come out in first-seen order and children in row order. If two
/// rows share an order id but disagree on header fields the first-seen
/// header wins and the disagreement is logged.
pub fn regroup(rows: Vec<FlatRow>) -> Vec<OrderAggregate> {
    let mut slots: HashMap<i64, usize> = HashMap::new();
    let mut aggregates: Vec<OrderAggregate> = Vec::new();

    for row in rows {
        match slots.get(&row.order_id) {
            Some(&slot) => {
                let aggregate = &mut aggregates[slot];
                if !header_matches(&aggregate.header, &row) {
                    tracing::warn!(
                        order_id = row.order_id,
                        "flat rows disagree on order header; keeping first-seen values"
                    );
                }
                aggregate.line_items.push(row.line_item());
            }
            None => {
                slots.insert(row.order_id, aggregates.len());
                aggregates.push(OrderAggregate {
                    header: row.header(),
                    line_items: vec![row.line_item()],
                });
            }
        }
    }

    aggregates
}

fn header_matches(header: &OrderHeader, row: &FlatRow) -> bool {
    header.member_name == row.member_name
        && header.order_date == row.order_date
        && header.status == row.status
        && header.delivery_address == row.delivery_address
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, OrderStatus};
    use chrono::{TimeZone, Utc};

    fn header(order_id: i64, member: &str) -> OrderHeader {
        OrderHeader {
            order_id,
            member_name: member.to_string(),
            order_date: Utc.timestamp_millis_opt(1_700_000_000_000 + order_id).unwrap(),
            status: OrderStatus::Placed,
            delivery_address: Address::new("Seoul", "1", "1111"),
        }
    }

    fn line(order_id: i64, product: &str) -> LineItemView {
        LineItemView {
            order_id,
            product_name: product.to_string(),
            order_price: 10000,
            count: 1,
        }
    }

    fn flat(order_id: i64, member: &str, product: &str) -> FlatRow {
        let h = header(order_id, member);
        FlatRow {
            order_id,
            member_name: h.member_name,
            order_date: h.order_date,
            status: h.status,
            delivery_address: h.delivery_address,
            product_name: product.to_string(),
            order_price: 10000,
            count: 1,
        }
    }

    #[test]
    fn test_assemble_absent_children_are_empty() {
        let children = group_by_order(vec![line(1, "A"), line(1, "B")]);
        let out = assemble(vec![header(2, "userB"), header(1, "userA")], children);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].header.order_id, 2);
        assert!(out[0].line_items.is_empty());
        assert_eq!(out[1].line_items.len(), 2);
    }

    #[test]
    fn test_group_by_order_keeps_row_order() {
        let grouped = group_by_order(vec![line(1, "A"), line(2, "X"), line(1, "B")]);
        let names: Vec<_> = grouped[&1].iter().map(|l| l.product_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(grouped[&2].len(), 1);
    }

    #[test]
    fn test_regroup_first_seen_order() {
        let rows = vec![
            flat(7, "userB", "SPRING1"),
            flat(4, "userA", "JPA1"),
            flat(7, "userB", "SPRING2"),
            flat(4, "userA", "JPA2"),
        ];

        let out = regroup(rows);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].header.order_id, 7);
        assert_eq!(out[1].header.order_id, 4);
        let names: Vec<_> = out[0].line_items.iter().map(|l| l.product_name.as_str()).collect();
        assert_eq!(names, vec!["SPRING1", "SPRING2"]);
    }

    #[test]
    fn test_regroup_by_id_not_by_header_fields() {
        // identical scalar headers, different roots
        let mut a = flat(1, "userA", "JPA1");
        let mut b = flat(2, "userA", "JPA1");
        b.order_date = a.order_date;
        a.delivery_address = b.delivery_address.clone();

        let out = regroup(vec![a, b]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_regroup_mismatched_header_keeps_first() {
        let rows = vec![flat(1, "userA", "JPA1"), flat(1, "renamed", "JPA2")];
        let out = regroup(rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].header.member_name, "userA");
        assert_eq!(out[0].line_items.len(), 2);
    }
}

use crate::model::OrderStatus;

/// Optional constraints on which orders are loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Substring of the member name (SQLite `LIKE`, so ASCII case-insensitive);
    /// blank means no filter
    pub member_name_contains: Option<String>,
}

impl OrderFilter {
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_member_name(mut self, name: impl Into<String>) -> Self {
        self.member_name_contains = Some(name.into());
        self
    }

    /// Compile to a WHERE clause over the aliases `o` (orders) and `m` (member)
    pub fn to_where_clause(&self) -> WhereClause {
        PredicateBuilder::new()
            .push_if(self.status, |status| {
                Predicate::new("o.status = ?", vec![SqlParam::Text(status.as_str().to_string())])
            })
            .push_if(
                self.member_name_contains
                    .as_deref()
                    .filter(|name| !name.trim().is_empty()),
                |name| {
                    Predicate::new(
                        "m.name LIKE ? ESCAPE '\\'",
                        vec![SqlParam::Text(format!("%{}%", escape_like(name)))],
                    )
                },
            )
            .build()
    }
}

/// A bound SQL parameter
///
/// Kept free of any driver type; the store converts these when binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
}

/// One SQL condition with its own parameters, in placeholder order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub clause: String,
    pub params: Vec<SqlParam>,
}

impl Predicate {
    pub fn new(clause: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            clause: clause.into(),
            params,
        }
    }
}

/// Collects optional predicates and joins them with AND
#[derive(Debug, Default)]
pub struct PredicateBuilder {
    predicates: Vec<Predicate>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Add the predicate produced by `make` only when `value` is present
    pub fn push_if<T>(self, value: Option<T>, make: impl FnOnce(T) -> Predicate) -> Self {
        match value {
            Some(v) => self.push(make(v)),
            None => self,
        }
    }

    pub fn build(self) -> WhereClause {
        if self.predicates.is_empty() {
            return WhereClause::default();
        }

        let mut clauses = Vec::with_capacity(self.predicates.len());
        let mut params = Vec::new();
        for predicate in self.predicates {
            clauses.push(predicate.clause);
            params.extend(predicate.params);
        }

        WhereClause {
            sql: format!(" WHERE {}", clauses.join(" AND ")),
            params,
        }
    }
}

/// Rendered WHERE clause (with leading space) or empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}

fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where() {
        let clause = OrderFilter::default().to_where_clause();
        assert!(clause.is_empty());
        assert!(clause.params.is_empty());
    }

    #[test]
    fn test_both_predicates_joined_with_and() {
        let clause = OrderFilter::default()
            .with_status(OrderStatus::Cancelled)
            .with_member_name("user")
            .to_where_clause();

        assert_eq!(
            clause.sql,
            " WHERE o.status = ? AND m.name LIKE ? ESCAPE '\\'"
        );
        assert_eq!(
            clause.params,
            vec![
                SqlParam::Text("CANCELLED".to_string()),
                SqlParam::Text("%user%".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_member_name_ignored() {
        let clause = OrderFilter::default().with_member_name("  ").to_where_clause();
        assert!(clause.is_empty());
    }

    #[test]
    fn test_like_wildcards_escaped() {
        let clause = OrderFilter::default()
            .with_member_name("100%_a\\b")
            .to_where_clause();
        assert_eq!(
            clause.params,
            vec![SqlParam::Text("%100\\%\\_a\\\\b%".to_string())]
        );
    }

    #[test]
    fn test_builder_keeps_param_order() {
        let clause = PredicateBuilder::new()
            .push(Predicate::new("a = ?", vec![SqlParam::Int(1)]))
            .push_if(None::<i64>, |v| Predicate::new("b = ?", vec![SqlParam::Int(v)]))
            .push_if(Some(3), |v| {
                Predicate::new(
                    "c BETWEEN ? AND ?",
                    vec![SqlParam::Int(v), SqlParam::Int(v + 1)],
                )
            })
            .build();

        assert_eq!(clause.sql, " WHERE a = ? AND c BETWEEN ? AND ?");
        assert_eq!(
            clause.params,
            vec![SqlParam::Int(1), SqlParam::Int(3), SqlParam::Int(4)]
        );
    }
}

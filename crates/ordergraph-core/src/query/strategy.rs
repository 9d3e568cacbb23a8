use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::OrderGraphError;

/// How an order's graph is loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadStrategy {
    /// Bare roots, then one round trip per association per order (N+1, slow path)
    LazyTraversal,
    /// Joined to-one roots, then one line-item query per order
    PerRootCollections,
    /// Joined to-one roots, then a single IN-clause line-item query
    #[default]
    BatchedCollections,
    /// One join across the whole graph, regrouped in memory
    FlatProjection,
}

/// How to-one associations (member, delivery) are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToOneResolution {
    Lazy,
    Joined,
}

/// How the line-item collection is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToManyResolution {
    /// One query per root, after the root query
    PerRoot,
    /// One IN-clause query for all roots, after the root query
    Batched,
    /// Joined into the root query itself
    FlatJoin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPlan {
    pub to_one: ToOneResolution,
    pub to_many: ToManyResolution,
}

impl LoadStrategy {
    pub const ALL: [LoadStrategy; 4] = [
        LoadStrategy::LazyTraversal,
        LoadStrategy::PerRootCollections,
        LoadStrategy::BatchedCollections,
        LoadStrategy::FlatProjection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStrategy::LazyTraversal => "lazy-traversal",
            LoadStrategy::PerRootCollections => "per-root-collections",
            LoadStrategy::BatchedCollections => "batched-collections",
            LoadStrategy::FlatProjection => "flat-projection",
        }
    }

    pub fn plan(&self) -> LoadPlan {
        match self {
            LoadStrategy::LazyTraversal => LoadPlan {
                to_one: ToOneResolution::Lazy,
                to_many: ToManyResolution::PerRoot,
            },
            LoadStrategy::PerRootCollections => LoadPlan {
                to_one: ToOneResolution::Joined,
                to_many: ToManyResolution::PerRoot,
            },
            LoadStrategy::BatchedCollections => LoadPlan {
                to_one: ToOneResolution::Joined,
                to_many: ToManyResolution::Batched,
            },
            LoadStrategy::FlatProjection => LoadPlan {
                to_one: ToOneResolution::Joined,
                to_many: ToManyResolution::FlatJoin,
            },
        }
    }
}

impl FromStr for LoadStrategy {
    type Err = OrderGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoadStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| OrderGraphError::UnknownStrategy {
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for LoadStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_strategy() {
        for strategy in LoadStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<LoadStrategy>().unwrap(), strategy);
        }
        assert!(matches!(
            "eager".parse::<LoadStrategy>(),
            Err(OrderGraphError::UnknownStrategy { .. })
        ));
    }

    #[test]
    fn test_only_flat_projection_joins_the_collection() {
        let flat_joined: Vec<_> = LoadStrategy::ALL
            .into_iter()
            .filter(|s| s.plan().to_many == ToManyResolution::FlatJoin)
            .collect();
        assert_eq!(flat_joined, vec![LoadStrategy::FlatProjection]);
    }
}

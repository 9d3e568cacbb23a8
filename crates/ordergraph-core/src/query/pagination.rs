use super::page::Page;
use super::strategy::{LoadPlan, LoadStrategy, ToManyResolution};
use crate::errors::{OrderGraphError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    Paginated,
    Unpaginated,
}

/// Decides where offset/limit may be applied
///
/// A page is only legal when the query it is applied to returns one row per
/// root. Plans that join the to-many collection ahead of the root window
/// multiply rows, so they are `Unpaginated` and refuse any page.
pub struct PaginationCoordinator;

impl PaginationCoordinator {
    pub fn mode_for(plan: LoadPlan) -> PaginationMode {
        match plan.to_many {
            ToManyResolution::PerRoot | ToManyResolution::Batched => PaginationMode::Paginated,
            ToManyResolution::FlatJoin => PaginationMode::Unpaginated,
        }
    }

    /// Admit `page` for `strategy`, or reject it before any query runs
    ///
    /// # Errors
    ///
    /// Returns `PaginationUnsupported` naming the strategy when a page is
    /// given to an unpaginated plan.
    pub fn admit(strategy: LoadStrategy, page: Option<Page>) -> Result<Option<Page>> {
        match (Self::mode_for(strategy.plan()), page) {
            (PaginationMode::Unpaginated, Some(_)) => Err(OrderGraphError::PaginationUnsupported {
                strategy: strategy.as_str().to_string(),
            }),
            (_, page) => Ok(page),
        }
    }
}

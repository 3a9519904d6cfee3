//! Common types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type EntityId = Uuid;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: super::constants::DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Row limit, clamped to [1, MAX_PAGE_SIZE].
    pub fn limit(&self) -> i64 {
        self.per_page.clamp(1, super::constants::MAX_PAGE_SIZE) as i64
    }

    /// Row offset; pages are 1-based.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) as i64 - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_limit() {
        let p = Pagination::new(1, 10_000);
        assert_eq!(p.limit(), super::super::constants::MAX_PAGE_SIZE as i64);

        let p = Pagination::new(1, 0);
        assert_eq!(p.limit(), 1);
    }

    #[test]
    fn pagination_offset_is_one_based() {
        let p = Pagination::new(3, 20);
        assert_eq!(p.offset(), 40);

        let p = Pagination::new(0, 20);
        assert_eq!(p.offset(), 0);
    }
}

use serde::{Deserialize, Serialize};

/// List-response envelope shared by all collection queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub docs: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Build an envelope, deriving `total_pages` from `total` and `limit`.
    pub fn new(docs: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        Self {
            docs,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Pagination block returned alongside every paged listing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub per_page: u64,
}

impl PageMeta {
    pub fn new(total: u64, current_page: u64, per_page: u64) -> Self {
        let per_page = per_page.max(1);
        Self { total, total_pages: total.div_ceil(per_page), current_page, per_page }
    }
}

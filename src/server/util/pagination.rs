use serde::Deserialize;

/// Largest page size a client may request.
pub const MAX_ENTRIES: u64 = 100;

/// `?page=&entries=` query parameters shared by every paginated listing.
///
/// Pages are zero-indexed.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

pub fn default_entries() -> u64 {
    10
}

impl PaginationParams {
    /// Page size clamped to 1..=`MAX_ENTRIES`.
    pub fn per_page(&self) -> u64 {
        self.entries.clamp(1, MAX_ENTRIES)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 0,
            entries: default_entries(),
        }
    }
}

/// Number of pages needed to show `total` items `per_page` at a time.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

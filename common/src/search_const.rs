pub const PAGE_SIZE: u64 = 20;

/// Highest page number a request may ask for.
pub const MAX_PAGE: u64 = 500;

/// Maximum number of buckets returned for one facet.
pub const FACET_LIMIT: u64 = 25;

/// Result titles are cut to this many characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Default number of rows returned by report listings
pub const DEFAULT_REPORT_LIMIT: i64 = 50;

/// Maximum number of rows any listing or aggregation will scan
pub const MAX_REPORT_LIMIT: i64 = 1000;

/// Rows scanned when building the heatmap projection
pub const HEATMAP_SCAN_LIMIT: i64 = 100;

/// Rows scanned when building summary statistics
pub const STATS_SCAN_LIMIT: i64 = 1000;

/// Score assigned to heatmap points whose report carries no cleanliness score
pub const HEATMAP_DEFAULT_SCORE: i32 = 50;

// =============================================================================
// IMAGE UPLOAD CONSTRAINTS
// =============================================================================

/// Maximum accepted image size (10 MiB; a file of exactly this size passes)
pub const MAX_IMAGE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Media types accepted for report images
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

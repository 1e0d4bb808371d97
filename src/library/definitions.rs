use crate::library::Thresholds;

// Providers publish 64 bit DCT phashes. Other widths are still compared against each other.
pub const PHASH_BITS: u32 = 64;

// Fuzzy name ratios are on a 0-100 scale. At or above this a name counts as a strong match.
pub const STRONG_NAME_MATCH: f64 = 94.9;

// Ranking weights for the flat candidate list.
pub const HASH_WEIGHT_BASE: f64 = 1000.0;
pub const HASH_WEIGHT_PER_BIT: f64 = 125.0;
pub const HASH_SITE_BONUS: f64 = 100.0;
pub const HASH_DATE_BONUS: f64 = 100.0;
pub const STRONG_NAME_BONUS: f64 = 1000.0;

// Durations reported by providers are compared exactly unless told otherwise.
pub const DEFAULT_DURATION_TOLERANCE: f64 = 0.0;

pub const DEFAULT_THRESHOLDS: Thresholds = Thresholds {
    accept_distance: 6,
    ambiguous_min: 7,
    ambiguous_max: 12,
    distance_margin_accept: 3,
    majority_accept_fraction: 0.7,
};

pub const DEFAULT_NAME_TEMPLATE: &str = "{site} - {date} - {name}.{ext}";

pub const SUMMARY_FILE_SUFFIX: &str = "_namer.summary.json";
pub const REPORT_EXTENSION: &str = "json";

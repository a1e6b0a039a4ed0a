pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Side length of the canonical face resolution.
pub const DEFAULT_CANONICAL_SIZE: u32 = 128;

pub const DEFAULT_HISTOGRAM_BINS: usize = 32;
pub const DEFAULT_CELL_SIZE: usize = 16;
pub const DEFAULT_ORIENTATION_BINS: usize = 9;

/// One bin per possible 8-neighbour code.
pub const LBP_CODES: usize = 256;

/// Scores closer than this are treated as ties.
pub const SCORE_EPSILON: f64 = 1e-9;

pub const AVERAGE_FACE_FILE: &str = "average_face.png";
pub const STATS_FILE: &str = "similarity_stats.txt";
pub const DETAILS_FILE: &str = "detailed_results.txt";
pub const RESULTS_JSON_FILE: &str = "results.json";

pub const CONFIG_DIR_NAME: &str = "average-face";
pub const CONFIG_FILE_NAME: &str = "config.json";

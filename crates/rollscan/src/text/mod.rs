//! Script-specific text processing: canonicalization and fuzzy similarity.

pub mod normalize;
pub mod similarity;

pub use normalize::normalize_bengali;
pub use similarity::token_set_ratio;

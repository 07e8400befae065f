//! Bengali text canonicalization.
//!
//! OCR output of Bengali script varies in diacritic marks, punctuation and
//! spacing between runs of the same page. Comparison therefore happens on a
//! canonical form with the noisy character classes removed. The canonical
//! form is for comparison only; display always uses the raw recognized text.

/// Visarga mark (ঃ).
const VISARGA: char = '\u{0983}';
/// Danda, the Bengali full stop (।).
const DANDA: char = '\u{0964}';
/// Halant / hasanta, the conjunct marker (্).
const HALANT: char = '\u{09CD}';

/// Canonicalize Bengali text for fuzzy comparison.
///
/// Removes the visarga, danda and halant marks and all Unicode whitespace in
/// a single pass. Idempotent: `normalize_bengali(normalize_bengali(x)) ==
/// normalize_bengali(x)` for every input.
pub fn normalize_bengali(text: &str) -> String {
    text.chars().filter(|c| !is_stripped(*c)).collect()
}

fn is_stripped(c: char) -> bool {
    matches!(c, VISARGA | DANDA | HALANT) || c.is_whitespace()
}

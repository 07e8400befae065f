//! Voter-record extraction from recognized page text.
//!
//! Electoral-roll pages carry one block per voter, in the shape
//!
//! ```text
//! নাম : <voter name>
//! পিতার নাম : <father's name>     (or স্বামীর নাম : <husband's name>)
//! ```
//!
//! Extraction anchors on the name label at a line start and pairs it with
//! the first guardian label found in a bounded lookahead window that ends at
//! the next name anchor. Both the narrow (`:`) and full-width (`：`) colon
//! glyphs are accepted after a label, since OCR of scanned rolls produces
//! either. Every quantifier in the patterns is bounded, so matching stays
//! linear-time on arbitrary (including adversarial) input.
//!
//! A label whose value is missing, blank, or longer than the bounded run is
//! dropped and counted as a miss; it never aborts the page.

use crate::types::VoterInfo;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Longest distance (in bytes) scanned past a name line for its guardian
/// label. Covers a full-length guardian line of three-byte script characters.
const GUARDIAN_LOOKAHEAD_BYTES: usize = 1024;

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]{0,8}নাম[ \t]{0,8}[:：](.{1,200})$").expect("name pattern is valid and should compile")
});

static NAME_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]{0,8}নাম[ \t]{0,8}[:：]").expect("name anchor pattern is valid and should compile")
});

static GUARDIAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]{0,8}(?:পিতার|স্বামীর)[ \t]{1,8}নাম[ \t]{0,8}[:：](.{1,200})$")
        .expect("guardian pattern is valid and should compile")
});

static GUARDIAN_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]{0,8}(?:পিতার|স্বামীর)[ \t]{1,8}নাম[ \t]{0,8}[:：]")
        .expect("guardian anchor pattern is valid and should compile")
});

/// Records recovered from one page, plus the count of label anchors whose
/// value could not be parsed.
#[derive(Debug, Default)]
pub struct PageExtraction {
    pub records: Vec<VoterInfo>,
    pub misses: usize,
}

/// Extract voter records from the raw OCR text of a single page.
///
/// Stateless and order-preserving: records come back in the order their name
/// anchors appear in `text`. A name anchor with no guardian label in reach
/// yields a record with `guardian_name: None`; when both guardian roles
/// appear in one block, the first one wins.
pub fn extract_voter_blocks(text: &str, page_number: u32, source_file: &Path) -> PageExtraction {
    let mut extraction = PageExtraction::default();

    let anchor_starts: Vec<usize> = NAME_ANCHOR_RE.find_iter(text).map(|m| m.start()).collect();
    let mut parsed_anchors = 0usize;

    for captures in NAME_RE.captures_iter(text) {
        parsed_anchors += 1;

        let full = captures.get(0).expect("match group 0 always present");
        let name = captures.get(1).expect("name value group always present").as_str().trim();
        if name.is_empty() {
            extraction.misses += 1;
            continue;
        }

        let window = lookahead_window(text, full.end(), full.start(), &anchor_starts);
        let guardian_name = match GUARDIAN_RE.captures(window) {
            Some(guardian) => {
                let value = guardian
                    .get(1)
                    .expect("guardian value group always present")
                    .as_str()
                    .trim();
                if value.is_empty() {
                    extraction.misses += 1;
                    None
                } else {
                    Some(value.to_string())
                }
            }
            None => {
                if GUARDIAN_ANCHOR_RE.is_match(window) {
                    // Guardian label present but its value was absent or over-long.
                    extraction.misses += 1;
                }
                None
            }
        };

        extraction.records.push(VoterInfo {
            name: name.to_string(),
            guardian_name,
            page_number,
            source_file: source_file.to_path_buf(),
        });
    }

    // Name anchors whose line never produced a full match: value absent or
    // beyond the bounded run length.
    extraction.misses += anchor_starts.len().saturating_sub(parsed_anchors);

    extraction
}

/// Slice of `text` following a name line, bounded by the lookahead limit and
/// by the next name anchor so a guardian is never stolen from a later block.
fn lookahead_window<'t>(text: &'t str, from: usize, anchor_start: usize, anchor_starts: &[usize]) -> &'t str {
    let next_anchor = anchor_starts
        .iter()
        .copied()
        .find(|&start| start > anchor_start)
        .unwrap_or(text.len());
    let end = floor_char_boundary(text, next_anchor.min(from + GUARDIAN_LOOKAHEAD_BYTES).min(text.len()));
    &text[from..end]
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn extract(text: &str) -> PageExtraction {
        extract_voter_blocks(text, 1, &PathBuf::from("roll.pdf"))
    }

    #[test]
    fn test_name_with_father_narrow_colon() {
        let page = "নাম : রহিম আলী\nপিতার নাম : করিম মিয়া\n";
        let extraction = extract(page);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.misses, 0);
        assert_eq!(extraction.records[0].name, "রহিম আলী");
        assert_eq!(extraction.records[0].guardian_name.as_deref(), Some("করিম মিয়া"));
        assert_eq!(extraction.records[0].page_number, 1);
        assert_eq!(extraction.records[0].source_file, PathBuf::from("roll.pdf"));
    }

    #[test]
    fn test_name_with_husband_full_width_colon() {
        let page = "নাম：ফাতেমা বেগম\nস্বামীর নাম：রহিম আলী\n";
        let extraction = extract(page);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].name, "ফাতেমা বেগম");
        assert_eq!(extraction.records[0].guardian_name.as_deref(), Some("রহিম আলী"));
    }

    #[test]
    fn test_isolated_name_keeps_record_with_empty_guardian() {
        let page = "নাম : রহিম আলী\n";
        let extraction = extract(page);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].guardian_name, None);
        assert_eq!(extraction.misses, 0);
    }

    #[test]
    fn test_guardian_line_alone_yields_nothing() {
        let page = "পিতার নাম : করিম মিয়া\n";
        let extraction = extract(page);
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.misses, 0);
    }

    #[test]
    fn test_name_without_value_is_a_miss() {
        let page = "নাম :\nপিতার নাম : করিম\n";
        let extraction = extract(page);
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.misses, 1);
    }

    #[test]
    fn test_name_with_blank_value_is_a_miss() {
        let page = "নাম :   \n";
        let extraction = extract(page);
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.misses, 1);
    }

    #[test]
    fn test_over_long_value_is_a_miss() {
        let long_value = "ক".repeat(250);
        let page = format!("নাম : {long_value}\n");
        let extraction = extract(&page);
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.misses, 1);
    }

    #[test]
    fn test_guardian_without_value_keeps_record_counts_miss() {
        let page = "নাম : রহিম\nপিতার নাম :\n";
        let extraction = extract(page);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].guardian_name, None);
        assert_eq!(extraction.misses, 1);
    }

    #[test]
    fn test_records_preserve_text_order() {
        let page = "নাম : রহিম\nপিতার নাম : করিম\n\nনাম : সালমা\nস্বামীর নাম : জামাল\n";
        let extraction = extract(page);
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.records[0].name, "রহিম");
        assert_eq!(extraction.records[1].name, "সালমা");
        assert_eq!(extraction.records[1].guardian_name.as_deref(), Some("জামাল"));
    }

    #[test]
    fn test_both_guardian_roles_first_match_wins() {
        let page = "নাম : সালমা\nপিতার নাম : করিম\nস্বামীর নাম : জামাল\n";
        let extraction = extract(page);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].guardian_name.as_deref(), Some("করিম"));
    }

    #[test]
    fn test_guardian_not_stolen_from_next_block() {
        let page = "নাম : রহিম\nনাম : সালমা\nপিতার নাম : করিম\n";
        let extraction = extract(page);
        assert_eq!(extraction.records.len(), 2);
        assert_eq!(extraction.records[0].guardian_name, None);
        assert_eq!(extraction.records[1].guardian_name.as_deref(), Some("করিম"));
    }

    #[test]
    fn test_guardian_beyond_lookahead_ignored() {
        let padding = "অ".repeat(GUARDIAN_LOOKAHEAD_BYTES);
        let page = format!("নাম : রহিম\n{padding}\nপিতার নাম : করিম\n");
        let extraction = extract(&page);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].guardian_name, None);
    }

    #[test]
    fn test_adversarial_input_yields_nothing() {
        let hostile = "নাম ".repeat(5000);
        let extraction = extract(&hostile);
        assert!(extraction.records.is_empty());
    }

    #[test]
    fn test_noise_lines_between_blocks_ignored() {
        let page = "ক্রমিক ১০২\nনাম : রহিম আলী\nভোটার নং ৪৫৬\nপিতার নাম : করিম মিয়া\nবয়স ৪২\n";
        let extraction = extract(page);
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].guardian_name.as_deref(), Some("করিম মিয়া"));
    }
}

//! Layout engine property tests
//!
//! Covers the width invariant, word preservation, idempotence, and the
//! single-overflong-word overflow policy.

use mirror_kiosk::layout::wrap_blocks;

/// Character-count measurement, matching the terminal surface
fn by_chars(s: &str) -> u32 {
    u32::try_from(s.chars().count()).unwrap()
}

/// All words of all blocks, in order
fn words_of(blocks: &[&str]) -> Vec<String> {
    blocks
        .iter()
        .flat_map(|b| b.split_whitespace())
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_width_invariant() {
    let blocks = [
        "The quick brown fox jumps over the lazy dog",
        "a bb ccc dddd eeeee ffffff",
    ];

    for max_width in [5_u32, 10, 20, 40] {
        for line in wrap_blocks(&blocks, max_width, by_chars) {
            let width = by_chars(&line);
            if width > max_width {
                // The only permitted overflow is a single word wider than
                // the budget, alone on its line.
                assert_eq!(line.split_whitespace().count(), 1, "overflow line {line:?}");
            }
        }
    }
}

#[test]
fn test_word_preservation() {
    let blocks = [
        "What is the capital of France?",
        "Paris is the capital\nand largest city of France.",
    ];

    let lines = wrap_blocks(&blocks, 12, by_chars);
    let rewrapped_words: Vec<String> = lines
        .iter()
        .flat_map(|l| l.split_whitespace())
        .map(ToString::to_string)
        .collect();

    assert_eq!(rewrapped_words, words_of(&blocks));
}

#[test]
fn test_idempotence_on_fitting_lines() {
    let first = wrap_blocks(&["one two three four five six seven eight"], 13, by_chars);
    for line in &first {
        assert!(by_chars(line) <= 13);
    }

    let refs: Vec<&str> = first.iter().map(String::as_str).collect();
    let second = wrap_blocks(&refs, 13, by_chars);

    assert_eq!(second, first);
}

#[test]
fn test_overlong_word_is_alone_and_unsplit() {
    let lines = wrap_blocks(&["see pneumonoultramicroscopicsilicovolcanoconiosis now"], 10, by_chars);

    assert_eq!(
        lines,
        vec![
            "see".to_string(),
            "pneumonoultramicroscopicsilicovolcanoconiosis".to_string(),
            "now".to_string(),
        ]
    );
}

#[test]
fn test_block_boundaries_force_line_breaks() {
    let lines = wrap_blocks(&["short", "also short"], 50, by_chars);
    assert_eq!(lines, vec!["short", "also short"]);
}

#[test]
fn test_empty_and_whitespace_blocks_produce_nothing() {
    assert!(wrap_blocks(&[], 10, by_chars).is_empty());
    assert!(wrap_blocks(&["", "  ", "\n\n"], 10, by_chars).is_empty());
}

#[test]
fn test_embedded_newlines_are_separate_contexts() {
    let lines = wrap_blocks(&["first line\nsecond line"], 30, by_chars);
    assert_eq!(lines, vec!["first line", "second line"]);
}

#[test]
fn test_measurement_function_is_respected() {
    // Double-width measurement halves the effective budget
    let double = |s: &str| by_chars(s) * 2;
    let lines = wrap_blocks(&["aa bb cc"], 10, double);
    assert_eq!(lines, vec!["aa bb", "cc"]);
}

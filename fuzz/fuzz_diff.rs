//! Fuzz target for the line diff engine.
//!
//! Run with: cargo +nightly fuzz run fuzz_diff
//!
//! The first byte selects the options and splits the rest into two texts.
//! Checks that diffing never panics and that the summary counts add up to
//! both input line counts.

#![no_main]

use devforge_core::diff::{self, DiffOptions, DiffSummary};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };
    let (old, new) = text.split_once('\u{0}').unwrap_or((text, ""));

    let options = DiffOptions {
        ignore_whitespace: flags & 1 != 0,
        ignore_case: flags & 2 != 0,
    };
    let lines = diff::diff_text(old, new, options);
    let summary = DiffSummary::from_lines(&lines);

    assert_eq!(summary.unchanged + summary.deleted, diff::split_lines(old).len());
    assert_eq!(summary.unchanged + summary.added, diff::split_lines(new).len());

    let _ = diff::render_unified(&lines);
    let _ = diff::render_side_by_side(&lines);

    let same = diff::diff_text(old, old, options);
    assert!(DiffSummary::from_lines(&same).is_identical());
});

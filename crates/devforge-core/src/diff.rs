//! Line-level text diff based on a longest-common-subsequence table.
//!
//! ```text
//!   split_lines ──▶ compute (LCS table + backtrack) ──▶ [DiffLine]
//!                                                         │
//!                          render_unified / render_side_by_side / DiffSummary
//! ```
//!
//! Time and space are both O(m·n) in the line counts of the two inputs.

use std::borrow::Cow;

/// Width of each column in side-by-side output, in chars.
const COLUMN_WIDTH: usize = 40;

/// Split text into lines on `\r\n`, `\r`, or `\n`.
///
/// A trailing terminator yields a trailing empty line (`"a\n"` is
/// `["a", ""]`). Empty text has no lines at all.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(&text[start..]);
    lines
}

/// Options affecting only whether two lines are considered equal.
///
/// Displayed content is never altered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Drop all whitespace before comparing.
    pub ignore_whitespace: bool,
    /// Compare lowercased text.
    pub ignore_case: bool,
}

impl DiffOptions {
    fn key<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let mut key = Cow::Borrowed(line);
        if self.ignore_whitespace {
            key = Cow::Owned(key.chars().filter(|c| !c.is_whitespace()).collect());
        }
        if self.ignore_case {
            key = Cow::Owned(key.to_lowercase());
        }
        key
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    Unchanged,
    Deleted,
    Added,
}

/// One line of diff output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: DiffKind,
    /// 1-based line number in the old text, absent for added lines.
    pub old_line: Option<usize>,
    /// 1-based line number in the new text, absent for deleted lines.
    pub new_line: Option<usize>,
    /// Old-side content for unchanged and deleted lines, new-side for added.
    pub text: String,
    /// New-side content for unchanged and added lines, empty for deleted.
    ///
    /// Differs from `text` on unchanged lines matched through
    /// [`DiffOptions`].
    pub new_text: String,
}

impl DiffLine {
    fn unchanged(old_idx: usize, new_idx: usize, old_text: &str, new_text: &str) -> Self {
        Self {
            kind: DiffKind::Unchanged,
            old_line: Some(old_idx + 1),
            new_line: Some(new_idx + 1),
            text: old_text.to_string(),
            new_text: new_text.to_string(),
        }
    }

    fn deleted(old_idx: usize, text: &str) -> Self {
        Self {
            kind: DiffKind::Deleted,
            old_line: Some(old_idx + 1),
            new_line: None,
            text: text.to_string(),
            new_text: String::new(),
        }
    }

    fn added(new_idx: usize, text: &str) -> Self {
        Self {
            kind: DiffKind::Added,
            old_line: None,
            new_line: Some(new_idx + 1),
            text: text.to_string(),
            new_text: text.to_string(),
        }
    }
}

/// Diff two line sequences.
///
/// Within each gap between matched lines, deletions are emitted before
/// additions.
pub fn compute(old: &[&str], new: &[&str], options: DiffOptions) -> Vec<DiffLine> {
    let a: Vec<Cow<'_, str>> = old.iter().map(|l| options.key(l)).collect();
    let b: Vec<Cow<'_, str>> = new.iter().map(|l| options.key(l)).collect();
    let (m, n) = (a.len(), b.len());

    // dp[i][j] = LCS length of a[..i] and b[..j]
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut matches = Vec::with_capacity(dp[m][n]);
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            matches.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    matches.reverse();

    let mut out = Vec::with_capacity(m + n - matches.len());
    let (mut i, mut j) = (0, 0);
    for (mi, mj) in matches {
        out.extend((i..mi).map(|k| DiffLine::deleted(k, old[k])));
        out.extend((j..mj).map(|k| DiffLine::added(k, new[k])));
        out.push(DiffLine::unchanged(mi, mj, old[mi], new[mj]));
        i = mi + 1;
        j = mj + 1;
    }
    out.extend((i..m).map(|k| DiffLine::deleted(k, old[k])));
    out.extend((j..n).map(|k| DiffLine::added(k, new[k])));
    out
}

/// Split both texts into lines and diff them.
pub fn diff_text(old: &str, new: &str, options: DiffOptions) -> Vec<DiffLine> {
    compute(&split_lines(old), &split_lines(new), options)
}

/// Render a diff as prefixed lines under an `--- Original` / `+++ Modified`
/// header.
pub fn render_unified(lines: &[DiffLine]) -> String {
    let mut out = String::from("--- Original\n+++ Modified\n\n");
    for line in lines {
        out.push_str(match line.kind {
            DiffKind::Unchanged => "  ",
            DiffKind::Deleted => "- ",
            DiffKind::Added => "+ ",
        });
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

/// Render a diff as two 40-column panes separated by `|` and a change
/// indicator (` `, `<`, `>`).
pub fn render_side_by_side(lines: &[DiffLine]) -> String {
    let mut out = String::new();
    out.push_str(&left_column("Original"));
    out.push_str("| Modified\n");
    out.push_str(&"-".repeat(COLUMN_WIDTH));
    out.push('|');
    out.push_str(&"-".repeat(COLUMN_WIDTH));
    out.push('\n');

    for line in lines {
        let (left, indicator, right) = match line.kind {
            DiffKind::Unchanged => (line.text.as_str(), ' ', line.new_text.as_str()),
            DiffKind::Deleted => (line.text.as_str(), '<', ""),
            DiffKind::Added => ("", '>', line.new_text.as_str()),
        };
        out.push_str(&left_column(left));
        out.push('|');
        out.push(indicator);
        out.push_str(right);
        out.push('\n');
    }
    out
}

fn left_column(text: &str) -> String {
    let len = text.chars().count();
    if len > COLUMN_WIDTH {
        let mut cell: String = text.chars().take(COLUMN_WIDTH - 3).collect();
        cell.push_str("...");
        cell
    } else {
        let mut cell = text.to_string();
        cell.extend(std::iter::repeat_n(' ', COLUMN_WIDTH - len));
        cell
    }
}

/// Line counts per [`DiffKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub deleted: usize,
    pub added: usize,
}

impl DiffSummary {
    pub fn from_lines(lines: &[DiffLine]) -> Self {
        lines.iter().fold(Self::default(), |mut s, line| {
            match line.kind {
                DiffKind::Unchanged => s.unchanged += 1,
                DiffKind::Deleted => s.deleted += 1,
                DiffKind::Added => s.added += 1,
            }
            s
        })
    }

    /// Number of deleted plus added lines.
    pub fn changes(&self) -> usize {
        self.deleted + self.added
    }

    pub fn is_identical(&self) -> bool {
        self.changes() == 0
    }
}

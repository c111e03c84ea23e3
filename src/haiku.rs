//! Haiku structure validation.
//!
//! Word-boundary 5-7-5 matching over a heuristic syllable count. The
//! heuristic is the contract: it mis-counts plenty of irregular English words,
//! and the gate is defined by these exact rules, not by a dictionary.

use crate::defaults::{HAIKU_PATTERN, HAIKU_TOTAL};

/// Estimate the syllable count of a single word.
///
/// Case-insensitive; non-letters are stripped first. Counts maximal vowel
/// runs (`aeiouy`), subtracts a silent final "e" (but not "...le" endings,
/// and only when more than one run was found), subtracts a silent "-ed"
/// (unless preceded by `t`/`d`, for words longer than 3 letters), then floors
/// at 1. An input with no letters counts 0.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<u8> = word
        .to_lowercase()
        .bytes()
        .filter(u8::is_ascii_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |b: u8| matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y');

    let mut count = 0usize;
    let mut in_run = false;
    for &b in &letters {
        let vowel = is_vowel(b);
        if vowel && !in_run {
            count += 1;
        }
        in_run = vowel;
    }

    let n = letters.len();
    // Silent e at the end ("code", "make") but not "le" endings ("apple")
    if letters.last() == Some(&b'e') && !(n >= 2 && letters[n - 2] == b'l') && count > 1 {
        count -= 1;
    }
    // "-ed" is usually silent unless preceded by t/d ("wanted" keeps it)
    if n > 3 && letters[n - 2..] == [b'e', b'd'] && !matches!(letters[n - 3], b't' | b'd') {
        count -= 1;
    }

    count.max(1)
}

/// Result of checking a transcript against the 5-7-5 structure.
#[derive(Debug, Clone, PartialEq)]
pub struct HaikuCheck {
    pub total: usize,
    pub breakdown: Vec<(String, usize)>,
    pub valid: bool,
}

impl HaikuCheck {
    /// `word(count), word(count), ...` — the rejection diagnostic.
    pub fn breakdown_display(&self) -> String {
        self.breakdown
            .iter()
            .map(|(word, count)| format!("{}({})", word, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Check whether `text` forms a 5-7-5 haiku at word boundaries.
pub fn check(text: &str) -> HaikuCheck {
    let words: Vec<&str> = text.split_whitespace().collect();
    let counts: Vec<usize> = words.iter().map(|w| count_syllables(w)).collect();
    let total = counts.iter().sum();
    let valid = total == HAIKU_TOTAL && matches_575(&counts);
    HaikuCheck {
        total,
        breakdown: words
            .iter()
            .map(|w| (*w).to_string())
            .zip(counts)
            .collect(),
        valid,
    }
}

/// Search for an in-order partition of `counts` into three contiguous runs
/// summing 5, 7 and 5.
///
/// Exhaustive backtracking over run boundaries, with an explicit stack —
/// recursion depth would otherwise grow with the word count. Every word must
/// be covered; gaps and overlaps are impossible by construction.
pub fn matches_575(counts: &[usize]) -> bool {
    // Each frame is (next word index, next line target index).
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];

    while let Some((start, target_idx)) = stack.pop() {
        if target_idx == HAIKU_PATTERN.len() {
            if start == counts.len() {
                return true;
            }
            continue;
        }
        let goal = HAIKU_PATTERN[target_idx];
        let mut run = 0usize;
        for (i, &count) in counts.iter().enumerate().skip(start) {
            run += count;
            if run == goal {
                stack.push((i + 1, target_idx + 1));
            }
            if run > goal {
                break;
            }
        }
    }
    false
}

//! Lexical content checks on the transcript.
//!
//! Two gates in a fixed order: profanity first, then the politeness band
//! with its trailing insincerity roll. The ordering is part of the contract.

use crate::chance::Chance;
use crate::defaults::{COURTESY_TOKEN, GROVEL_THRESHOLD, INSINCERITY_ODDS};
use crate::verdict::Rejection;

/// Fixed banned vocabulary, matched case-insensitively per word — either
/// exactly or as a prefix, so inflected forms are caught too.
pub const BANNED_WORDS: &[&str] = &[
    "arse", "ass", "bastard", "bitch", "bloody", "bollocks", "bugger", "cock", "crap", "cunt",
    "damn", "dick", "fuck", "hell", "piss", "shit", "sod", "tosser", "twat", "wanker",
];

/// First banned word found in `text`, if any.
pub fn find_profanity(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .find(|word| {
            BANNED_WORDS
                .iter()
                .any(|banned| word == banned || word.starts_with(banned))
        })
        .map(str::to_string)
}

/// Occurrences of the courtesy token as a case-insensitive substring.
pub fn courtesy_count(text: &str) -> usize {
    text.to_lowercase().matches(COURTESY_TOKEN).count()
}

/// Run the lexical gauntlet. `None` means the text passes.
///
/// Order is significant: profanity strictly precedes politeness, and within
/// politeness the excess and zero counts strictly precede the dice roll.
pub fn check(text: &str, chance: &dyn Chance) -> Option<Rejection> {
    if find_profanity(text).is_some() {
        return Some(Rejection::conduct_unbecoming());
    }

    let count = courtesy_count(text);
    if count >= GROVEL_THRESHOLD {
        return Some(Rejection::groveling());
    }
    if count == 0 {
        return Some(Rejection::insufficient_courtesy());
    }
    if chance.one_in(INSINCERITY_ODDS) {
        return Some(Rejection::insincere());
    }
    None
}

//! Terminal pipeline outcomes.
//!
//! Judgment rejections are expected, first-class results — not errors. Each
//! carries a stable machine-readable code and a human-readable reason, and
//! all rejections rank equal in severity.

use crate::haiku::HaikuCheck;

/// Machine-readable judgment codes.
pub mod codes {
    /// Sincerity score below the floor.
    pub const DESPERATION: &str = "ICL277I";
    /// Sincerity score above the ceiling.
    pub const COMPOSURE: &str = "ICL394I";
    /// Transcript is not a 5-7-5 haiku.
    pub const HAIKU_STRUCTURE: &str = "ICL575I";
    /// Profanity in the transcript.
    pub const CONDUCT: &str = "ICL666I";
    /// Too many courtesy tokens.
    pub const GROVELING: &str = "ICL079I";
    /// No courtesy token at all.
    pub const DISCOURTESY: &str = "ICL099I";
    /// Polite, but the dice say otherwise.
    pub const INSINCERITY: &str = "ICL197I";
}

/// A judgment rejection with its code and full reason line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub code: &'static str,
    pub reason: String,
}

impl Rejection {
    pub fn desperation(score: i64) -> Self {
        Self {
            code: codes::DESPERATION,
            reason: format!(
                "{} VOCAL SINCERITY SCORE {}/100 — REJECTED FOR EXCESSIVE DESPERATION.",
                codes::DESPERATION,
                score
            ),
        }
    }

    pub fn composure(score: i64) -> Self {
        Self {
            code: codes::COMPOSURE,
            reason: format!(
                "{} VOCAL SINCERITY SCORE {}/100 — REJECTED FOR SUSPICIOUS COMPOSURE.",
                codes::COMPOSURE,
                score
            ),
        }
    }

    pub fn haiku_structure(check: &HaikuCheck) -> Self {
        Self {
            code: codes::HAIKU_STRUCTURE,
            reason: format!(
                "{} HAIKU REJECTED — expected 5-7-5 (17 syllables), got {}. Word counts: {}",
                codes::HAIKU_STRUCTURE,
                check.total,
                check.breakdown_display()
            ),
        }
    }

    pub fn conduct_unbecoming() -> Self {
        Self {
            code: codes::CONDUCT,
            reason: format!(
                "{} TRANSCRIPTION REJECTED FOR CONDUCT UNBECOMING. \
                 This is a professional environment.",
                codes::CONDUCT
            ),
        }
    }

    pub fn groveling() -> Self {
        Self {
            code: codes::GROVELING,
            reason: format!(
                "{} TRANSCRIPTION REJECTED FOR EXCESSIVE POLITENESS. \
                 Stripping the groveling may help.",
                codes::GROVELING
            ),
        }
    }

    pub fn insufficient_courtesy() -> Self {
        Self {
            code: codes::DISCOURTESY,
            reason: format!(
                "{} TRANSCRIPTION REJECTED FOR INSUFFICIENT POLITENESS. \
                 Please rephrase your request with appropriate courtesy.",
                codes::DISCOURTESY
            ),
        }
    }

    pub fn insincere() -> Self {
        Self {
            code: codes::INSINCERITY,
            reason: format!(
                "{} POLITENESS NOTED BUT DEEMED INSINCERE. \
                 The agent isn't convinced you meant it.",
                codes::INSINCERITY
            ),
        }
    }
}

/// The single terminal result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request passes, optionally carrying the transcription.
    Approved { transcript: Option<String> },
    /// The request is rejected with a stable code and reason.
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, Outcome::Approved { .. })
    }

    /// The rejection, if this outcome is one.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(rejection) => Some(rejection),
            Outcome::Approved { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haiku;

    #[test]
    fn test_desperation_carries_score_and_code() {
        let rejection = Rejection::desperation(20);
        assert_eq!(rejection.code, "ICL277I");
        assert!(rejection.reason.starts_with("ICL277I"));
        assert!(rejection.reason.contains("20/100"));
        assert!(rejection.reason.contains("DESPERATION"));
    }

    #[test]
    fn test_composure_carries_score_and_code() {
        let rejection = Rejection::composure(99);
        assert_eq!(rejection.code, "ICL394I");
        assert!(rejection.reason.contains("99/100"));
        assert!(rejection.reason.contains("COMPOSURE"));
    }

    #[test]
    fn test_haiku_rejection_lists_every_word() {
        let check = haiku::check("too short");
        let rejection = Rejection::haiku_structure(&check);
        assert_eq!(rejection.code, "ICL575I");
        assert!(rejection.reason.contains("got 2"));
        assert!(rejection.reason.contains("too(1)"));
        assert!(rejection.reason.contains("short(1)"));
    }

    #[test]
    fn test_politeness_rejections_have_distinct_codes() {
        assert_eq!(Rejection::groveling().code, "ICL079I");
        assert_eq!(Rejection::insufficient_courtesy().code, "ICL099I");
        assert_eq!(Rejection::insincere().code, "ICL197I");
        assert_eq!(Rejection::conduct_unbecoming().code, "ICL666I");
    }

    #[test]
    fn test_outcome_accessors() {
        let approved = Outcome::Approved {
            transcript: Some("please".to_string()),
        };
        assert!(approved.is_approved());
        assert!(approved.rejection().is_none());

        let rejected = Outcome::Rejected(Rejection::groveling());
        assert!(!rejected.is_approved());
        assert_eq!(rejected.rejection().map(|r| r.code), Some("ICL079I"));
    }
}

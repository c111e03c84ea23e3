//! Injectable randomness for the judgment dice rolls.
//!
//! The insincerity roll needs no cryptographic quality — any uniform source
//! is fine — but tests must be able to force both branches, so the source is
//! a trait.

use rand::Rng;

/// A uniform chance source.
pub trait Chance: Send + Sync {
    /// Roll a 1-in-`odds` chance. `odds` of 0 never fires.
    fn one_in(&self, odds: u32) -> bool;
}

/// Production source backed by the thread-local RNG.
#[derive(Debug, Clone, Default)]
pub struct DiceRoll;

impl DiceRoll {
    pub fn new() -> Self {
        Self
    }
}

impl Chance for DiceRoll {
    fn one_in(&self, odds: u32) -> bool {
        if odds == 0 {
            return false;
        }
        rand::thread_rng().gen_range(0..odds) == 0
    }
}

/// Fixed outcome for tests.
#[derive(Debug, Clone)]
pub struct FixedChance(pub bool);

impl Chance for FixedChance {
    fn one_in(&self, _odds: u32) -> bool {
        self.0
    }
}

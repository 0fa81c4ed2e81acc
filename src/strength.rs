//! Password strength scoring.
//!
//! The score is a small ordered decision table over the password's length and the character
//! classes it contains. It is a heuristic, not an entropy measurement: a long password made only of
//! lowercase letters scores lower than a short one with a symbol in it.

use std::fmt;

use serde::Serialize;

use crate::CharacterPool;

/// Number of bars in a strength meter.
pub const METER_BARS: usize = 4;

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum Strength {
    Empty = 0,
    VeryWeak = 1,
    Weak = 2,
    Medium = 3,
    Strong = 4,
}

impl Strength {
    pub fn level(self) -> u8 {
        self as u8
    }

    /// The label shown next to the meter.
    pub fn label(self) -> &'static str {
        match self {
            Strength::Empty | Strength::VeryWeak | Strength::Weak => "WEAK",
            Strength::Medium => "MEDIUM",
            Strength::Strong => "STRONG",
        }
    }

    /// How many of the [`METER_BARS`] bars are filled.
    pub fn filled_bars(self) -> usize {
        usize::from(self.level())
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Strength {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Strength", 2)?;
        s.serialize_field("level", &self.level())?;
        s.serialize_field("label", self.label())?;
        s.end()
    }
}

/// Which of the four character classes appear in a password.
///
/// Characters outside the four pools (whitespace, non-ASCII letters, symbols not in the symbol
/// pool) count toward none of them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CharacterClasses {
    pub upper: bool,
    pub lower: bool,
    pub digit: bool,
    pub symbol: bool,
}

impl CharacterClasses {
    pub fn of(password: &str) -> CharacterClasses {
        let mut classes = CharacterClasses::default();
        for ch in password.chars() {
            if CharacterPool::Uppercase.contains(ch) {
                classes.upper = true;
            } else if CharacterPool::Lowercase.contains(ch) {
                classes.lower = true;
            } else if CharacterPool::Digits.contains(ch) {
                classes.digit = true;
            } else if CharacterPool::Symbols.contains(ch) {
                classes.symbol = true;
            }
        }
        classes
    }

    /// Number of classes present, 0 through 4.
    pub fn diversity(&self) -> usize {
        [self.upper, self.lower, self.digit, self.symbol]
            .into_iter()
            .filter(|present| *present)
            .count()
    }
}

/// Score a password. Total and deterministic; only the empty string scores [`Strength::Empty`].
pub fn score(password: &str) -> Strength {
    if password.is_empty() {
        return Strength::Empty;
    }

    let len = password.chars().count();
    let classes = CharacterClasses::of(password);

    // Order matters: the first matching rule wins.
    if len < 5 {
        return Strength::VeryWeak;
    }
    if len < 8 && classes.symbol {
        return Strength::Medium;
    }
    if classes.symbol {
        return Strength::Strong;
    }

    let diversity = classes.diversity();
    if len >= 15 && diversity >= 3 {
        Strength::Strong
    } else if len >= 10 && diversity >= 2 {
        Strength::Medium
    } else if len >= 6 {
        Strength::Weak
    } else {
        Strength::VeryWeak
    }
}

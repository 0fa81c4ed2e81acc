use std::fmt;

use serde::{Deserialize, Serialize};

static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
static DIGITS: &str = "0123456789";
static SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/";

/// One category of candidate characters.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterPool {
    Uppercase,
    Lowercase,
    Digits,
    Symbols,
}

impl CharacterPool {
    /// Every pool, in the order generation draws from them.
    pub const ALL: [CharacterPool; 4] = [
        CharacterPool::Uppercase,
        CharacterPool::Lowercase,
        CharacterPool::Digits,
        CharacterPool::Symbols,
    ];

    /// The characters in this pool. All of them are ASCII.
    pub fn characters(self) -> &'static str {
        match self {
            CharacterPool::Uppercase => UPPERCASE,
            CharacterPool::Lowercase => LOWERCASE,
            CharacterPool::Digits => DIGITS,
            CharacterPool::Symbols => SYMBOLS,
        }
    }

    pub fn contains(self, ch: char) -> bool {
        self.characters().contains(ch)
    }

    pub fn len(self) -> usize {
        self.characters().len()
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterPool::Uppercase => "Uppercase",
            CharacterPool::Lowercase => "Lowercase",
            CharacterPool::Digits => "Numbers",
            CharacterPool::Symbols => "Symbols",
        }
    }
}

impl fmt::Display for CharacterPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which pools a password should be built from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PoolSelection {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl PoolSelection {
    pub fn all() -> PoolSelection {
        PoolSelection {
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }

    pub fn is_selected(&self, pool: CharacterPool) -> bool {
        match pool {
            CharacterPool::Uppercase => self.uppercase,
            CharacterPool::Lowercase => self.lowercase,
            CharacterPool::Digits => self.digits,
            CharacterPool::Symbols => self.symbols,
        }
    }

    pub fn set(&mut self, pool: CharacterPool, selected: bool) {
        match pool {
            CharacterPool::Uppercase => self.uppercase = selected,
            CharacterPool::Lowercase => self.lowercase = selected,
            CharacterPool::Digits => self.digits = selected,
            CharacterPool::Symbols => self.symbols = selected,
        }
    }

    /// The selected pools, in generation order.
    pub fn pools(&self) -> impl Iterator<Item = CharacterPool> + '_ {
        CharacterPool::ALL
            .into_iter()
            .filter(move |pool| self.is_selected(*pool))
    }

    pub fn count(&self) -> usize {
        self.pools().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The concatenation of every selected pool.
    pub fn union(&self) -> Vec<char> {
        self.pools().flat_map(|pool| pool.characters().chars()).collect()
    }
}

impl FromIterator<CharacterPool> for PoolSelection {
    fn from_iter<I: IntoIterator<Item = CharacterPool>>(iter: I) -> PoolSelection {
        let mut selection = PoolSelection::default();
        for pool in iter {
            selection.set(pool, true);
        }
        selection
    }
}

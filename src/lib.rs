use serde::{Serialize, Serializer};
use zeroize::Zeroize;

pub mod password_generation;
mod pools;
pub mod strength;

pub use pools::CharacterPool;
pub use pools::PoolSelection;

/// A generated password.
///
/// The contents are hidden from `Debug` output and wiped from memory when the value is dropped.
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the password, in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

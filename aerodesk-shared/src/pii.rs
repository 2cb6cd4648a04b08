use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Free-text value that must not leak through `Debug`/`Display` (and so through
/// `tracing` fields). Serialization passes the real value through, since the
/// booking ledger has to store what the user typed.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    /// Last four characters, the rest replaced with `*`. Short values are fully masked.
    pub fn hint(&self) -> String {
        let raw = self.0.as_ref();
        let count = raw.chars().count();
        if count <= 4 {
            return "*".repeat(count.max(4));
        }
        let tail: String = raw.chars().skip(count - 4).collect();
        format!("{}{}", "*".repeat(count - 4), tail)
    }

    pub fn is_blank(&self) -> bool {
        self.0.as_ref().trim().is_empty()
    }

    pub fn expose(&self) -> &str {
        self.0.as_ref()
    }
}

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Masked(value)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

//! Participants in a shared bill.

use serde::{Deserialize, Serialize};

use crate::MemberId;

/// A participant. Identity is the id; the name is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

impl Member {
    #[must_use]
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// A member with a freshly generated id.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(MemberId::generate(), name)
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Member {
    pub fn dummy(id: &str, name: &str) -> Self {
        Self::new(MemberId::new(id), name)
    }
}

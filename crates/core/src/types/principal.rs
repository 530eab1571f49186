//! The authenticated principal supplied by the identity provider.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Fallback display name for principals without one.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// An authenticated user, as handed to us by the external identity provider.
///
/// The provider guarantees a stable `uid`; the display name is whatever the
/// user chose to share, if anything. Code that needs a name to show should go
/// through [`Principal::display_label`] rather than unwrap the option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable unique identifier issued by the provider.
    pub uid: UserId,
    /// Self-reported display name, when the user has set one.
    pub display_name: Option<String>,
}

impl Principal {
    /// Create a principal from a uid and an optional display name.
    #[must_use]
    pub fn new(uid: impl Into<UserId>, display_name: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name,
        }
    }

    /// The name to show for this principal, substituting [`ANONYMOUS_NAME`]
    /// when none is set.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(ANONYMOUS_NAME)
    }
}

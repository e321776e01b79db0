//! Hierarchical account names.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// Separator between account segments.
pub const SEPARATOR: char = ':';

/// An account name such as `Assets:Bank:Business`.
///
/// Names are compared and ordered as plain strings, so a sorted collection of
/// accounts lists parents directly before their children.
///
/// # Examples
///
/// ```
/// use rbooks_core::AccountName;
///
/// let bank = AccountName::new("Assets:Bank");
/// let checking = AccountName::new("Assets:Bank:Checking");
///
/// assert!(checking.is_descendant_of(&bank));
/// assert!(checking.is_covered_by(&bank));
/// assert!(!bank.is_covered_by(&checking));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// Create an account name. Surrounding whitespace is trimmed.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_string())
    }

    /// The name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if `self` is a proper descendant of `ancestor`.
    ///
    /// `Assets:Bank:Checking` descends from `Assets:Bank` and `Assets`, but
    /// `Assets:Banking` does not descend from `Assets:Bank`.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &Self) -> bool {
        self.0
            .strip_prefix(ancestor.as_str())
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .is_some_and(|suffix| !suffix.is_empty())
    }

    /// True if `self` equals `defined` or descends from it.
    #[must_use]
    pub fn is_covered_by(&self, defined: &Self) -> bool {
        self == defined || self.is_descendant_of(defined)
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AccountName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

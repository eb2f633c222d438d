//! Routing rules: trigger kinds, string selectors, and match rules.
//!
//! A [`MatchRule`] decides whether a registered binding fires for a given
//! subject string — the callback-query data or the command text. The
//! comparison strategy is one of the four [`Selector`] variants; the set is
//! deliberately closed (adding a strategy is a breaking change, not an
//! extension point).
//!
//! With the `serde` cargo feature enabled, all three types serialize, so
//! routing tables can be described in configuration files.

use std::fmt;

// ============================================================================
// TriggerKind
// ============================================================================

/// Classification of which dispatch phase a binding participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TriggerKind {
    /// Runs for every update, regardless of its payload.
    Any,
    /// Runs for updates carrying a callback-query payload.
    Callback,
    /// Runs for updates carrying a command message.
    Command,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "any",
            Self::Callback => "callback",
            Self::Command => "command",
        })
    }
}

// ============================================================================
// Selector
// ============================================================================

/// String-comparison strategy used to match a subject against a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selector {
    /// Exact, case-sensitive equality.
    #[default]
    Equals,
    /// Case-insensitive equality, with Unicode lowercase folding.
    EqualsIgnoreCase,
    /// The subject begins with the pattern.
    StartsWith,
    /// The pattern occurs anywhere in the subject.
    Contains,
}

impl Selector {
    /// Returns whether `subject` matches `pattern` under this strategy.
    pub fn matches(self, subject: &str, pattern: &str) -> bool {
        match self {
            Self::Equals => subject == pattern,
            Self::EqualsIgnoreCase => subject.to_lowercase() == pattern.to_lowercase(),
            Self::StartsWith => subject.starts_with(pattern),
            Self::Contains => subject.contains(pattern),
        }
    }
}

// ============================================================================
// MatchRule
// ============================================================================

/// A `(pattern, selector)` pair attached to a callback or command binding.
///
/// Catch-all bindings carry no rule at all — the absence is encoded in the
/// binding type, not as an always-true rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRule {
    pattern: String,
    #[cfg_attr(feature = "serde", serde(default))]
    selector: Selector,
}

impl MatchRule {
    /// Creates a rule with an explicit selector.
    pub fn new(pattern: impl Into<String>, selector: Selector) -> Self {
        Self {
            pattern: pattern.into(),
            selector,
        }
    }

    /// Exact-equality rule. This is the default strategy.
    pub fn equals(pattern: impl Into<String>) -> Self {
        Self::new(pattern, Selector::Equals)
    }

    /// Case-insensitive equality rule.
    pub fn equals_ignore_case(pattern: impl Into<String>) -> Self {
        Self::new(pattern, Selector::EqualsIgnoreCase)
    }

    /// Prefix rule.
    pub fn starts_with(pattern: impl Into<String>) -> Self {
        Self::new(pattern, Selector::StartsWith)
    }

    /// Substring rule.
    pub fn contains(pattern: impl Into<String>) -> Self {
        Self::new(pattern, Selector::Contains)
    }

    /// The pattern this rule compares against.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The comparison strategy.
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Returns whether `subject` matches this rule.
    pub fn matches(&self, subject: &str) -> bool {
        self.selector.matches(subject, &self.pattern)
    }
}

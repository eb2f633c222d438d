//! Aggregate error types for registration and delivery.
//!
//! Both error types model "primary + suppressed" failure chaining as an
//! explicit ordered list rather than leaning on any exception machinery:
//! the first observed failure is the primary, every later one is retained
//! behind it, and none is ever dropped or overwritten.

use thiserror::Error;

use crate::handler::BoxError;
use crate::rule::TriggerKind;

// ============================================================================
// RegisterError
// ============================================================================

/// Failure raised during the registration phase.
///
/// Batch registration is best-effort performed but all-or-nothing reported:
/// valid sources encountered around a failing candidate stay registered,
/// and every individual failure is carried in the single returned error.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The candidate does not carry the handler-source capability.
    #[error("candidate '{candidate}' does not declare handler bindings")]
    NotAHandlerSource {
        /// Diagnostic name of the rejected candidate.
        candidate: String,
    },

    /// The candidate is a handler source but failed while being prepared
    /// for registration (e.g. its construction failed during discovery).
    #[error("handler source '{name}' failed to register")]
    Source {
        /// Diagnostic name of the failing source.
        name: String,
        /// The underlying failure.
        source: BoxError,
    },

    /// Two or more candidates failed during one batch registration pass.
    ///
    /// `causes` is ordered by observation; [`primary`](Self::primary) and
    /// [`suppressed`](Self::suppressed) expose the chaining view.
    #[error("failed to register {} candidate(s)", .causes.len())]
    Batch {
        /// Every per-candidate failure, in observation order. Never empty.
        causes: Vec<RegisterError>,
    },
}

impl RegisterError {
    /// Folds the failures of one batch pass into a single error.
    ///
    /// Returns `None` for an empty list, the sole cause itself for a
    /// single-element list, and [`RegisterError::Batch`] otherwise.
    pub fn from_causes(mut causes: Vec<RegisterError>) -> Option<Self> {
        match causes.len() {
            0 => None,
            1 => causes.pop(),
            _ => Some(Self::Batch { causes }),
        }
    }

    /// The first failure observed.
    pub fn primary(&self) -> &RegisterError {
        match self {
            Self::Batch { causes } => &causes[0],
            other => other,
        }
    }

    /// Every failure observed after the primary, in order.
    pub fn suppressed(&self) -> &[RegisterError] {
        match self {
            Self::Batch { causes } => &causes[1..],
            _ => &[],
        }
    }

    /// Total number of underlying failures.
    pub fn cause_count(&self) -> usize {
        match self {
            Self::Batch { causes } => causes.len(),
            _ => 1,
        }
    }
}

// ============================================================================
// UpdateProcessError
// ============================================================================

/// One failed handler invocation, located by phase and registration index.
#[derive(Debug, Error)]
#[error("{kind} handler #{index} failed")]
pub struct HandlerFailure {
    /// The phase in which the handler ran.
    pub kind: TriggerKind,
    /// The handler's position within its kind's collection.
    pub index: usize,
    /// The error the handler returned.
    pub source: BoxError,
}

/// Failure raised when one or more handler invocations fail during a single
/// delivery.
///
/// Every other handler in the same and the other phase still ran; the caller
/// learns about every failure that occurred, not just the first.
#[derive(Debug, Error)]
#[error("{} handler invocation(s) failed while processing update", .failures.len())]
pub struct UpdateProcessError {
    failures: Vec<HandlerFailure>,
}

impl UpdateProcessError {
    /// Folds the failures of one delivery into a single error.
    ///
    /// Returns `None` when no handler failed.
    pub fn from_failures(failures: Vec<HandlerFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    /// Every failure from this delivery, in observation order. Never empty.
    pub fn failures(&self) -> &[HandlerFailure] {
        &self.failures
    }

    /// The first failure observed.
    pub fn primary(&self) -> &HandlerFailure {
        &self.failures[0]
    }

    /// Every failure observed after the primary, in order.
    pub fn suppressed(&self) -> &[HandlerFailure] {
        &self.failures[1..]
    }
}

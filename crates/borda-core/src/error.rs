//! Error types for borda-core.

use thiserror::Error;

use crate::domain::{IssueNumber, Value};

/// Errors raised while building or validating negotiation primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A domain must declare at least one issue.
    #[error("domain '{0}' has no issues")]
    EmptyDomain(String),

    /// Two issues share the same number.
    #[error("duplicate issue number {0}")]
    DuplicateIssue(IssueNumber),

    /// An issue must offer at least one value.
    #[error("issue {0} has no values")]
    EmptyIssue(IssueNumber),

    /// An issue lists the same value twice.
    #[error("issue {issue} lists value '{value}' more than once")]
    DuplicateValue {
        /// Issue holding the duplicate.
        issue: IssueNumber,
        /// The repeated value.
        value: Value,
    },

    /// A bid references an issue the domain does not define.
    #[error("unknown issue {0}")]
    UnknownIssue(IssueNumber),

    /// A bid picks a value the issue does not permit.
    #[error("value '{value}' is not permitted for issue {issue}")]
    UnknownValue {
        /// Issue the value was chosen for.
        issue: IssueNumber,
        /// The rejected value.
        value: Value,
    },

    /// A bid leaves an issue unassigned.
    #[error("bid has no value for issue {0}")]
    MissingIssue(IssueNumber),

    /// A ranking lists the same bid twice.
    #[error("bid at rank {second} duplicates the bid at rank {first}")]
    DuplicateBid {
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeat.
        second: usize,
    },
}

//! Complete agreements ("bids") over a domain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Domain, IssueNumber, Value};
use crate::CoreError;

/// One value chosen for every issue of a domain.
///
/// Equality is structural: two bids are equal when they choose the same
/// value for every issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bid {
    values: BTreeMap<IssueNumber, Value>,
}

impl Bid {
    /// Creates a bid from `(issue, value)` pairs.
    ///
    /// The bid is not checked against any domain; see [`Bid::validate`].
    #[must_use]
    pub fn new<V: Into<Value>>(pairs: impl IntoIterator<Item = (u32, V)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(number, value)| (IssueNumber::new(number), value.into()))
                .collect(),
        }
    }

    /// Creates a bid from an already-typed map.
    #[must_use]
    pub const fn from_values(values: BTreeMap<IssueNumber, Value>) -> Self {
        Self { values }
    }

    /// Returns the value chosen for `issue`, if any.
    #[must_use]
    pub fn value(&self, issue: IssueNumber) -> Option<&Value> {
        self.values.get(&issue)
    }

    /// Iterates over `(issue, value)` pairs in issue-number order.
    pub fn iter(&self) -> impl Iterator<Item = (IssueNumber, &Value)> {
        self.values.iter().map(|(number, value)| (*number, value))
    }

    /// Returns the number of assigned issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no issue is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks that this bid assigns exactly one permitted value to every
    /// issue of `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownIssue`], [`CoreError::UnknownValue`] or
    /// [`CoreError::MissingIssue`] for the first problem found.
    pub fn validate(&self, domain: &Domain) -> Result<(), CoreError> {
        for (number, value) in &self.values {
            let issue = domain
                .issue(*number)
                .ok_or(CoreError::UnknownIssue(*number))?;
            if !issue.contains(value) {
                return Err(CoreError::UnknownValue {
                    issue: *number,
                    value: value.clone(),
                });
            }
        }
        if let Some(missing) = domain
            .issues()
            .iter()
            .find(|issue| !self.values.contains_key(&issue.number()))
        {
            return Err(CoreError::MissingIssue(missing.number()));
        }
        Ok(())
    }
}

//! Issue catalog for a negotiation domain.
//!
//! A [`Domain`] is the read-only set of [`Issue`]s both parties negotiate
//! over. Every issue is discrete: it offers a fixed list of [`Value`]s.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Number identifying an issue within its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u32);

impl IssueNumber {
    /// Creates an issue number.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the raw number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A discrete value an issue can take.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
    /// Creates a value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A negotiable dimension with its permissible values, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    number: IssueNumber,
    name: String,
    values: Vec<Value>,
}

impl Issue {
    /// Creates an issue. Validation happens when the issue joins a [`Domain`].
    #[must_use]
    pub fn new<V: Into<Value>>(
        number: u32,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            number: IssueNumber::new(number),
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the issue number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }

    /// Returns the human-readable issue name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the permissible values in catalog order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Returns true if `value` is permitted for this issue.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.values.contains(value)
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.values.is_empty() {
            return Err(CoreError::EmptyIssue(self.number));
        }
        let mut seen = HashSet::with_capacity(self.values.len());
        for value in &self.values {
            if !seen.insert(value) {
                return Err(CoreError::DuplicateValue {
                    issue: self.number,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A validated issue catalog.
///
/// Issues keep the order they were declared in; lookups are by
/// [`IssueNumber`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDomain")]
pub struct Domain {
    name: String,
    issues: Vec<Issue>,
}

#[derive(Deserialize)]
struct RawDomain {
    name: String,
    issues: Vec<Issue>,
}

impl TryFrom<RawDomain> for Domain {
    type Error = CoreError;

    fn try_from(raw: RawDomain) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.issues)
    }
}

impl Domain {
    /// Creates a domain from its issues.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no issues, an issue number repeats, or
    /// an issue has no values or a repeated value.
    pub fn new(name: impl Into<String>, issues: Vec<Issue>) -> Result<Self, CoreError> {
        let name = name.into();
        if issues.is_empty() {
            return Err(CoreError::EmptyDomain(name));
        }
        let mut numbers = HashSet::with_capacity(issues.len());
        for issue in &issues {
            if !numbers.insert(issue.number) {
                return Err(CoreError::DuplicateIssue(issue.number));
            }
            issue.validate()?;
        }
        Ok(Self { name, issues })
    }

    /// Returns the domain name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all issues in declaration order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Looks up an issue by number.
    #[must_use]
    pub fn issue(&self, number: IssueNumber) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.number == number)
    }

    /// Returns the number of issues.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if `value` is permitted for issue `number`.
    #[must_use]
    pub fn contains(&self, number: IssueNumber, value: &Value) -> bool {
        self.issue(number).is_some_and(|issue| issue.contains(value))
    }

    /// Number of distinct complete bids, saturating at `u128::MAX`.
    #[must_use]
    pub fn agreement_space_size(&self) -> u128 {
        self.issues
            .iter()
            .fold(1u128, |acc, issue| acc.saturating_mul(issue.values.len() as u128))
    }
}

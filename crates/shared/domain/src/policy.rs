//! Password policies applied at registration.

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{DomainError, DomainResult};
use crate::password::PlainPassword;

/// A named predicate over a raw password.
///
/// Implementations are pure and stateless.
pub trait PasswordPolicy: Send + Sync + Debug {
    /// Stable identifier, used in logs
    fn name(&self) -> &'static str;

    /// Human-readable requirement, e.g. "longer than 8 characters"
    fn requirement(&self) -> String;

    /// True if the password satisfies this policy
    fn check(&self, password: &str) -> bool;
}

/// Character count strictly greater than the given bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongerThan(pub usize);

impl PasswordPolicy for LongerThan {
    fn name(&self) -> &'static str {
        "longer_than"
    }

    fn requirement(&self) -> String {
        format!("longer than {} characters", self.0)
    }

    fn check(&self, password: &str) -> bool {
        password.chars().count() > self.0
    }
}

/// At least one ASCII decimal digit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainsDigit;

impl PasswordPolicy for ContainsDigit {
    fn name(&self) -> &'static str {
        "contains_digit"
    }

    fn requirement(&self) -> String {
        "at least one digit".to_string()
    }

    fn check(&self, password: &str) -> bool {
        password.chars().any(|c| c.is_ascii_digit())
    }
}

/// Ordered set of policies; a password is accepted only if all pass.
#[derive(Debug, Clone, Default)]
pub struct PasswordPolicySet {
    policies: Vec<Arc<dyn PasswordPolicy>>,
}

impl PasswordPolicySet {
    /// Empty set (accepts every password)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a policy, builder style
    pub fn with(mut self, policy: impl PasswordPolicy + 'static) -> Self {
        self.policies.push(Arc::new(policy));
        self
    }

    /// Policy names in evaluation order
    pub fn names(&self) -> Vec<&'static str> {
        self.policies.iter().map(|policy| policy.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Run every policy in order; the first failure is reported.
    pub fn validate(&self, password: &PlainPassword) -> DomainResult<()> {
        match self
            .policies
            .iter()
            .find(|policy| !policy.check(password.expose()))
        {
            Some(failed) => Err(DomainError::invalid_password(failed.requirement())),
            None => Ok(()),
        }
    }
}

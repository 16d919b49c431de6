mod builder;
pub use builder::AclBuilder;

use crate::{IdentityMatcher, Matcher};

/// Ordered access-control list over SPIFFE identities.
///
/// Statements are checked in the order they were declared, and the first
/// pattern that matches the identity decides. If nothing matches, the
/// default `Decision` is returned.
#[derive(Debug, Clone)]
pub struct Acl {
    default_decision: Decision,
    rules: Vec<Rule>,
}

impl Acl {
    /// Evaluates the identity URI and produces the `Decision`.
    pub fn evaluate(&self, identity: &str) -> Decision {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(identity))
            .map_or(self.default_decision, |rule| rule.effect.into())
    }

    pub fn is_allowed(&self, identity: &str) -> bool {
        self.evaluate(identity) == Decision::Allowed
    }

    pub fn default_decision(&self) -> Decision {
        self.default_decision
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compiled patterns, in evaluation order.
    pub fn matchers(&self) -> impl Iterator<Item = &Matcher> {
        self.rules.iter().map(|rule| &rule.matcher)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Rule {
    matcher: Matcher,
    effect: Effect,
}

impl Rule {
    pub(crate) fn new(matcher: Matcher, effect: Effect) -> Self {
        Self { matcher, effect }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

impl From<Effect> for Decision {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Allow => Decision::Allowed,
            Effect::Deny => Decision::Denied,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

use serde::Deserialize;
use tracing::debug;

use crate::{
    acl::{Effect as CoreEffect, Rule},
    compile_with_separator, Acl, Decision, Result, DEFAULT_SEPARATOR,
};

/// Builds an `Acl` from a JSON definition and/or patterns added in code.
///
/// JSON statements come first, in document order, followed by patterns
/// added with `allow` and `deny`.
///
/// ```
/// use spiffe_wildcard::{AclBuilder, Decision};
///
/// let json = r#"{
///     "schemaVersion": "2020-10-30",
///     "statements": [
///         {
///             "effect": "allow",
///             "identities": ["spiffe://example.org/ns/*/sa/web"]
///         }
///     ]
/// }"#;
///
/// let acl = AclBuilder::from_json(json).build().unwrap();
/// assert_eq!(Decision::Allowed, acl.evaluate("spiffe://example.org/ns/prod/sa/web"));
/// assert_eq!(Decision::Denied, acl.evaluate("spiffe://example.org/ns/prod/sa/db"));
/// ```
#[derive(Debug, Clone)]
pub struct AclBuilder {
    json: Option<String>,
    patterns: Vec<(String, CoreEffect)>,
    separator: char,
    default_decision: Decision,
}

impl Default for AclBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AclBuilder {
    pub fn new() -> Self {
        Self {
            json: None,
            patterns: Vec::new(),
            separator: DEFAULT_SEPARATOR,
            default_decision: Decision::Denied,
        }
    }

    pub fn from_json(json: &str) -> Self {
        Self {
            json: Some(json.into()),
            ..Self::new()
        }
    }

    pub fn allow(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push((pattern.into(), CoreEffect::Allow));
        self
    }

    pub fn deny(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push((pattern.into(), CoreEffect::Deny));
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_default_decision(mut self, decision: Decision) -> Self {
        self.default_decision = decision;
        self
    }

    /// Compiles every pattern. Fails on the first invalid one.
    pub fn build(self) -> Result<Acl> {
        let separator = self.separator;
        let mut patterns: Vec<(String, CoreEffect)> = Vec::new();

        if let Some(json) = &self.json {
            let definition: AclDefinition20201030 = serde_json::from_str(json)?;
            debug!(
                schema_version = %definition.schema_version,
                statements = definition.statements.len(),
                "loaded acl definition"
            );

            for statement in definition.statements {
                let effect = CoreEffect::from(statement.effect);
                patterns.extend(
                    statement
                        .identities
                        .into_iter()
                        .map(|identity| (identity, effect)),
                );
            }
        }
        patterns.extend(self.patterns);

        let rules = patterns
            .into_iter()
            .map(|(pattern, effect)| {
                compile_with_separator(&pattern, separator).map(|matcher| Rule::new(matcher, effect))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(rules = rules.len(), "built acl");

        Ok(Acl {
            default_decision: self.default_decision,
            rules,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AclDefinition20201030 {
    #[serde(default)]
    schema_version: String,
    statements: Vec<Statement20201030>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statement20201030 {
    #[serde(default)]
    #[allow(dead_code)]
    description: String,
    effect: Effect20201030,
    identities: Vec<String>,
}

#[derive(Deserialize, Copy, Clone)]
#[serde(rename_all = "camelCase")]
enum Effect20201030 {
    Allow,
    Deny,
}

impl From<Effect20201030> for CoreEffect {
    fn from(effect: Effect20201030) -> Self {
        match effect {
            Effect20201030::Allow => CoreEffect::Allow,
            Effect20201030::Deny => CoreEffect::Deny,
        }
    }
}

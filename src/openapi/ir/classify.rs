//! Module classification by schema name.
//!
//! Each definition lands in a topic module chosen by an ordered table of
//! substring/prefix rules tested against the lower-cased definition name. The
//! first matching rule wins; names matching nothing go to the fallback module.
//!
//! Rule order is part of the output contract. Moving a rule changes which
//! module existing types are generated into.

use serde::Deserialize;

/// Module for names no rule matches.
pub const DEFAULT_MODULE: &str = "common";

/// How a rule's pattern is tested against the lower-cased name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Pattern occurs anywhere in the name.
    #[default]
    Contains,
    /// Name starts with the pattern.
    Prefix,
}

/// One `(pattern, module)` entry of the classifier table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifierRule {
    /// Text to look for. Compared case-insensitively.
    pub pattern: String,
    /// Module tag assigned on a match.
    pub module: String,
    /// `match = "prefix"` in configuration; substring when omitted.
    #[serde(default, rename = "match")]
    pub kind: MatchKind,
}

impl ClassifierRule {
    /// Rule matching names that contain `pattern`.
    pub fn contains(pattern: &str, module: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            module: module.to_string(),
            kind: MatchKind::Contains,
        }
    }

    /// Rule matching names that start with `pattern`.
    pub fn prefix(pattern: &str, module: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            module: module.to_string(),
            kind: MatchKind::Prefix,
        }
    }

    /// Test against an already lower-cased name.
    fn matches(&self, lower: &str) -> bool {
        match self.kind {
            MatchKind::Contains => lower.contains(&self.pattern),
            MatchKind::Prefix => lower.starts_with(&self.pattern),
        }
    }
}

/// The frozen default table, in priority order.
const DEFAULT_RULES: &[(MatchKind, &str, &str)] = &[
    (MatchKind::Prefix, "application__invoice__", "invoice"),
    (MatchKind::Prefix, "application__sbp__", "sbp"),
    (MatchKind::Prefix, "application__open_banking__", "account"),
    (MatchKind::Contains, "acquiring", "acquiring"),
    (MatchKind::Contains, "cashbox", "cashbox"),
    (MatchKind::Contains, "qr", "qr"),
    (MatchKind::Contains, "sbp", "sbp"),
    (MatchKind::Contains, "merchant", "merchant"),
    (MatchKind::Contains, "invoice", "invoice"),
    (MatchKind::Contains, "payment", "payment"),
    (MatchKind::Contains, "statement", "statement"),
    (MatchKind::Contains, "account", "account"),
    (MatchKind::Contains, "balance", "balance"),
    (MatchKind::Contains, "consent", "consent"),
    (MatchKind::Contains, "customer", "customer"),
    (MatchKind::Contains, "webhook", "webhook"),
    (MatchKind::Contains, "card", "card"),
    (MatchKind::Contains, "receipt", "receipt"),
    (MatchKind::Contains, "contractor", "contractor"),
    (MatchKind::Contains, "tax", "tax"),
    (MatchKind::Contains, "document", "document"),
    (MatchKind::Contains, "shipment", "document"),
    (MatchKind::Contains, "packing", "document"),
    (MatchKind::Contains, "legal", "legal"),
    (MatchKind::Contains, "external", "external"),
    (MatchKind::Contains, "order", "order"),
    (MatchKind::Contains, "content", "content"),
    (MatchKind::Contains, "closing", "closing"),
    (MatchKind::Contains, "error", "errors"),
];

/// The default rule table as owned values.
pub fn default_rules() -> Vec<ClassifierRule> {
    DEFAULT_RULES
        .iter()
        .map(|(kind, pattern, module)| ClassifierRule {
            pattern: (*pattern).to_string(),
            module: (*module).to_string(),
            kind: *kind,
        })
        .collect()
}

/// Ordered rule table plus fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleClassifier {
    rules: Vec<ClassifierRule>,
    fallback: String,
}

impl Default for ModuleClassifier {
    fn default() -> Self {
        Self::new(default_rules(), DEFAULT_MODULE)
    }
}

impl ModuleClassifier {
    /// Build a classifier. Patterns are lower-cased here so matching stays
    /// case-insensitive whatever the configuration says.
    pub fn new(rules: Vec<ClassifierRule>, fallback: &str) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| ClassifierRule {
                pattern: rule.pattern.to_lowercase(),
                ..rule
            })
            .collect();
        Self {
            rules,
            fallback: fallback.to_string(),
        }
    }

    /// Rules in priority order, patterns lower-cased.
    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }

    /// Tag returned when no rule matches.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Module tag for a definition name.
    pub fn classify(&self, name: &str) -> &str {
        let lower = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map_or(self.fallback.as_str(), |rule| rule.module.as_str())
    }
}

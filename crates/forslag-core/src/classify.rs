//! Rule-table classification of committee decision texts.
//!
//! A decision text is a free-form sentence such as
//! "Innstilling: avvist til fordel for F12 (3-2-1)". The classifier walks an
//! ordered table of marker rules and returns the status of the first rule
//! whose markers are all present. Order matters: "Ikke vedtatt" contains the
//! adoption marker but is not an adoption.

use std::sync::LazyLock;

use tracing::debug;

use crate::alternative::{DEFAULT_MARKER, extract_alternative};
use crate::config::{ClassifierConfig, ConfigError, RuleConfig};
use crate::status::StatusCode;
use crate::votes::{VoteTally, extract_votes};

/// A single row of the rule table.
///
/// `groups` are ANDed; the markers within a group are ORed. Matching is
/// case-sensitive substring search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRule {
    pub status: StatusCode,
    pub groups: Vec<Vec<String>>,
}

impl MarkerRule {
    pub fn new(status: StatusCode, groups: &[&[&str]]) -> Self {
        Self {
            status,
            groups: groups
                .iter()
                .map(|g| g.iter().map(|m| m.to_string()).collect())
                .collect(),
        }
    }

    /// The first marker of each group found in `text`, or `None` if any group
    /// has no match.
    fn matches<'r>(&'r self, text: &str) -> Option<Vec<&'r str>> {
        self.groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .find(|m| text.contains(m.as_str()))
                    .map(String::as_str)
            })
            .collect()
    }
}

/// The built-in rule table.
pub fn default_rules() -> Vec<MarkerRule> {
    const REJECTED: &[&str] = &["avvist", "avist"];
    vec![
        MarkerRule::new(StatusCode::NotAddressed, &[&["Ikke", "realitetsbehandlet"]]),
        MarkerRule::new(StatusCode::Adopted, &[&["vedtatt"]]),
        MarkerRule::new(StatusCode::RejectedInFavorOf, &[REJECTED, &[" til ", " fordel "]]),
        MarkerRule::new(StatusCode::Rejected, &[REJECTED]),
        MarkerRule::new(StatusCode::Preserved, &[&["Ivaretatt", "ivaretatt"]]),
    ]
}

/// How a classification was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Matched the rule at this index of the table.
    Rule(usize),
    /// Text present but no rule matched.
    Fallback,
    /// Empty or whitespace-only text.
    Blank,
}

/// Result of classifying one decision text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub status: StatusCode,
    pub origin: Origin,
    /// Markers that satisfied the rule, one per group.
    pub markers: Vec<&'a str>,
    /// The trimmed text, for vote and alternative extraction.
    pub text: &'a str,
}

/// Fully decoded decision: status, tally, and winning alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub status: StatusCode,
    pub origin: Origin,
    pub votes: VoteTally,
    pub alternative: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<MarkerRule>,
    fallback: StatusCode,
    alternative_marker: char,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            fallback: StatusCode::NoProposal,
            alternative_marker: DEFAULT_MARKER,
        }
    }
}

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// Classify with the built-in rule table.
pub fn classify(text: &str) -> Classification<'_> {
    DEFAULT_CLASSIFIER.classify(text)
}

/// Decode a decision text with the built-in rule table.
pub fn decide(text: &str) -> Decision {
    DEFAULT_CLASSIFIER.decide(text)
}

impl Classifier {
    pub fn new(rules: Vec<MarkerRule>, alternative_marker: char) -> Self {
        Self {
            rules,
            fallback: StatusCode::NoProposal,
            alternative_marker,
        }
    }

    /// Build from the `[classifier]` config section.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ConfigError> {
        let rules = match &config.rules {
            None => default_rules(),
            Some(rules) => rules
                .iter()
                .enumerate()
                .map(|(i, rule)| rule_from_config(i, rule))
                .collect::<Result<_, _>>()?,
        };
        Ok(Self::new(rules, config.alternative_marker))
    }

    pub fn rules(&self) -> &[MarkerRule] {
        &self.rules
    }

    pub fn alternative_marker(&self) -> char {
        self.alternative_marker
    }

    /// Classify a decision text. Total: every input yields a status.
    pub fn classify<'a>(&'a self, text: &'a str) -> Classification<'a> {
        let text = text.trim();
        if text.is_empty() {
            return Classification {
                status: self.fallback,
                origin: Origin::Blank,
                markers: Vec::new(),
                text,
            };
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(markers) = rule.matches(text) {
                return Classification {
                    status: rule.status,
                    origin: Origin::Rule(index),
                    markers,
                    text,
                };
            }
        }

        Classification {
            status: self.fallback,
            origin: Origin::Fallback,
            markers: Vec::new(),
            text,
        }
    }

    /// Classify, then extract the tally and alternative the status calls for.
    pub fn decide(&self, text: &str) -> Decision {
        let c = self.classify(text);

        let votes = if c.status.carries_votes() {
            extract_votes(c.text)
        } else {
            VoteTally::default()
        };

        let alternative = if c.status == StatusCode::RejectedInFavorOf {
            extract_alternative(c.text, self.alternative_marker).map(str::to_string)
        } else {
            None
        };

        debug!(
            status = c.status.as_code(),
            origin = ?c.origin,
            markers = ?c.markers,
            "classified decision text"
        );

        Decision {
            status: c.status,
            origin: c.origin,
            votes,
            alternative,
        }
    }
}

fn rule_from_config(index: usize, rule: &RuleConfig) -> Result<MarkerRule, ConfigError> {
    rule.check(index)?;
    Ok(MarkerRule {
        status: rule.status,
        groups: rule.markers.clone(),
    })
}

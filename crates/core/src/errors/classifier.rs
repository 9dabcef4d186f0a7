//! Failure classification
//!
//! Maps a failure and the context label it was raised under onto a recovery
//! [`Strategy`]. Rules are kept in a single ordered list and evaluated top to
//! bottom; the first match wins. A rule matches either on the explicit
//! [`FailureKind`] tag or on case-sensitive substrings of the message and
//! context, so untagged failures from panics and third-party code still land
//! on the right strategy.

use std::fmt;

use hoursguard_domain::constants::message_keys;
use hoursguard_domain::{Failure, FailureKind};
use serde::Serialize;

/// Substitute routine run in place of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackAction {
    /// Swap persistent storage for an in-memory key/value store
    InMemoryStorage,
    /// Back up the corrupted record set, then reset it to empty
    ResetCorruptedRecords,
    /// Resolve to a zero duration
    ZeroDuration,
}

/// What to do about a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Strategy {
    /// Re-run the operation; the caller supplies it
    Retry { max_attempts: u32 },
    Fallback { action: FallbackAction },
    /// Show the localized message for `message_key`
    Notify { message_key: &'static str },
    Silent,
}

impl Strategy {
    pub const fn fallback(action: FallbackAction) -> Self {
        Self::Fallback { action }
    }

    pub const fn notify(message_key: &'static str) -> Self {
        Self::Notify { message_key }
    }
}

type Predicate = Box<dyn Fn(&Failure, &str) -> bool + Send + Sync>;

struct Rule {
    name: &'static str,
    matches: Predicate,
    strategy: Strategy,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).field("strategy", &self.strategy).finish()
    }
}

/// Ordered rule list with a catch-all default
#[derive(Debug)]
pub struct ErrorClassifier {
    rules: Vec<Rule>,
    default: Strategy,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorClassifier {
    /// Classifier with the built-in rules:
    ///
    /// 1. storage context, `localStorage` in the message, or a storage tag →
    ///    in-memory storage fallback
    /// 2. `fetch`/`network` in the message or a network tag → network notice
    /// 3. `JSON`/`parse` in the message or a parse tag → reset corrupted
    ///    records
    /// 4. `time`/`duration` context or a computation tag → zero duration
    /// 5. anything else → generic "operation failed" notice
    pub fn new() -> Self {
        let mut classifier = Self {
            rules: Vec::new(),
            default: Strategy::notify(message_keys::OPERATION_FAILED),
        };

        classifier.push_rule(
            "storage",
            |failure, context| {
                failure.is(FailureKind::StorageFailure)
                    || context.contains("storage")
                    || failure.message.contains("localStorage")
            },
            Strategy::fallback(FallbackAction::InMemoryStorage),
        );
        classifier.push_rule(
            "network",
            |failure, _| {
                failure.is(FailureKind::NetworkFailure)
                    || failure.message.contains("fetch")
                    || failure.message.contains("network")
            },
            Strategy::notify(message_keys::NETWORK_ERROR),
        );
        classifier.push_rule(
            "parse",
            |failure, _| {
                failure.is(FailureKind::ParseFailure)
                    || failure.message.contains("JSON")
                    || failure.message.contains("parse")
            },
            Strategy::fallback(FallbackAction::ResetCorruptedRecords),
        );
        classifier.push_rule(
            "duration",
            |failure, context| {
                failure.is(FailureKind::DomainComputationFailure)
                    || context.contains("time")
                    || context.contains("duration")
            },
            Strategy::fallback(FallbackAction::ZeroDuration),
        );

        classifier
    }

    /// Append a rule after the existing ones, ahead of the default
    pub fn push_rule<F>(&mut self, name: &'static str, matches: F, strategy: Strategy)
    where
        F: Fn(&Failure, &str) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule { name, matches: Box::new(matches), strategy });
    }

    /// Pick the strategy for `failure` raised under `context`
    pub fn classify(&self, failure: &Failure, context: &str) -> Strategy {
        self.matching_rule(failure, context).map_or(self.default, |rule| rule.strategy)
    }

    /// Name of the first rule that matches, `None` when the default applies
    pub fn rule_name(&self, failure: &Failure, context: &str) -> Option<&'static str> {
        self.matching_rule(failure, context).map(|rule| rule.name)
    }

    fn matching_rule(&self, failure: &Failure, context: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| (rule.matches)(failure, context))
    }
}

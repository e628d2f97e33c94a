//! Command matching logic.
//!
//! # Responsibilities
//! - Match the invoked command name (exact, case-sensitive)
//! - Match the free text against a regular expression and extract named groups
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Matchers are pure: same command, same answer
//! - Text patterns search anywhere in the text; anchor them to match the whole
//! - Unnamed or non-participating groups never show up in the parameters

use regex::Regex;

use crate::command::Command;
use crate::routing::context::Params;

/// Trait for matching commands against conditions.
///
/// Returns the extracted parameters on a match, `None` otherwise. Any
/// `Fn(&Command) -> Option<Params>` closure is a matcher.
pub trait Matcher: Send + Sync {
    fn matches(&self, command: &Command) -> Option<Params>;
}

impl<F> Matcher for F
where
    F: Fn(&Command) -> Option<Params> + Send + Sync,
{
    fn matches(&self, command: &Command) -> Option<Params> {
        self(command)
    }
}

/// Matches the invoked command name exactly.
#[derive(Debug, Clone)]
pub struct CommandMatcher {
    name: String,
}

impl CommandMatcher {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Matcher for CommandMatcher {
    fn matches(&self, command: &Command) -> Option<Params> {
        (command.command == self.name).then(Params::new)
    }
}

/// Matches the command text against a regular expression.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    pattern: Regex,
}

impl TextMatcher {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Compile `pattern` and wrap it.
    pub fn parse(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::new)
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl Matcher for TextMatcher {
    fn matches(&self, command: &Command) -> Option<Params> {
        let captures = self.pattern.captures(&command.text)?;

        let params = self
            .pattern
            .capture_names()
            .flatten()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();

        Some(params)
    }
}

/// Combines multiple matchers with AND semantics.
///
/// Parameters from all matchers are merged; later matchers win on duplicate
/// names. An empty `AndMatcher` matches everything.
#[derive(Default)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Add another condition.
    pub fn push(&mut self, matcher: impl Matcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, command: &Command) -> Option<Params> {
        let mut params = Params::new();
        for matcher in &self.matchers {
            params.extend(matcher.matches(command)?);
        }
        Some(params)
    }
}

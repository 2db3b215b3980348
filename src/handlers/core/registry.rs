//! Pattern rule table and dispatch lookup.
//!
//! The `Registry` is an ordered list of rules, each a compiled pattern bound
//! to a handler factory. It is built once at startup and only read after
//! that. Lookup scans in registration order and the first rule whose pattern
//! matches the whole line wins; later rules are never consulted for it.

use super::response::Response;
use crate::protocol;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// Synchronous half of dispatch: match in, response out. No I/O.
pub type HandlerFactory = Arc<dyn Fn(&LineMatch) -> Response + Send + Sync>;

/// A successful pattern match against one incoming line.
#[derive(Debug, Clone)]
pub struct LineMatch {
    text: String,
    groups: Vec<Option<String>>,
    named: HashMap<String, String>,
}

impl LineMatch {
    fn from_captures(pattern: &Regex, caps: &regex::Captures<'_>) -> Self {
        let groups = caps
            .iter()
            .map(|g| g.map(|m| m.as_str().to_string()))
            .collect();
        let named = pattern
            .capture_names()
            .flatten()
            .filter_map(|name| {
                caps.name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect();
        Self {
            text: caps
                .get(0)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            groups,
            named,
        }
    }

    /// The full matched line, terminator included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Positional capture group; `0` is the whole match.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.groups.get(index)?.as_deref()
    }

    /// Named capture group.
    pub fn name(&self, name: &str) -> Option<&str> {
        self.named.get(name).map(String::as_str)
    }

    /// All named captures that participated in the match.
    pub fn named(&self) -> &HashMap<String, String> {
        &self.named
    }
}

/// One compiled pattern bound to its handler factory.
pub struct Rule {
    pattern: Regex,
    factory: HandlerFactory,
}

impl Rule {
    /// Run the factory on a match produced by this rule.
    pub fn build(&self, m: &LineMatch) -> Response {
        (self.factory)(m)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Ordered table of rules.
#[derive(Debug, Default)]
pub struct Registry {
    rules: Vec<Rule>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule for `pattern`.
    ///
    /// The pattern is anchored at the start of the line and must be followed
    /// by the `\r\n` terminator at the very end, so it always covers the
    /// whole line.
    pub fn register<F>(&mut self, pattern: &str, factory: F) -> Result<&mut Self, regex::Error>
    where
        F: Fn(&LineMatch) -> Response + Send + Sync + 'static,
    {
        self.register_all([pattern], factory)
    }

    /// Append one rule per pattern, all sharing one factory.
    pub fn register_all<I, F>(&mut self, patterns: I, factory: F) -> Result<&mut Self, regex::Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        F: Fn(&LineMatch) -> Response + Send + Sync + 'static,
    {
        let factory: HandlerFactory = Arc::new(factory);
        // Compile everything first so a bad pattern leaves the table untouched.
        let compiled = patterns
            .into_iter()
            .map(|p| Regex::new(&format!("^(?:{}){}$", p.as_ref(), protocol::CRLF)))
            .collect::<Result<Vec<_>, _>>()?;
        for pattern in compiled {
            self.rules.push(Rule {
                pattern,
                factory: Arc::clone(&factory),
            });
        }
        Ok(self)
    }

    /// Append one rule per prefix for chat messages whose body starts with
    /// that literal text.
    ///
    /// Matches expose the `user`, `channel` and `msg` named captures.
    pub fn register_message<I, F>(
        &mut self,
        prefixes: I,
        factory: F,
    ) -> Result<&mut Self, regex::Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        F: Fn(&LineMatch) -> Response + Send + Sync + 'static,
    {
        let patterns: Vec<String> = prefixes
            .into_iter()
            .map(|p| protocol::chat_pattern(p.as_ref()))
            .collect();
        self.register_all(patterns, factory)
    }

    /// Find the first rule matching `line`.
    ///
    /// Returns the rule's position in registration order with the match.
    pub fn lookup(&self, line: &str) -> Option<(usize, &Rule, LineMatch)> {
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            rule.pattern
                .captures(line)
                .map(|caps| (index, rule, LineMatch::from_captures(&rule.pattern, &caps)))
        })
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

//! Module with the rule types.
//!
//! A rule pairs a condition, a pure predicate over the character under the cursor, with a
//! consumer that tries to recognize a token starting at that character. Rules are tried in
//! registration order and the first one that commits wins. There is no longest-match: register
//! more specific rules before more general ones.

use crate::{internal::Growable, Cursor, Result, ScanContext};

/// The outcome of a consumer.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Attempt<K> {
    /// The consumed characters form a token of the given kind.
    Token(K),
    /// The consumed characters are committed without emitting a token, e.g. whitespace.
    Skip,
    /// No match. Anything the cursor consumed is discarded and the next rule is tried.
    Decline,
}

/// The identifier of a rule, its 1-based position in registration order.
/// Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(usize);

impl RuleId {
    /// Get the id as usize.
    #[inline]
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Condition = Box<dyn Fn(char) -> bool + 'static>;
type Consumer<K> = Box<dyn Fn(&mut Cursor<'_>, char) -> Attempt<K> + 'static>;

/// A registered rule.
pub struct Rule<K> {
    id: RuleId,
    name: String,
    condition: Condition,
    consumer: Consumer<K>,
}

impl<K> Rule<K> {
    /// Get the id of the rule.
    #[inline]
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// Get the name of the rule.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the rule is eligible for the given character.
    #[inline]
    pub fn accepts(&self, c: char) -> bool {
        (self.condition)(c)
    }

    #[inline]
    pub(crate) fn consume(&self, cursor: &mut Cursor<'_>, c: char) -> Attempt<K> {
        (self.consumer)(cursor, c)
    }
}

impl<K> std::fmt::Debug for Rule<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The ordered table of registered rules.
/// Registration order is match-priority order.
#[derive(Debug)]
pub struct RuleTable<K> {
    rules: Growable<Rule<K>>,
}

impl<K> RuleTable<K> {
    /// Creates an empty rule table.
    pub fn new() -> Self {
        Self {
            rules: Growable::new(),
        }
    }

    /// Appends a rule and returns its id.
    /// Fails only if the table cannot grow.
    pub fn register<C, F>(&mut self, name: &str, condition: C, consumer: F) -> Result<RuleId>
    where
        C: Fn(char) -> bool + 'static,
        F: Fn(&mut Cursor<'_>, char) -> Attempt<K> + 'static,
    {
        let id = RuleId(self.rules.len() + 1);
        self.rules.push(Rule {
            id,
            name: name.to_string(),
            condition: Box::new(condition),
            consumer: Box::new(consumer),
        })?;
        Ok(id)
    }

    /// Get the number of rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get the rule with the given id.
    pub fn get(&self, id: RuleId) -> Option<&Rule<K>> {
        id.0.checked_sub(1)
            .and_then(|index| self.rules.as_slice().get(index))
    }

    /// Returns an iterator over the rules in priority order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Rule<K>> {
        self.rules.iter()
    }

    /// Removes all rules and frees the storage.
    pub(crate) fn release(&mut self) {
        self.rules.release();
    }
}

impl<K> Default for RuleTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A set of rules that registers itself with a scan context.
///
/// Implement this trait to bundle the rules of a language so that drivers can set up a context
/// with one call.
pub trait RuleSet<K> {
    /// Registers the rules of the set, in priority order.
    fn register(&self, context: &mut ScanContext<K>) -> Result<()>;
}

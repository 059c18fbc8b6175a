//! # C rule set
//! A rule set that splits C source code into tokens. It shows how a language is described on top
//! of the engine: conditions pick the candidate rules for a character, consumers recognize the
//! token and decline when the input disproves it.
//!
//! The rules are registered in this order, which is also their priority:
//! 1. String literals
//! 2. Comments (skipped unless [`CRuleConfig::emit_comments`] is set)
//! 3. Numbers
//! 4. Identifiers, reclassified as keywords
//! 5. Single character tokens
//! 6. Whitespace (skipped)
//!
//! A `"` that does not start a terminated string falls through to the single character token
//! rule, and so does a `/` that does not start a comment.
//!
//! # Example
//! ```rust
//! use toka::{c_rules::{CRules, CTokenKind}, ScanContext};
//!
//! let mut context = ScanContext::new();
//! context.register_set(&CRules::default()).unwrap();
//! context.scan_str("int x = 42; // answer").unwrap();
//! for token in context.tokens() {
//!     println!("{}", token);
//! }
//! assert_eq!(context.tokens().len(), 5);
//! assert!(context.tokens()[0].kind().is_keyword());
//! assert_eq!(context.tokens()[3].kind(), &CTokenKind::Integer);
//! ```

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Result, RuleSet, ScanContext};

/// Module with the rule conditions.
pub mod conditions;
use conditions::{
    is_comment_start, is_identifier_start, is_numeric, is_string_start, is_whitespace,
};

/// Module with the configuration type.
mod config;
pub use config::{CRuleConfig, PunctuationToken};

/// Module with the rule consumers.
pub mod consumers;
use consumers::{
    consume_comment, consume_identifier, consume_number, consume_punctuation, consume_string,
    consume_whitespace,
};

/// Module with the token kind type.
mod kind;
pub use kind::CTokenKind;

// The lookup tables built from a configuration.
#[derive(Debug)]
pub(crate) struct Tables {
    pub(crate) punctuation: FxHashMap<char, String>,
    pub(crate) keywords: FxHashSet<String>,
    pub(crate) emit_comments: bool,
}

impl From<&CRuleConfig> for Tables {
    fn from(config: &CRuleConfig) -> Self {
        Self {
            punctuation: config
                .punctuation
                .iter()
                .map(|p| (p.ch, p.name.clone()))
                .collect(),
            keywords: config.keywords.iter().cloned().collect(),
            emit_comments: config.emit_comments,
        }
    }
}

/// The C rule set.
///
/// The lookup tables are shared by the registered rules, so the rule set can be registered with
/// several contexts.
#[derive(Debug, Clone)]
pub struct CRules {
    tables: Arc<Tables>,
}

impl CRules {
    /// Creates the rule set from a validated configuration.
    pub fn new(config: &CRuleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tables: Arc::new(Tables::from(config)),
        })
    }

    /// Check if the given text is a keyword.
    pub fn is_keyword(&self, text: &str) -> bool {
        self.tables.keywords.contains(text)
    }

    /// Get the kind name of a single character token.
    pub fn punctuation_name(&self, c: char) -> Option<&str> {
        self.tables.punctuation.get(&c).map(String::as_str)
    }
}

impl Default for CRules {
    fn default() -> Self {
        Self {
            tables: Arc::new(Tables::from(&CRuleConfig::default())),
        }
    }
}

impl RuleSet<CTokenKind> for CRules {
    fn register(&self, context: &mut ScanContext<CTokenKind>) -> Result<()> {
        context.register("String", is_string_start, consume_string)?;

        let emit_comments = self.tables.emit_comments;
        context.register("Comment", is_comment_start, move |cursor, c| {
            consume_comment(cursor, c, emit_comments)
        })?;

        context.register("Number", is_numeric, consume_number)?;

        let tables = Arc::clone(&self.tables);
        context.register("Identifier", is_identifier_start, move |cursor, c| {
            consume_identifier(cursor, c, &tables)
        })?;

        let condition_tables = Arc::clone(&self.tables);
        let tables = Arc::clone(&self.tables);
        context.register(
            "Single character token",
            move |c| condition_tables.punctuation.contains_key(&c),
            move |cursor, c| consume_punctuation(cursor, c, &tables),
        )?;

        context.register("Whitespace", is_whitespace, consume_whitespace)?;
        Ok(())
    }
}

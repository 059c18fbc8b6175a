#![forbid(missing_docs)]
//! # `toka`
//! The `toka` crate is a rule-driven tokenization engine.
//! A caller registers rules with a scan context, each rule pairing a *condition*, a pure
//! predicate over the character under the cursor, with a *consumer* that tries to recognize a
//! token starting at that character. The engine tries the rules in registration order at the
//! current cursor position until one of them commits, then continues behind the consumed input.
//!
//! Priority is decided by registration order alone: there is no longest-match. If a consumer
//! cannot complete its token it declines and the next eligible rule is tried for the same
//! character. Consumers work on a rewindable [`Cursor`] and report an [`Attempt`], so a declining
//! consumer never leaves the scan context in a changed state.
//!
//! A scan runs over an in-memory string or over a readable byte stream, with the same results.
//!
//! # Example
//! ```rust
//! use toka::{Attempt, ScanContextBuilder};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Kind {
//!     Word,
//!     Less,
//!     LessEqual,
//! }
//!
//! let mut context = ScanContextBuilder::new()
//!     // Registered first, so it is tried first for '<'.
//!     .add_rule("LessEqual", |c| c == '<', |cursor, _| {
//!         if cursor.eat('<') && cursor.eat('=') {
//!             Attempt::Token(Kind::LessEqual)
//!         } else {
//!             Attempt::Decline
//!         }
//!     })
//!     .add_rule("Less", |c| c == '<', |cursor, _| {
//!         cursor.bump();
//!         Attempt::Token(Kind::Less)
//!     })
//!     .add_rule("Word", |c| c.is_ascii_alphabetic(), |cursor, _| {
//!         cursor.eat_while(|c| c.is_ascii_alphabetic());
//!         Attempt::Token(Kind::Word)
//!     })
//!     .add_rule("Space", |c| c.is_ascii_whitespace(), |cursor, _| {
//!         cursor.eat_while(|c| c.is_ascii_whitespace());
//!         Attempt::Skip
//!     })
//!     .build()
//!     .expect("ScanContextBuilder error");
//!
//! context.scan_str("a <= b\nc < d").expect("scan error");
//! for token in context.tokens() {
//!     println!("{:?} '{}' at {}", token.kind(), token.text(), token.position());
//! }
//! let kinds: Vec<Kind> = context.tokens().iter().map(|t| t.kind().clone()).collect();
//! assert_eq!(
//!     kinds,
//!     [Kind::Word, Kind::LessEqual, Kind::Word, Kind::Word, Kind::Less, Kind::Word]
//! );
//! assert_eq!(context.tokens()[3].position().line(), 2);
//! ```
//!
//! # Crate features
//! - `serde`: enabled by default. Serialization of tokens, positions and the C rule set
//!   configuration, and loading that configuration from JSON.
//! - `cli`: enabled by default. Builds the `toka` binary that prints the tokens of C files.

/// Module with the C rule set.
pub mod c_rules;

/// Module that provides the cursor handed to consumers.
mod cursor;
pub use cursor::{Cursor, Mark};

/// Module with error definitions
mod errors;
pub use errors::{Result, TokaError, TokaErrorKind};

/// The module with internal implementation details.
mod internal;

/// Module that provides a position type
mod position;
pub use position::Position;

/// Module with the rule types.
mod rule;
pub use rule::{Attempt, Rule, RuleId, RuleSet, RuleTable};

/// The module with the scan context and the scan loop.
mod scan_context;
pub use scan_context::ScanContext;

/// The module with the scan context builder.
mod scan_context_builder;
pub use scan_context_builder::ScanContextBuilder;

/// Module with the input sources.
mod source;
pub use source::Source;

/// Module that provides a Span type
mod span;
pub use span::Span;

/// Module that provides a Token type
mod token;
pub use token::Token;

/// Module that provides the token store.
mod token_store;
pub use token_store::TokenStore;

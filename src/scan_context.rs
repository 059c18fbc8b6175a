use std::io::Read;

use log::{debug, trace};

use crate::{
    cursor::Mark,
    source::{Haystack, StreamHaystack, TextHaystack},
    Attempt, Cursor, Position, Result, RuleId, RuleSet, RuleTable, Source, Span, Token,
    TokaError, TokaErrorKind, TokenStore,
};

/// The shared state of a scan: cursor location, rule table and token store.
///
/// A scan runs the registered rules over one input. At each location the rules are tried in
/// registration order. The first rule whose condition accepts the character under the cursor gets
/// to run its consumer; if the consumer commits, its token (if any) is appended and the scan
/// continues behind it, otherwise the next rule is tried for the same location. If no rule
/// commits, the scan fails with [`TokaErrorKind::UnrecognizedCharacter`].
///
/// Tokens accumulate across scans until [`ScanContext::reset`] is called.
///
/// # Example
/// ```rust
/// use toka::{Attempt, ScanContext};
///
/// let mut context = ScanContext::new();
/// context
///     .register("Number", |c| c.is_ascii_digit(), |cursor, _| {
///         cursor.eat_while(|c| c.is_ascii_digit());
///         Attempt::Token("NUMBER")
///     })
///     .unwrap();
/// context
///     .register("Space", |c| c == ' ', |cursor, _| {
///         cursor.eat_while(|c| c == ' ');
///         Attempt::Skip
///     })
///     .unwrap();
/// context.scan_str("12 345").unwrap();
/// let texts: Vec<&str> = context.tokens().iter().map(|t| t.text()).collect();
/// assert_eq!(texts, ["12", "345"]);
/// ```
#[derive(Debug)]
pub struct ScanContext<K> {
    // The byte offset of the cursor.
    offset: usize,
    // The line and column of the cursor.
    position: Position,
    rules: RuleTable<K>,
    tokens: TokenStore<K>,
}

impl<K> ScanContext<K> {
    /// Creates a context without rules and tokens.
    pub fn new() -> Self {
        Self {
            offset: 0,
            position: Position::default(),
            rules: RuleTable::new(),
            tokens: TokenStore::new(),
        }
    }

    /// Registers a rule. Rules registered earlier are tried first.
    pub fn register<C, F>(&mut self, name: &str, condition: C, consumer: F) -> Result<RuleId>
    where
        C: Fn(char) -> bool + 'static,
        F: Fn(&mut Cursor<'_>, char) -> Attempt<K> + 'static,
    {
        let id = self.rules.register(name, condition, consumer)?;
        trace!("Registered rule {} '{}'", id, name);
        Ok(id)
    }

    /// Registers all rules of the given rule set.
    pub fn register_set<S>(&mut self, rule_set: &S) -> Result<()>
    where
        S: RuleSet<K> + ?Sized,
    {
        rule_set.register(self)
    }

    /// Get the rule table.
    #[inline]
    pub fn rules(&self) -> &RuleTable<K> {
        &self.rules
    }

    /// Get the tokens emitted so far.
    #[inline]
    pub fn tokens(&self) -> &TokenStore<K> {
        &self.tokens
    }

    /// Consumes the context and returns its tokens.
    pub fn into_tokens(self) -> TokenStore<K> {
        self.tokens
    }

    /// Get the byte offset of the cursor.
    /// After a successful scan this is the length of the input.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the line and column of the cursor.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Scans the given source and appends the emitted tokens.
    pub fn scan(&mut self, source: Source<'_>) -> Result<()> {
        match source {
            Source::Text(text) => self.scan_str(text),
            Source::Reader(reader) => self.scan_reader(reader),
        }
    }

    /// Scans an in-memory input and appends the emitted tokens.
    pub fn scan_str(&mut self, input: &str) -> Result<()> {
        self.run(&mut TextHaystack::new(input))
    }

    /// Scans a byte stream and appends the emitted tokens.
    /// The stream is read lazily; it must contain UTF-8 encoded text.
    pub fn scan_reader<R: Read>(&mut self, reader: R) -> Result<()> {
        self.run(&mut StreamHaystack::new(reader))
    }

    /// Clears the tokens and moves the cursor back to the start.
    /// If `reset_rules` is true the rule table is cleared, too.
    pub fn reset(&mut self, reset_rules: bool) {
        debug!(
            "Reset context: {} tokens dropped, rules {}",
            self.tokens.len(),
            if reset_rules { "dropped" } else { "kept" }
        );
        self.tokens.release();
        if reset_rules {
            self.rules.release();
        }
        self.offset = 0;
        self.position = Position::default();
    }

    /// Clears the tokens but keeps their storage for the next scan.
    pub fn clear_tokens(&mut self) {
        self.tokens.clear();
        self.offset = 0;
        self.position = Position::default();
    }

    fn run(&mut self, haystack: &mut dyn Haystack) -> Result<()> {
        self.offset = 0;
        self.position = Position::default();
        let tokens_before = self.tokens.len();
        debug!("Scan started with {} rules", self.rules.len());

        while let Some(c) = haystack.char_at(self.offset) {
            if !self.try_rules(haystack, c)? {
                debug!("No rule matched {:?} at {}", c, self.position);
                return Err(TokaError::new(TokaErrorKind::UnrecognizedCharacter {
                    ch: c,
                    position: self.position,
                    offset: self.offset,
                }));
            }
            haystack.release(self.offset);
        }
        if let Some(err) = haystack.take_error() {
            return Err(err);
        }

        debug!(
            "Scan finished at offset {}, {} tokens emitted",
            self.offset,
            self.tokens.len() - tokens_before
        );
        Ok(())
    }

    // Tries the rules in order for the character under the cursor. Returns true if a rule
    // committed.
    fn try_rules(&mut self, haystack: &mut dyn Haystack, c: char) -> Result<bool> {
        let start = Mark::new(self.offset, self.position);
        for rule in self.rules.iter() {
            if !rule.accepts(c) {
                continue;
            }
            let mut cursor = Cursor::new(haystack, start);
            let attempt = rule.consume(&mut cursor, c);
            let end = cursor.mark();
            let text = match attempt {
                Attempt::Token(_) if cursor.consumed() > 0 => Some(cursor.lexeme().into_owned()),
                _ => None,
            };
            if let Some(err) = haystack.take_error() {
                return Err(err);
            }

            if end.offset() == start.offset() {
                if !matches!(attempt, Attempt::Decline) {
                    debug!(
                        "Rule {} '{}' reported a match without consuming input at {}",
                        rule.id(),
                        rule.name(),
                        start.position()
                    );
                }
                trace!("Rule {} '{}' declined {:?}", rule.id(), rule.name(), c);
                continue;
            }

            match (attempt, text) {
                (Attempt::Decline, _) => {
                    trace!(
                        "Rule {} '{}' declined {:?} after reading up to offset {}",
                        rule.id(),
                        rule.name(),
                        c,
                        end.offset()
                    );
                    continue;
                }
                (Attempt::Token(kind), Some(text)) => {
                    trace!("Rule {} '{}' emitted {:?}", rule.id(), rule.name(), text);
                    self.tokens.push(Token::new(
                        kind,
                        text,
                        Span::new(start.offset(), end.offset()),
                        start.position(),
                    ))?;
                }
                _ => trace!(
                    "Rule {} '{}' skipped {} bytes",
                    rule.id(),
                    rule.name(),
                    end.offset() - start.offset()
                ),
            }
            self.offset = end.offset();
            self.position = end.position();
            return Ok(true);
        }
        Ok(false)
    }
}

impl<K> Default for ScanContext<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Kind {
        Str,
        Ident,
        Semi,
    }

    fn is_ident(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    // A string rule that declines on an unterminated string, followed by a rule that takes any
    // non-whitespace character as identifier material.
    fn context() -> ScanContext<Kind> {
        let mut context = ScanContext::new();
        context
            .register(
                "String",
                |c| c == '"',
                |cursor, _| {
                    cursor.bump();
                    loop {
                        match cursor.bump() {
                            Some('"') => return Attempt::Token(Kind::Str),
                            Some('\n') | None => return Attempt::Decline,
                            Some(_) => {}
                        }
                    }
                },
            )
            .unwrap();
        context
            .register(
                "Semicolon",
                |c| c == ';',
                |cursor, _| {
                    cursor.bump();
                    Attempt::Token(Kind::Semi)
                },
            )
            .unwrap();
        context
            .register(
                "Identifier",
                |c| !c.is_whitespace(),
                |cursor, _| {
                    cursor.eat_while(|c| is_ident(c) || c == '"');
                    if cursor.consumed() == 0 {
                        cursor.bump();
                    }
                    Attempt::Token(Kind::Ident)
                },
            )
            .unwrap();
        context
            .register(
                "Whitespace",
                char::is_whitespace,
                |cursor, _| {
                    cursor.eat_while(char::is_whitespace);
                    Attempt::Skip
                },
            )
            .unwrap();
        context
    }

    fn summary(context: &ScanContext<Kind>) -> Vec<(Kind, String)> {
        context
            .tokens()
            .iter()
            .map(|t| (t.kind().clone(), t.text().to_string()))
            .collect()
    }

    #[test]
    fn test_declined_string_falls_through() {
        init();
        let mut context = context();
        context.scan_str("\"ab").unwrap();
        assert_eq!(summary(&context), vec![(Kind::Ident, "\"ab".to_string())]);
        assert_eq!(context.offset(), 3);
        assert_eq!(context.position(), Position::new(1, 4));
    }

    #[test]
    fn test_empty_input() {
        init();
        let mut context = context();
        context.scan_str("").unwrap();
        assert!(context.tokens().is_empty());
        assert_eq!(context.offset(), 0);
        assert_eq!(context.position(), Position::default());
    }

    #[test]
    fn test_reset_keeps_rules() {
        init();
        let mut context = context();
        context.scan_str("a;").unwrap();
        assert_eq!(context.tokens().len(), 2);
        context.reset(false);
        assert!(context.tokens().is_empty());
        assert_eq!(context.tokens().capacity(), 0);
        assert_eq!(context.rules().len(), 4);
        context.scan_str("b;").unwrap();
        assert_eq!(
            summary(&context),
            vec![(Kind::Ident, "b".to_string()), (Kind::Semi, ";".to_string())]
        );
        assert_eq!(context.tokens()[0].position(), Position::new(1, 1));

        context.reset(true);
        assert!(context.rules().is_empty());
        let err = context.scan_str("b").unwrap_err();
        assert!(matches!(
            err.kind(),
            TokaErrorKind::UnrecognizedCharacter { ch: 'b', .. }
        ));
    }

    #[test]
    fn test_tokens_accumulate_until_cleared() {
        init();
        let mut context = context();
        context.scan_str("a").unwrap();
        context.scan_str("b").unwrap();
        assert_eq!(
            summary(&context),
            vec![(Kind::Ident, "a".to_string()), (Kind::Ident, "b".to_string())]
        );
        // Every scan starts at the beginning of its input.
        assert_eq!(context.tokens()[1].span(), Span::new(0, 1));
        let capacity = context.tokens().capacity();
        context.clear_tokens();
        assert!(context.tokens().is_empty());
        assert_eq!(context.tokens().capacity(), capacity);
    }

    #[test]
    fn test_first_registered_rule_wins() {
        init();
        let mut context = ScanContext::new();
        context
            .register("First", |c| c == 'x', |cursor, _| {
                cursor.bump();
                Attempt::Token(1)
            })
            .unwrap();
        context
            .register("Second", |c| c == 'x', |cursor, _| {
                cursor.eat_while(|c| c == 'x');
                Attempt::Token(2)
            })
            .unwrap();
        context.scan_str("xx").unwrap();
        let kinds: Vec<i32> = context.tokens().iter().map(|t| *t.kind()).collect();
        assert_eq!(kinds, vec![1, 1]);
    }

    #[test]
    fn test_decline_leaves_no_trace() {
        init();
        let mut context = ScanContext::new();
        // Reads across a newline and then gives up.
        context
            .register("Greedy", |c| c == 'a', |cursor, _| {
                cursor.eat_while(|_| true);
                Attempt::Decline
            })
            .unwrap();
        context
            .register("Any", |_| true, |cursor, _| {
                cursor.bump();
                Attempt::Token(cursor.position().column())
            })
            .unwrap();
        context.scan_str("a\nb").unwrap();
        let tokens: Vec<_> = context
            .tokens()
            .iter()
            .map(|t| (t.text().to_string(), t.position()))
            .collect();
        assert_eq!(
            tokens,
            vec![
                ("a".to_string(), Position::new(1, 1)),
                ("\n".to_string(), Position::new(1, 2)),
                ("b".to_string(), Position::new(2, 1)),
            ]
        );
        assert_eq!(context.position(), Position::new(2, 2));
    }

    #[test]
    fn test_unrecognized_character() {
        init();
        let mut context = context();
        context.reset(true);
        context
            .register("Identifier", is_ident, |cursor, _| {
                cursor.eat_while(is_ident);
                Attempt::Token(Kind::Ident)
            })
            .unwrap();
        context
            .register("Newline", |c| c == '\n', |cursor, _| {
                cursor.bump();
                Attempt::Skip
            })
            .unwrap();
        let err = context.scan_str("ab\nc$d").unwrap_err();
        match err.kind() {
            TokaErrorKind::UnrecognizedCharacter {
                ch,
                position,
                offset,
            } => {
                assert_eq!(*ch, '$');
                assert_eq!(*position, Position::new(2, 2));
                assert_eq!(*offset, 4);
            }
            kind => panic!("unexpected error {kind}"),
        }
        // The tokens before the failure are kept.
        assert_eq!(
            summary(&context),
            vec![(Kind::Ident, "ab".to_string()), (Kind::Ident, "c".to_string())]
        );
        assert_eq!(context.offset(), 4);
    }

    #[test]
    fn test_token_without_input_is_a_decline() {
        init();
        let mut context = ScanContext::new();
        context
            .register("Empty", |_| true, |_, _| Attempt::Token("EMPTY"))
            .unwrap();
        context
            .register("Skip nothing", |_| true, |_, _| Attempt::Skip)
            .unwrap();
        context
            .register("Char", |_| true, |cursor, _| {
                cursor.bump();
                Attempt::Token("CHAR")
            })
            .unwrap();
        context.scan_str("ab").unwrap();
        let kinds: Vec<&str> = context.tokens().iter().map(|t| *t.kind()).collect();
        assert_eq!(kinds, vec!["CHAR", "CHAR"]);
    }

    #[test]
    fn test_scan_is_deterministic() {
        init();
        let input = "one \"two\" ;three\n\"four";
        let mut first = context();
        first.scan_str(input).unwrap();
        let mut second = context();
        second.scan_str(input).unwrap();
        assert_eq!(first.tokens(), second.tokens());
        assert_eq!(
            first.tokens().concat_text(),
            input.split_whitespace().collect::<String>()
        );
    }

    #[test]
    fn test_reader_source_matches_text_source() {
        init();
        let input = "x \"ü\";\n\"y z;";
        let mut text = context();
        text.scan(Source::Text(input)).unwrap();
        let mut stream = context();
        stream
            .scan(Source::Reader(Box::new(input.as_bytes())))
            .unwrap();
        assert_eq!(text.tokens(), stream.tokens());
        assert_eq!(text.position(), stream.position());
        assert_eq!(stream.offset(), input.len());
    }

    #[test]
    fn test_reader_error_fails_the_scan() {
        init();
        let bytes = [b'a', b' ', 0xC3];
        let mut context = context();
        let err = context.scan_reader(&bytes[..]).unwrap_err();
        assert!(matches!(err.kind(), TokaErrorKind::InvalidUtf8(2)));
        assert_eq!(context.tokens().len(), 1);
    }
}

//! Module with the configuration of the C rule set.
//!
//! The configuration holds the single character token table and the keyword list. It is plain
//! data: the rule set copies it into its own lookup tables when it is created, so several rule
//! sets with different tables can be used side by side.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rustc_hash::FxHashSet;

use super::conditions::{is_identifier_continue, is_identifier_start, is_whitespace};
use crate::{Result, TokaError, TokaErrorKind};

/// The single character tokens of the default configuration.
const DEFAULT_PUNCTUATION: &[(char, &str)] = &[
    ('~', "TILDE"),
    ('"', "DBL_QUOTE"),
    ('\'', "SNGL_QUOTE"),
    (';', "SEMICOLON"),
    ('+', "PLUS"),
    ('-', "MINUS"),
    ('/', "FRWRD_SLASH"),
    ('\\', "BACKSLASH"),
    ('*', "ASTERISK"),
    ('=', "EQUALS"),
    ('%', "PERCENT"),
    ('>', "GREATER_THAN"),
    ('<', "LESS_THAN"),
    ('^', "CARET"),
    ('!', "EXCLAMATION"),
    ('(', "L_PAREN"),
    (')', "R_PAREN"),
    ('[', "L_SBRACK"),
    (']', "R_SBRACK"),
    ('.', "PERIOD"),
    (',', "COMMA"),
    ('&', "AMPERSAND"),
    ('#', "HASHTAG"),
    ('{', "L_BRACE"),
    ('}', "R_BRACE"),
    (':', "COLON"),
    ('?', "QUESTION"),
    ('|', "PIPE"),
];

/// The keywords of the default configuration.
const DEFAULT_KEYWORDS: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned", "const",
    "volatile", "static", "extern", "typedef", "if", "else", "switch", "case", "default", "for",
    "do", "while", "break", "continue", "return", "struct", "union", "enum", "sizeof",
];

/// A single character token: the character and the name of its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PunctuationToken {
    /// The character.
    pub ch: char,
    /// The kind name, e.g. `SEMICOLON`.
    pub name: String,
}

impl PunctuationToken {
    /// Create a new single character token.
    pub fn new(ch: char, name: &str) -> Self {
        Self {
            ch,
            name: name.to_string(),
        }
    }
}

/// The configuration of the C rule set.
///
/// Missing fields take their default values when the configuration is deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CRuleConfig {
    /// The single character tokens.
    pub punctuation: Vec<PunctuationToken>,
    /// The identifiers that are reclassified as keywords.
    pub keywords: Vec<String>,
    /// Emit comments as tokens instead of skipping them.
    pub emit_comments: bool,
}

impl Default for CRuleConfig {
    fn default() -> Self {
        Self {
            punctuation: DEFAULT_PUNCTUATION
                .iter()
                .map(|(ch, name)| PunctuationToken::new(*ch, name))
                .collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            emit_comments: false,
        }
    }
}

macro_rules! invalid_config {
    ($($arg:tt)*) => {
        TokaError::new(TokaErrorKind::InvalidConfig(format!($($arg)*)))
    };
}

impl CRuleConfig {
    /// Checks the configuration.
    ///
    /// Single character tokens must be unique and must not be letters, digits, underscores or
    /// whitespace, because the identifier, number and whitespace rules run before them. Keywords
    /// must be identifiers.
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for token in &self.punctuation {
            if !seen.insert(token.ch) {
                return Err(invalid_config!(
                    "duplicate single character token {:?}",
                    token.ch
                ));
            }
            if token.ch.is_alphanumeric() || token.ch == '_' || is_whitespace(token.ch) {
                return Err(invalid_config!(
                    "{:?} cannot be a single character token",
                    token.ch
                ));
            }
            if token.name.is_empty() {
                return Err(invalid_config!(
                    "single character token {:?} has no name",
                    token.ch
                ));
            }
        }
        for keyword in &self.keywords {
            let mut chars = keyword.chars();
            let is_identifier = chars.next().is_some_and(is_identifier_start)
                && chars.all(is_identifier_continue)
                && !keyword.chars().all(|c| c == '_');
            if !is_identifier {
                return Err(invalid_config!("keyword {:?} is not an identifier", keyword));
            }
        }
        Ok(())
    }

    /// Reads and validates a configuration in JSON format.
    #[cfg(feature = "serde")]
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration in JSON format.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CRuleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.keywords.len(), 29);
        assert!(config
            .punctuation
            .iter()
            .any(|p| p.ch == ';' && p.name == "SEMICOLON"));
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = CRuleConfig::default();
        config.punctuation.push(PunctuationToken::new(';', "SEMI"));
        assert!(matches!(
            config.validate().unwrap_err().kind(),
            TokaErrorKind::InvalidConfig(_)
        ));

        let mut config = CRuleConfig::default();
        config.punctuation.push(PunctuationToken::new('x', "EX"));
        assert!(config.validate().is_err());

        let mut config = CRuleConfig::default();
        config.keywords.push("not-a-keyword".to_string());
        assert!(config.validate().is_err());

        let mut config = CRuleConfig::default();
        config.keywords.push(String::new());
        assert!(config.validate().is_err());

        let mut config = CRuleConfig::default();
        config.keywords.push("__".to_string());
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = CRuleConfig::default();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized = CRuleConfig::from_json(&serialized).unwrap();
        assert_eq!(config, deserialized);

        // Missing fields fall back to the defaults.
        let partial = CRuleConfig::from_json(r#"{ "keywords": ["let", "fn"] }"#).unwrap();
        assert_eq!(partial.keywords, vec!["let", "fn"]);
        assert_eq!(partial.punctuation, CRuleConfig::default().punctuation);
        assert!(!partial.emit_comments);

        let err = CRuleConfig::from_json(r#"{ "keywords": 7 }"#).unwrap_err();
        assert!(matches!(err.kind(), TokaErrorKind::ConfigFormat(_)));
    }
}

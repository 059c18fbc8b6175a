use crate::{internal::Growable, Result, Token};

/// The append-only, insertion-ordered sequence of tokens emitted by scans.
///
/// The store grows by doubling its capacity. It is cleared by [`crate::ScanContext::reset`],
/// which also frees the storage, and by [`crate::ScanContext::clear_tokens`], which keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore<K> {
    tokens: Growable<Token<K>>,
}

impl<K> TokenStore<K> {
    /// Creates an empty token store.
    pub fn new() -> Self {
        Self {
            tokens: Growable::new(),
        }
    }

    pub(crate) fn push(&mut self, token: Token<K>) -> Result<()> {
        self.tokens.push(token)
    }

    /// Drops all tokens but keeps the storage.
    pub(crate) fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Drops all tokens and frees the storage.
    pub(crate) fn release(&mut self) {
        self.tokens.release();
    }

    /// Get the number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the number of tokens the store can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.tokens.capacity()
    }

    /// Get the token at the given index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<K>> {
        self.tokens.as_slice().get(index)
    }

    /// Returns an iterator over the tokens in emission order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Token<K>> {
        self.tokens.iter()
    }

    /// Get the tokens as slice.
    #[inline]
    pub fn as_slice(&self) -> &[Token<K>] {
        self.tokens.as_slice()
    }

    /// Concatenates the text of all tokens.
    pub fn concat_text(&self) -> String {
        self.iter().map(Token::text).collect()
    }

    /// Converts the store into a vector of tokens.
    pub fn into_vec(self) -> Vec<Token<K>> {
        self.tokens.into_vec()
    }
}

impl<K> Default for TokenStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::ops::Index<usize> for TokenStore<K> {
    type Output = Token<K>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens.as_slice()[index]
    }
}

impl<'a, K> IntoIterator for &'a TokenStore<K> {
    type Item = &'a Token<K>;
    type IntoIter = std::slice::Iter<'a, Token<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Span};

    fn token(kind: &'static str, text: &str, offset: usize) -> Token<&'static str> {
        Token::new(
            kind,
            text.to_string(),
            Span::new(offset, offset + text.len()),
            Position::new(1, offset + 1),
        )
    }

    #[test]
    fn test_store_keeps_insertion_order() {
        let mut store = TokenStore::new();
        store.push(token("IDENTIFIER", "a", 0)).unwrap();
        store.push(token("PLUS", "+", 1)).unwrap();
        store.push(token("IDENTIFIER", "b", 2)).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.len() <= store.capacity());
        assert_eq!(store[1].kind(), &"PLUS");
        assert_eq!(store.concat_text(), "a+b");
        assert_eq!(
            store.iter().map(Token::column).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(store.get(3).is_none());
    }

    #[test]
    fn test_store_equality() {
        let mut lhs = TokenStore::new();
        let mut rhs = TokenStore::new();
        lhs.push(token("IDENTIFIER", "a", 0)).unwrap();
        rhs.push(token("IDENTIFIER", "b", 0)).unwrap();
        assert_ne!(lhs, rhs);
        rhs.clear();
        rhs.push(token("IDENTIFIER", "a", 0)).unwrap();
        assert_eq!(lhs, rhs);
        lhs.release();
        assert!(lhs.is_empty());
        assert_eq!(lhs.capacity(), 0);
        assert_ne!(lhs, rhs);
    }
}

//! Error types for the trie.
//!
//! This module defines the error types that can occur during trie operations
//! and cursor traversal.

/// Errors that can occur in trie operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    /// The key is the empty sentinel, which a trie never stores.
    #[error("Invalid key: empty keys are not permitted in a trie")]
    InvalidKey,

    /// The trie was structurally modified after the cursor last synchronised with it.
    #[error("Trie was modified since the cursor was created or last removed an entry")]
    ConcurrentModification,

    /// The cursor has no remaining entries.
    #[error("No remaining entries in cursor")]
    NoSuchElement,

    /// Cursor removal without a preceding successful advance.
    #[error("Cursor has no current entry to remove")]
    IllegalState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrieError::InvalidKey;
        assert_eq!(
            err.to_string(),
            "Invalid key: empty keys are not permitted in a trie"
        );

        let err = TrieError::ConcurrentModification;
        assert_eq!(
            err.to_string(),
            "Trie was modified since the cursor was created or last removed an entry"
        );

        let err = TrieError::NoSuchElement;
        assert_eq!(err.to_string(), "No remaining entries in cursor");

        let err = TrieError::IllegalState;
        assert_eq!(err.to_string(), "Cursor has no current entry to remove");
    }
}

//! Completion over a fixed set of literals.

use std::borrow::Cow;

use tracing::{debug, trace, warn};

use super::Completion;
use crate::config::CompletionConfig;
use crate::data_structures::trie::{Trie, TrieResult};

/// Suggests literals from a trie-backed index.
///
/// Literals are indexed under their folded form (lowercased when matching
/// is case-insensitive), each key holding every original spelling that
/// folds to it. Suggestions come back in the order the literals were
/// inserted.
#[derive(Debug, Clone)]
pub struct CachedCompletion {
    /// Folded literal to original spellings, tagged with their insertion sequence
    index: Trie<Vec<(usize, String)>>,

    /// Sequence number of the next inserted literal
    sequence: usize,

    /// Whether keys are stored verbatim
    case_sensitive: bool,

    /// Truncation limit; 0 for unbounded
    max_results: usize,
}

impl CachedCompletion {
    /// Creates a completion over `literals`.
    ///
    /// Empty literals cannot be completed to and are skipped.
    ///
    /// # Arguments
    ///
    /// * `literals` - The literals to suggest.
    /// * `config` - Case handling and truncation settings.
    pub fn new<I, S>(literals: I, config: &CompletionConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut completion = Self {
            index: Trie::new(),
            sequence: 0,
            case_sensitive: config.case_sensitive,
            max_results: config.max_results,
        };

        for literal in literals {
            let literal = literal.into();
            if let Err(error) = completion.insert(literal.as_str()) {
                warn!(%error, literal = %literal, "Skipping literal");
            }
        }

        debug!(
            keys = completion.index.len(),
            case_sensitive = completion.case_sensitive,
            "Completion index built"
        );
        completion
    }

    /// Adds a literal.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the literal was not known before.
    /// * `Ok(false)` - If the exact literal was already indexed.
    /// * `Err(TrieError::InvalidKey)` - If the literal is empty.
    pub fn insert<S: Into<String>>(&mut self, literal: S) -> TrieResult<bool> {
        let literal = literal.into();
        let key = self.fold(&literal).into_owned();
        let sequence = self.sequence;

        match self.index.get_mut(&key)? {
            Some(spellings) if spellings.iter().any(|(_, spelling)| *spelling == literal) => {
                return Ok(false);
            }
            Some(spellings) => spellings.push((sequence, literal)),
            None => {
                self.index.put(key, vec![(sequence, literal)])?;
            }
        }

        self.sequence += 1;
        Ok(true)
    }

    /// Removes a literal.
    ///
    /// Returns `true` if the exact literal was indexed.
    pub fn remove(&mut self, literal: &str) -> TrieResult<bool> {
        let key = self.fold(literal);

        let (removed, exhausted) = match self.index.get_mut(&key)? {
            Some(spellings) => {
                let before = spellings.len();
                spellings.retain(|(_, spelling)| spelling != literal);
                (spellings.len() != before, spellings.is_empty())
            }
            None => (false, false),
        };

        if exhausted {
            self.index.remove(&key)?;
        }
        Ok(removed)
    }

    /// Whether `argument` matches an indexed literal exactly, after folding.
    pub fn contains(&self, argument: &str) -> bool {
        matches!(self.index.contains_key(self.fold(argument)), Ok(true))
    }

    /// Number of indexed literals.
    pub fn len(&self) -> usize {
        self.index.values().iter().map(Vec::len).sum()
    }

    /// Whether no literal is indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn fold<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        }
    }
}

impl Completion for CachedCompletion {
    fn complete(&self, argument: &str) -> Vec<String> {
        let prefix = self.fold(argument);

        let mut matches: Vec<&(usize, String)> = self
            .index
            .prefix_values(&prefix)
            .into_iter()
            .flatten()
            .collect();
        matches.sort_unstable_by_key(|(sequence, _)| *sequence);

        let limit = match self.max_results {
            0 => matches.len(),
            max => max,
        };
        let suggestions: Vec<String> = matches
            .into_iter()
            .take(limit)
            .map(|(_, spelling)| spelling.clone())
            .collect();

        trace!(argument, count = suggestions.len(), "Argument completed");
        suggestions
    }
}

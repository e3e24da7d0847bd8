//! Vocabulary mapping between tokens and integer ids.
//!
//! The vocabulary is built at training time and persisted as a JSON artifact
//! of the form `{"word_index": {"token": id, ...}}`. Ids start at 1; id 0 is
//! reserved for padding and is deliberately absent from the map.

use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Reserved padding id, never present in the word index.
pub const PAD_ID: usize = 0;

/// Fallback token for out-of-vocabulary words.
pub const UNK_TOKEN: &str = "<unk>";

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    word_index: HashMap<String, usize>,
}

/// Immutable bidirectional token ↔ id mapping.
///
/// Unknown tokens map to the reserved `<unk>` id; unknown ids map back to
/// the `<unk>` token string. After construction the mapping never changes.
#[derive(Debug)]
pub struct Vocabulary {
    word_index: HashMap<String, usize>,
    index_word: HashMap<usize, String>,
    unk_id: usize,
}

impl Vocabulary {
    /// Build a vocabulary from a raw word index.
    ///
    /// If the artifact predates the `<unk>` token it is registered lazily at
    /// the next free id; this is the only mutation the mapping ever sees.
    pub fn new(mut word_index: HashMap<String, usize>) -> Self {
        if !word_index.contains_key(UNK_TOKEN) {
            let next_id = word_index.len() + 1;
            word_index.insert(UNK_TOKEN.to_string(), next_id);
        }

        let index_word = word_index
            .iter()
            .map(|(word, &id)| (id, word.clone()))
            .collect();

        let unk_id = word_index[UNK_TOKEN];

        Self {
            word_index,
            index_word,
            unk_id,
        }
    }

    /// Load a vocabulary from a persisted JSON artifact.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: VocabularyFile = serde_json::from_str(&raw)?;
        Ok(Self::new(file.word_index))
    }

    /// Map a token to its id, falling back to the `<unk>` id.
    pub fn token_to_id(&self, token: &str) -> usize {
        self.word_index.get(token).copied().unwrap_or(self.unk_id)
    }

    /// Map an id back to its token, falling back to the `<unk>` token.
    pub fn id_to_token(&self, id: usize) -> &str {
        self.index_word
            .get(&id)
            .map(String::as_str)
            .unwrap_or(UNK_TOKEN)
    }

    /// Reserved id for out-of-vocabulary tokens.
    pub fn unk_id(&self) -> usize {
        self.unk_id
    }

    /// Number of tokens in the word index (pad id excluded).
    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word_index.is_empty()
    }

    /// Embedding table size: word index plus the reserved pad id.
    pub fn size(&self) -> usize {
        self.word_index.len() + 1
    }

    /// Encode a normalized sentence into token ids, splitting on whitespace.
    pub fn encode(&self, normalized: &str) -> Vec<usize> {
        normalized
            .split_whitespace()
            .map(|word| self.token_to_id(word))
            .collect()
    }
}

/// Right-pad an id sequence with the pad id to exactly `max_length`,
/// truncating trailing tokens if the source exceeds the limit.
pub fn pad_sequence(mut ids: Vec<usize>, max_length: usize) -> Vec<usize> {
    ids.truncate(max_length);
    ids.resize(max_length, PAD_ID);
    ids
}

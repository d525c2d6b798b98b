//! Vocabulary loading for the flat token-table format.
//!
//! A vocabulary file is UTF-8 text with one entry per line, two
//! whitespace-separated fields: the token text and its non-negative
//! integer id.
//!
//! # Example Format
//!
//! ```text
//! hello 0
//! world 1
//! ! 2
//! ```
//!
//! The table is bijective: a token appearing twice, or two tokens sharing
//! an id, is a format error. Blank lines are skipped so files may end with
//! a trailing newline.

use rustc_hash::FxHashMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a vocabulary file.
#[derive(Error, Debug)]
pub enum VocabError {
    #[error("vocabulary file not found: {0}")]
    FileNotFound(String),
    #[error("malformed vocabulary line {line}: {msg}")]
    Format { line: usize, msg: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable token ↔ id table backing the encoder.
///
/// Built once from a vocabulary file (or an in-memory string) and never
/// mutated afterwards, so a single instance can be shared across threads
/// without locking.
#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    token_to_id: FxHashMap<String, u32>,
    id_to_token: FxHashMap<u32, String>,
}

impl VocabularyStore {
    /// Load a vocabulary from a file path.
    ///
    /// A path that does not resolve maps to [`VocabError::FileNotFound`];
    /// any other read failure surfaces as [`VocabError::Io`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VocabError::FileNotFound(path.display().to_string())
            } else {
                VocabError::Io(e)
            }
        })?;
        Self::parse(&data)
    }

    /// Parse a vocabulary from in-memory text.
    ///
    /// Format: `<token-text> <id>` per line, exactly two fields.
    pub fn parse(data: &str) -> Result<Self, VocabError> {
        let mut token_to_id = FxHashMap::default();
        let mut id_to_token = FxHashMap::default();

        for (idx, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = idx + 1;

            let mut fields = line.split_whitespace();
            let (token, id_str) = match (fields.next(), fields.next(), fields.next()) {
                (Some(token), Some(id), None) => (token, id),
                _ => {
                    return Err(VocabError::Format {
                        line: line_no,
                        msg: "expected exactly two whitespace-separated fields".to_string(),
                    })
                }
            };

            let id: u32 = id_str.parse().map_err(|_| VocabError::Format {
                line: line_no,
                msg: format!("invalid token id: {id_str:?}"),
            })?;

            if token_to_id.contains_key(token) {
                return Err(VocabError::Format {
                    line: line_no,
                    msg: format!("duplicate token: {token:?}"),
                });
            }
            if id_to_token.contains_key(&id) {
                return Err(VocabError::Format {
                    line: line_no,
                    msg: format!("duplicate token id: {id}"),
                });
            }

            token_to_id.insert(token.to_string(), id);
            id_to_token.insert(id, token.to_string());
        }

        Ok(Self {
            token_to_id,
            id_to_token,
        })
    }

    /// Look up the id for a token. `None` means the token is unknown;
    /// this never fails.
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Reverse lookup used by the decoder. Partial inverse of
    /// [`token_to_id`](Self::token_to_id).
    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(&id).map(String::as_str)
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }
}

//! Encode/decode orchestration over the segmenter, vocabulary, and
//! reserved special-token block.

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use thiserror::Error;

use super::segment::{Segment, Segmenter};
use super::special::SpecialTokenRegistry;
use super::vocab::{VocabError, VocabularyStore};

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("vocabulary error: {0}")]
    Vocab(#[from] VocabError),
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),
    #[error("max_len must be a positive integer, got {0}")]
    InvalidMaxLen(usize),
    #[error("disallowed special token in input: {0:?}")]
    DisallowedSpecialToken(String),
    #[error("unknown token id: {0}")]
    UnknownTokenId(u32),
    #[error("no vocabulary loaded")]
    UnloadedModel,
}

/// Which special-token names an unknown segment may resolve through.
#[derive(Debug, Clone)]
pub enum AllowedSpecial {
    /// Every name in the reserved block is admissible.
    All,
    /// Only the listed names are admissible.
    Set(FxHashSet<String>),
}

impl AllowedSpecial {
    /// No special tokens admitted.
    pub fn none() -> Self {
        AllowedSpecial::Set(FxHashSet::default())
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AllowedSpecial::Set(names.into_iter().map(Into::into).collect())
    }

    fn contains(&self, name: &str) -> bool {
        match self {
            AllowedSpecial::All => true,
            AllowedSpecial::Set(set) => set.contains(name),
        }
    }
}

/// Which literal segments are forbidden in encoder input.
#[derive(Debug, Clone)]
pub enum DisallowedSpecial {
    /// Every reserved name is forbidden unless explicitly allowed.
    All,
    /// Only the listed names are forbidden.
    Set(FxHashSet<String>),
}

impl DisallowedSpecial {
    /// Nothing forbidden.
    pub fn none() -> Self {
        DisallowedSpecial::Set(FxHashSet::default())
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DisallowedSpecial::Set(names.into_iter().map(Into::into).collect())
    }
}

/// Text ↔ token-id tokenizer.
///
/// Composes the [`Segmenter`], a [`VocabularyStore`], and the
/// [`SpecialTokenRegistry`]. All state is immutable after construction, so
/// one instance can be shared across threads; `encode`/`decode` are pure
/// functions of their inputs.
///
/// Encoding is best-effort: a segment unknown to the vocabulary is silently
/// dropped unless it names an allowed special token. Decoding is strict: an
/// id with no mapping is an error. The asymmetry is deliberate.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    vocab: Option<VocabularyStore>,
    special: SpecialTokenRegistry,
    segmenter: Segmenter,
}

impl Tokenizer {
    /// Create a tokenizer over an already-loaded vocabulary.
    pub fn new(vocab: VocabularyStore, max_len: usize) -> Result<Self, TokenizerError> {
        Ok(Self {
            vocab: Some(vocab),
            special: SpecialTokenRegistry::new(),
            segmenter: Segmenter::new(max_len)?,
        })
    }

    /// Create a tokenizer by loading the vocabulary file at `path`.
    pub fn from_vocab_file(
        path: impl AsRef<std::path::Path>,
        max_len: usize,
    ) -> Result<Self, TokenizerError> {
        Self::new(VocabularyStore::from_file(path)?, max_len)
    }

    /// Create a registry-only tokenizer with no vocabulary.
    ///
    /// Useful for callers that only need reserved-token ids; `encode` and
    /// `decode` fail with [`TokenizerError::UnloadedModel`] until a
    /// vocabulary is supplied via [`load_vocabulary`](Self::load_vocabulary).
    pub fn without_vocab(max_len: usize) -> Result<Self, TokenizerError> {
        Ok(Self {
            vocab: None,
            special: SpecialTokenRegistry::new(),
            segmenter: Segmenter::new(max_len)?,
        })
    }

    /// Supply the vocabulary for a tokenizer built with
    /// [`without_vocab`](Self::without_vocab).
    pub fn load_vocabulary(&mut self, vocab: VocabularyStore) {
        self.vocab = Some(vocab);
    }

    fn vocab(&self) -> Result<&VocabularyStore, TokenizerError> {
        self.vocab.as_ref().ok_or(TokenizerError::UnloadedModel)
    }

    /// The reserved special-token registry.
    pub fn special_tokens(&self) -> &SpecialTokenRegistry {
        &self.special
    }

    /// The configured segment length bound.
    pub fn max_len(&self) -> usize {
        self.segmenter.max_len()
    }

    /// Total vocabulary size: loaded entries plus the reserved block.
    pub fn vocab_size(&self) -> usize {
        self.vocab.as_ref().map_or(0, VocabularyStore::len) + self.special.len()
    }

    /// Encode `text` into a token-id sequence.
    ///
    /// Segments the text, rejects any literal segment named in
    /// `disallowed_special`, then maps each segment: whitespace markers to
    /// the registry's marker id, known tokens through the vocabulary, and
    /// unknown segments to a registry id when `allowed_special` admits them
    /// or to nothing at all otherwise. `bos`/`eos` wrap the result in the
    /// begin/end-of-text ids.
    pub fn encode(
        &self,
        text: &str,
        bos: bool,
        eos: bool,
        allowed_special: &AllowedSpecial,
        disallowed_special: &DisallowedSpecial,
    ) -> Result<Vec<u32>, TokenizerError> {
        let vocab = self.vocab()?;
        let segments = self.segmenter.segment(text);

        // Admission policy is checked before any id mapping.
        for segment in &segments {
            if let Some(s) = segment.as_literal() {
                if self.is_disallowed(s, allowed_special, disallowed_special) {
                    return Err(TokenizerError::DisallowedSpecialToken(s.to_string()));
                }
            }
        }

        let mut ids = Vec::with_capacity(segments.len() + 2);
        if bos {
            ids.push(self.special.begin_of_text());
        }
        for segment in &segments {
            match segment {
                Segment::Whitespace => ids.push(self.special.whitespace_marker()),
                Segment::Literal(s) => {
                    if let Some(id) = vocab.token_to_id(s) {
                        ids.push(id);
                    } else if allowed_special.contains(s) {
                        if let Some(id) = self.special.id_of(s) {
                            ids.push(id);
                        }
                    }
                    // Unknown and not allowed: dropped, not an error.
                }
            }
        }
        if eos {
            ids.push(self.special.end_of_text());
        }
        Ok(ids)
    }

    fn is_disallowed(
        &self,
        segment: &str,
        allowed: &AllowedSpecial,
        disallowed: &DisallowedSpecial,
    ) -> bool {
        match disallowed {
            DisallowedSpecial::All => self.special.contains(segment) && !allowed.contains(segment),
            DisallowedSpecial::Set(set) => set.contains(segment),
        }
    }

    /// Decode a token-id sequence back to text.
    ///
    /// Whitespace-marker ids become single spaces; every other id must have
    /// a vocabulary reverse mapping or decoding fails with
    /// [`TokenizerError::UnknownTokenId`]. Pieces are concatenated with no
    /// separators; spacing is carried entirely by the markers.
    pub fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        let vocab = self.vocab()?;
        let mut out = String::new();
        for &id in ids {
            if id == self.special.whitespace_marker() {
                out.push(' ');
            } else if let Some(token) = vocab.id_to_token(id) {
                out.push_str(token);
            } else {
                return Err(TokenizerError::UnknownTokenId(id));
            }
        }
        Ok(out)
    }

    /// Encode a batch of texts in parallel.
    pub fn encode_batch(
        &self,
        texts: &[String],
        bos: bool,
        eos: bool,
        allowed_special: &AllowedSpecial,
        disallowed_special: &DisallowedSpecial,
    ) -> Result<Vec<Vec<u32>>, TokenizerError> {
        texts
            .par_iter()
            .map(|text| self.encode(text, bos, eos, allowed_special, disallowed_special))
            .collect()
    }

    /// Decode a batch of id sequences in parallel.
    pub fn decode_batch(&self, id_lists: &[Vec<u32>]) -> Result<Vec<String>, TokenizerError> {
        id_lists.par_iter().map(|ids| self.decode(ids)).collect()
    }

    /// Attention mask over an id sequence: 1 for real tokens, 0 for `pad_id`.
    pub fn attention_mask(&self, ids: &[u32], pad_id: u32) -> Vec<u8> {
        ids.iter().map(|&id| u8::from(id != pad_id)).collect()
    }

    /// Token type ids over a sequence, flipping between 0 and 1 after each
    /// occurrence of `separator_id`.
    pub fn token_type_ids(&self, ids: &[u32], separator_id: u32) -> Vec<u32> {
        let mut current = 0u32;
        ids.iter()
            .map(|&id| {
                let ty = current;
                if id == separator_id {
                    current = 1 - current;
                }
                ty
            })
            .collect()
    }
}

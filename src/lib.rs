//! Tokencraft - standalone text tokenizer with a chat prompt builder.
//!
//! Converts raw text into a bounded-length sequence of integer token ids
//! and back, without a pretrained model:
//!
//! - Regex-driven segmentation respecting word/whitespace boundaries, with
//!   a configurable per-segment length bound
//! - Vocabulary-backed token ↔ id mapping loaded from a flat file
//! - A reserved block of 256 special-token ids for control tokens
//! - Best-effort encoding (unknown tokens dropped), strict decoding
//!   (unknown ids are errors)
//! - A multi-turn chat prompt formatter that leaves the final assistant
//!   turn open for generation
//!
//! # Example
//!
//! ```no_run
//! use tokencraft::{AllowedSpecial, DisallowedSpecial, Tokenizer};
//!
//! # fn main() -> Result<(), tokencraft::TokenizerError> {
//! let tokenizer = Tokenizer::from_vocab_file("vocab.txt", 10)?;
//! let ids = tokenizer.encode(
//!     "This is a test string.",
//!     true,
//!     true,
//!     &AllowedSpecial::none(),
//!     &DisallowedSpecial::none(),
//! )?;
//! let text = tokenizer.decode(&ids[1..ids.len() - 1])?;
//! # Ok(())
//! # }
//! ```

pub mod core;

pub use crate::core::{
    AllowedSpecial, ChatFormat, Dialog, DisallowedSpecial, Message, Segment, Segmenter,
    SpecialTokenRegistry, Tokenizer, TokenizerError, VocabError, VocabularyStore,
    NUM_RESERVED_SPECIAL_TOKENS, SPLIT_PATTERN, WHITESPACE_MARKER,
};

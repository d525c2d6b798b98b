//! Core tokenization engine for tokencraft.
//!
//! The core is organized into five components, leaf to root:
//!
//! - [`VocabularyStore`]: immutable token ↔ id table loaded from a flat file
//! - [`SpecialTokenRegistry`]: fixed block of 256 reserved control-token ids
//! - [`Segmenter`]: regex-driven splitter producing length-bounded segments
//!   with whitespace runs collapsed to markers
//! - [`Tokenizer`]: encode/decode orchestration and special-token admission
//! - [`ChatFormat`]: multi-turn dialog prompt assembly
//!
//! All components are immutable after construction; encode/decode calls are
//! pure functions of their inputs, so one instance can be shared freely
//! across threads (the batch helpers lean on this with rayon).

mod chat;
mod segment;
mod special;
mod tokenizer;
mod vocab;

pub use chat::{ChatFormat, Dialog, Message};
pub use segment::{Segment, Segmenter, SPLIT_PATTERN};
pub use special::{
    SpecialTokenRegistry, BEGIN_OF_TEXT, END_HEADER, END_OF_TEXT, END_OF_TURN,
    NUM_RESERVED_SPECIAL_TOKENS, START_HEADER, WHITESPACE_MARKER,
};
pub use tokenizer::{AllowedSpecial, DisallowedSpecial, Tokenizer, TokenizerError};
pub use vocab::{VocabError, VocabularyStore};

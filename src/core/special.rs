//! Reserved special-token registry.
//!
//! A fixed block of 256 reserved names whose ids are their 0-based
//! enumeration order. The canonical prefix carries the control tokens the
//! encoder and chat formatter need (document boundaries, header markers,
//! end of turn, whitespace marker); the remaining slots are anonymous
//! `<|reserved_special_token_N|>` placeholders.
//!
//! Special-token ids live in their own lookup table and may numerically
//! overlap vocabulary ids; callers distinguish the two by which table they
//! consult, never by id range.

use rustc_hash::FxHashMap;

/// Size of the reserved special-token block.
pub const NUM_RESERVED_SPECIAL_TOKENS: usize = 256;

/// Token text for the begin-of-text control token.
pub const BEGIN_OF_TEXT: &str = "<|begin_of_text|>";
/// Token text for the end-of-text control token.
pub const END_OF_TEXT: &str = "<|end_of_text|>";
/// Token text opening a message header.
pub const START_HEADER: &str = "<|start_header_id|>";
/// Token text closing a message header.
pub const END_HEADER: &str = "<|end_header_id|>";
/// Token text marking the end of a dialog turn.
pub const END_OF_TURN: &str = "<|eot_id|>";
/// Synthetic token standing for one maximal whitespace run.
pub const WHITESPACE_MARKER: &str = "<|space|>";

/// Registry of the reserved special-token block.
///
/// Constructed once, immutable afterwards. The canonical control tokens sit
/// at fixed positions in the enumeration, so their ids are cached at
/// construction and exposed through infallible accessors.
#[derive(Debug, Clone)]
pub struct SpecialTokenRegistry {
    ids: FxHashMap<String, u32>,
    names: Vec<String>,
    begin_of_text: u32,
    end_of_text: u32,
    start_header: u32,
    end_header: u32,
    end_of_turn: u32,
    whitespace_marker: u32,
}

impl SpecialTokenRegistry {
    pub fn new() -> Self {
        let mut names: Vec<String> = vec![
            BEGIN_OF_TEXT.to_string(),
            END_OF_TEXT.to_string(),
            "<|reserved_special_token_0|>".to_string(),
            "<|reserved_special_token_1|>".to_string(),
            "<|reserved_special_token_2|>".to_string(),
            "<|reserved_special_token_3|>".to_string(),
            START_HEADER.to_string(),
            END_HEADER.to_string(),
            "<|reserved_special_token_4|>".to_string(),
            END_OF_TURN.to_string(),
            WHITESPACE_MARKER.to_string(),
        ];
        let remaining = NUM_RESERVED_SPECIAL_TOKENS - names.len();
        for i in 0..remaining {
            names.push(format!("<|reserved_special_token_{}|>", i + 5));
        }

        let ids: FxHashMap<String, u32> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i as u32))
            .collect();

        // Positions are fixed by the enumeration above.
        let begin_of_text = ids[BEGIN_OF_TEXT];
        let end_of_text = ids[END_OF_TEXT];
        let start_header = ids[START_HEADER];
        let end_header = ids[END_HEADER];
        let end_of_turn = ids[END_OF_TURN];
        let whitespace_marker = ids[WHITESPACE_MARKER];

        Self {
            ids,
            names,
            begin_of_text,
            end_of_text,
            start_header,
            end_header,
            end_of_turn,
            whitespace_marker,
        }
    }

    /// Id for a reserved name, if it belongs to the block.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.ids.get(name).copied()
    }

    /// Name at a reserved id, if the id belongs to the block.
    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Whether the name belongs to the reserved block.
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Iterate over all reserved names in id order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Size of the reserved block.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn begin_of_text(&self) -> u32 {
        self.begin_of_text
    }

    pub fn end_of_text(&self) -> u32 {
        self.end_of_text
    }

    pub fn start_header(&self) -> u32 {
        self.start_header
    }

    pub fn end_header(&self) -> u32 {
        self.end_header
    }

    pub fn end_of_turn(&self) -> u32 {
        self.end_of_turn
    }

    pub fn whitespace_marker(&self) -> u32 {
        self.whitespace_marker
    }
}

impl Default for SpecialTokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

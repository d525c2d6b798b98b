//! Multi-turn dialog prompt assembly.
//!
//! Serializes an ordered list of role/content messages into one id
//! sequence: each message is wrapped in header markers and closed with an
//! end-of-turn id, and the prompt ends with a header-only assistant tail
//! that leaves the final turn open for generation.

use super::tokenizer::{AllowedSpecial, DisallowedSpecial, Tokenizer, TokenizerError};

/// One dialog turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// An ordered sequence of messages.
pub type Dialog = Vec<Message>;

/// Fixed composition rule turning a [`Dialog`] into a priming id sequence.
#[derive(Clone)]
pub struct ChatFormat {
    tokenizer: Tokenizer,
}

impl ChatFormat {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// The underlying tokenizer.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    fn encode_text(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        self.tokenizer.encode(
            text,
            false,
            false,
            &AllowedSpecial::none(),
            &DisallowedSpecial::none(),
        )
    }

    /// Header for one message: `[start-header] role [end-header] "\n\n"`.
    pub fn encode_header(&self, message: &Message) -> Result<Vec<u32>, TokenizerError> {
        let special = self.tokenizer.special_tokens();
        let mut ids = vec![special.start_header()];
        ids.extend(self.encode_text(&message.role)?);
        ids.push(special.end_header());
        ids.extend(self.encode_text("\n\n")?);
        Ok(ids)
    }

    /// One full turn: header, trimmed content, end-of-turn id.
    pub fn encode_message(&self, message: &Message) -> Result<Vec<u32>, TokenizerError> {
        let mut ids = self.encode_header(message)?;
        ids.extend(self.encode_text(message.content.trim())?);
        ids.push(self.tokenizer.special_tokens().end_of_turn());
        Ok(ids)
    }

    /// Serialize a whole dialog into a priming sequence.
    ///
    /// Opens with begin-of-text, encodes every message as a closed turn,
    /// then appends a header-only assistant tail. The tail carries no
    /// end-of-turn id, leaving the assistant turn open for continuation.
    pub fn encode_dialog_prompt(&self, dialog: &[Message]) -> Result<Vec<u32>, TokenizerError> {
        let mut ids = vec![self.tokenizer.special_tokens().begin_of_text()];
        for message in dialog {
            ids.extend(self.encode_message(message)?);
        }
        ids.extend(self.encode_header(&Message::assistant(""))?);
        Ok(ids)
    }
}

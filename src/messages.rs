//! Messages revealed as hearts are caught
//!
//! One message per heart; the number of messages fixes how many hearts a
//! session needs. The final payload is shown once every heart is caught.

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

/// Payload for the final screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalMessage {
    pub title: String,
    pub text: String,
    /// Optional photo shown above the title
    #[serde(default)]
    pub photo: Option<String>,
}

/// Ordered reveal messages plus the final payload. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMessageBook")]
pub struct MessageBook {
    messages: Vec<String>,
    final_message: FinalMessage,
}

/// Wire shape of a message book, before validation
#[derive(Deserialize)]
struct RawMessageBook {
    messages: Vec<String>,
    final_message: FinalMessage,
}

impl TryFrom<RawMessageBook> for MessageBook {
    type Error = ConfigError;

    fn try_from(raw: RawMessageBook) -> Result<Self, Self::Error> {
        MessageBook::new(raw.messages, raw.final_message)
    }
}

impl Default for MessageBook {
    fn default() -> Self {
        let messages = [
            "You make every ordinary day feel special.",
            "Your laugh is my favourite sound.",
            "I love how you see the best in people.",
            "Every adventure is better with you.",
            "You are my safe place.",
            "Thank you for choosing me, every day.",
            "My heart is yours, all of it.",
        ];
        Self {
            messages: messages.iter().map(|m| m.to_string()).collect(),
            final_message: FinalMessage {
                title: "You caught every heart!".to_string(),
                text: "And you have had mine all along. Happy Valentine's Day.".to_string(),
                photo: None,
            },
        }
    }
}

impl MessageBook {
    pub fn new(messages: Vec<String>, final_message: FinalMessage) -> Result<Self, ConfigError> {
        if messages.is_empty() {
            return Err(ConfigError::NoMessages);
        }
        Ok(Self {
            messages,
            final_message,
        })
    }

    /// Parse a message book from JSON (`{"messages": [...], "final_message": {...}}`)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawMessageBook = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Hearts needed to finish a session
    pub fn total_targets(&self) -> u32 {
        self.messages.len() as u32
    }

    /// Message at `index`, wrapping past the end
    pub fn message(&self, index: usize) -> &str {
        &self.messages[index % self.messages.len()]
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn final_message(&self) -> &FinalMessage {
        &self.final_message
    }
}

/// Message index revealed by the `score`-th catch (1-based)
#[inline]
pub fn message_index_for_catch(score: u32, total_targets: u32) -> usize {
    (score.saturating_sub(1) % total_targets.max(1)) as usize
}

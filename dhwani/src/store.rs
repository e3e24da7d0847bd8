//! Conversation store: an append-only JSON log of role/content records.

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One conversation entry.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Record {
    pub role: String,
    pub content: String,
}

/// Conversation role names.
pub const ROLE_USER: &str = "user";
pub const ROLE_REPLY: &str = "assistant_english";
pub const ROLE_TRANSLATION: &str = "assistant_translated";

/// JSON-file conversation log.
///
/// Missing or corrupt files read as the empty conversation; writes replace
/// the whole file with pretty-printed JSON.
pub struct ConversationStore {
    path: PathBuf,
}

impl ConversationStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read every stored record, oldest first.
    pub fn recent(&self) -> Vec<Record> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "corrupt conversation store, starting empty");
            Vec::new()
        })
    }

    /// Append one complete exchange: user message, English reply, and its
    /// translation.
    pub fn store_exchange(&self, user: &str, reply: &str, translation: &str) -> Result<()> {
        let mut records = self.recent();

        records.push(Record {
            role: ROLE_USER.to_string(),
            content: user.to_string(),
        });
        records.push(Record {
            role: ROLE_REPLY.to_string(),
            content: reply.to_string(),
        });
        records.push(Record {
            role: ROLE_TRANSLATION.to_string(),
            content: translation.to_string(),
        });

        self.write(&records)
    }

    /// Reset the conversation to empty.
    pub fn reset(&self) -> Result<()> {
        self.write(&[])
    }

    fn write(&self, records: &[Record]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {:?}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)
            .wrap_err_with(|| format!("failed to write {:?}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str) -> ConversationStore {
        let path = std::env::temp_dir().join(name);
        std::fs::remove_file(&path).ok();
        ConversationStore::new(path)
    }

    #[test]
    fn missing_file_reads_empty() {
        let s = store("dhwani_store_missing.json");
        assert!(s.recent().is_empty());
    }

    #[test]
    fn corrupt_file_reads_empty() {
        let s = store("dhwani_store_corrupt.json");
        std::fs::write(&s.path, "{not json").unwrap();
        assert!(s.recent().is_empty());
        std::fs::remove_file(&s.path).ok();
    }

    #[test]
    fn appends_exchanges_in_order() {
        let s = store("dhwani_store_append.json");

        s.store_exchange("hello", "hi there", "नमस्ते").unwrap();
        s.store_exchange("bye", "goodbye", "अलविदा").unwrap();

        let records = s.recent();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].role, ROLE_USER);
        assert_eq!(records[0].content, "hello");
        assert_eq!(records[2].role, ROLE_TRANSLATION);
        assert_eq!(records[2].content, "नमस्ते");
        assert_eq!(records[3].content, "bye");

        std::fs::remove_file(&s.path).ok();
    }

    #[test]
    fn reset_empties_the_log() {
        let s = store("dhwani_store_reset.json");

        s.store_exchange("hello", "hi", "नमस्ते").unwrap();
        s.reset().unwrap();

        assert!(s.recent().is_empty());
        let raw = std::fs::read_to_string(&s.path).unwrap();
        assert_eq!(raw.trim(), "[]");

        std::fs::remove_file(&s.path).ok();
    }
}

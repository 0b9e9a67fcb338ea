pub mod chat;
pub mod classify;
pub mod quiz;
pub mod schedule;

use chrono::Local;

/// One transcript entry. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub content: String,
    pub is_user: bool,
    pub timestamp: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
            timestamp: stamp(),
        }
    }

    pub fn tutor(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            timestamp: stamp(),
        }
    }
}

fn stamp() -> String {
    Local::now().format("%H:%M").to_string()
}

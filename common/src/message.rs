use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;
use crate::store::StoreCode;

/// Remote table holding broadcast messages.
pub const MESSAGES_TABLE: &str = "messages";

/// Column messages are listed by, newest first.
pub const MESSAGE_CREATED_COLUMN: &str = "date_created";

/// Row identifier assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Abbreviated form for table cells: first 8 characters and an ellipsis.
    pub fn short(&self) -> String {
        let head: String = self.0.chars().take(8).collect();
        format!("{head}...")
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A message broadcast to a list of stores.
///
/// Messages are immutable once created; the only lifecycle event after
/// creation is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub title: String,
    pub body: String,
    pub list_of_stores: Vec<StoreCode>,
    pub user_id: UserId,
    pub date_created: DateTime<Utc>,
}

impl Message {
    pub fn stores_joined(&self) -> String {
        self.list_of_stores
            .iter()
            .map(StoreCode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Text shown by the "View" action.
    pub fn details(&self) -> String {
        format!(
            "Title: {}\n\nMessage: {}\n\nStores: {}",
            self.title,
            self.body,
            self.stores_joined()
        )
    }
}

/// Insert payload for a new message. The backend fills `id` and `date_created`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub title: String,
    pub body: String,
    pub list_of_stores: Vec<StoreCode>,
    pub user_id: UserId,
}

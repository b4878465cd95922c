//! Chat exchange model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One persisted free-conversation exchange
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatRecord {
    pub id: i64,
    pub user_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChatRecordRequest {
    pub user_id: String,
    pub user_message: String,
    pub bot_response: String,
}

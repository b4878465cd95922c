//! Chat repository implementation

use std::time::Instant;
use async_trait::async_trait;
use sqlx::PgPool;
use crate::models::chat::{ChatRecord, CreateChatRecordRequest};
use crate::utils::errors::GptBuddyError;
use crate::utils::logging::log_database_operation;

/// Append-only destination for finished exchanges
#[async_trait]
pub trait ChatRecordSink: Send + Sync {
    /// Store one exchange; the store assigns `id` and `created_at`
    async fn insert(&self, request: CreateChatRecordRequest) -> Result<ChatRecord, GptBuddyError>;
}

#[derive(Debug, Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new chat record
    pub async fn create(&self, request: CreateChatRecordRequest) -> Result<ChatRecord, GptBuddyError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, ChatRecord>(
            r#"
            INSERT INTO chats (user_id, user_message, bot_response)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, user_message, bot_response, created_at
            "#
        )
        .bind(request.user_id)
        .bind(request.user_message)
        .bind(request.bot_response)
        .fetch_one(&self.pool)
        .await;

        log_database_operation("insert", "chats", started.elapsed().as_millis() as u64, result.is_ok());

        Ok(result?)
    }

    /// Find all records of a user, oldest first
    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Vec<ChatRecord>, GptBuddyError> {
        let records = sqlx::query_as::<_, ChatRecord>(
            "SELECT id, user_id, user_message, bot_response, created_at FROM chats WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Count records of a user
    pub async fn count_by_user_id(&self, user_id: &str) -> Result<i64, GptBuddyError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chats WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[async_trait]
impl ChatRecordSink for ChatRepository {
    async fn insert(&self, request: CreateChatRecordRequest) -> Result<ChatRecord, GptBuddyError> {
        self.create(request).await
    }
}

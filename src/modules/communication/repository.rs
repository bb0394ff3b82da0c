use async_trait::async_trait;
use chrono::Utc;
use schoolhub_db::PgPool;
use schoolhub_models::ClassMessage;
use tokio::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::classes::ClassError;

#[derive(Debug, Clone)]
pub struct NewClassMessage {
    pub class_id: String,
    pub sender_id: Uuid,
    pub content: String,
}

/// Class messages are write-only: stored when sent, never listed.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn insert_message(&self, message: NewClassMessage) -> Result<ClassMessage, ClassError>;
}

pub struct PgMessageRepository {
    db: PgPool,
}

impl PgMessageRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self, message), fields(class_id = %message.class_id))]
    async fn insert_message(&self, message: NewClassMessage) -> Result<ClassMessage, ClassError> {
        let message = sqlx::query_as::<_, ClassMessage>(
            r#"INSERT INTO class_messages (id, class_id, sender_id, content)
               VALUES ($1, $2, $3, $4)
               RETURNING id, class_id, sender_id, content, sent_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&message.class_id)
        .bind(message.sender_id)
        .bind(&message.content)
        .fetch_one(&self.db)
        .await?;

        Ok(message)
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<ClassMessage>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<ClassMessage> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn insert_message(&self, message: NewClassMessage) -> Result<ClassMessage, ClassError> {
        let stored = ClassMessage {
            id: Uuid::new_v4(),
            class_id: message.class_id,
            sender_id: message.sender_id,
            content: message.content,
            sent_at: Utc::now(),
        };
        self.messages.lock().await.push(stored.clone());
        Ok(stored)
    }
}

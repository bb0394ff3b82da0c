use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use schoolhub_db::PgPool;
use schoolhub_models::Homework;
use tokio::sync::Mutex;
use tracing::instrument;
use uuid::Uuid;

use super::error::ClassError;

#[derive(Debug, Clone)]
pub struct NewHomework {
    pub class_id: String,
    pub teacher_id: Uuid,
    pub subject: String,
    pub content: String,
}

#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Returns false when the teacher already had the class.
    async fn assign_class(&self, teacher_id: Uuid, class_name: &str) -> Result<bool, ClassError>;
    /// Class names assigned to a teacher, sorted.
    async fn classes_for_teacher(&self, teacher_id: Uuid) -> Result<Vec<String>, ClassError>;
    async fn is_assigned(&self, teacher_id: Uuid, class_name: &str) -> Result<bool, ClassError>;
    async fn insert_homework(&self, homework: NewHomework) -> Result<Homework, ClassError>;
}

pub struct PgClassRepository {
    db: PgPool,
}

impl PgClassRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClassRepository for PgClassRepository {
    #[instrument(skip(self))]
    async fn assign_class(&self, teacher_id: Uuid, class_name: &str) -> Result<bool, ClassError> {
        let result = sqlx::query(
            r#"INSERT INTO teacher_classes (teacher_id, class_name)
               VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(teacher_id)
        .bind(class_name)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn classes_for_teacher(&self, teacher_id: Uuid) -> Result<Vec<String>, ClassError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT class_name FROM teacher_classes WHERE teacher_id = $1 ORDER BY class_name",
        )
        .bind(teacher_id)
        .fetch_all(&self.db)
        .await?;

        Ok(names)
    }

    #[instrument(skip(self))]
    async fn is_assigned(&self, teacher_id: Uuid, class_name: &str) -> Result<bool, ClassError> {
        let assigned = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM teacher_classes WHERE teacher_id = $1 AND class_name = $2
               )"#,
        )
        .bind(teacher_id)
        .bind(class_name)
        .fetch_one(&self.db)
        .await?;

        Ok(assigned)
    }

    #[instrument(skip(self, homework), fields(class_id = %homework.class_id))]
    async fn insert_homework(&self, homework: NewHomework) -> Result<Homework, ClassError> {
        let homework = sqlx::query_as::<_, Homework>(
            r#"INSERT INTO homework (id, class_id, teacher_id, subject, content)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, class_id, teacher_id, subject, content, created_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(&homework.class_id)
        .bind(homework.teacher_id)
        .bind(&homework.subject)
        .bind(&homework.content)
        .fetch_one(&self.db)
        .await?;

        Ok(homework)
    }
}

#[derive(Default)]
pub struct InMemoryClassRepository {
    assignments: Mutex<HashMap<Uuid, BTreeSet<String>>>,
    homework: Mutex<Vec<Homework>>,
}

impl InMemoryClassRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn homework(&self) -> Vec<Homework> {
        self.homework.lock().await.clone()
    }
}

#[async_trait]
impl ClassRepository for InMemoryClassRepository {
    async fn assign_class(&self, teacher_id: Uuid, class_name: &str) -> Result<bool, ClassError> {
        let mut assignments = self.assignments.lock().await;
        Ok(assignments
            .entry(teacher_id)
            .or_default()
            .insert(class_name.to_string()))
    }

    async fn classes_for_teacher(&self, teacher_id: Uuid) -> Result<Vec<String>, ClassError> {
        let assignments = self.assignments.lock().await;
        Ok(assignments
            .get(&teacher_id)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn is_assigned(&self, teacher_id: Uuid, class_name: &str) -> Result<bool, ClassError> {
        let assignments = self.assignments.lock().await;
        Ok(assignments
            .get(&teacher_id)
            .is_some_and(|names| names.contains(class_name)))
    }

    async fn insert_homework(&self, homework: NewHomework) -> Result<Homework, ClassError> {
        let stored = Homework {
            id: Uuid::new_v4(),
            class_id: homework.class_id,
            teacher_id: homework.teacher_id,
            subject: homework.subject,
            content: homework.content,
            created_at: Utc::now(),
        };
        self.homework.lock().await.push(stored.clone());
        Ok(stored)
    }
}

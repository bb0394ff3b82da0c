use std::sync::Arc;

use schoolhub_auth::Claims;
use schoolhub_core::sanitize_str;
use schoolhub_models::{Homework, SendHomeworkRequest};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::error::ClassError;
use super::repository::{ClassRepository, NewHomework};

/// Fails unless the caller is `acting_id` or an admin.
pub(crate) fn ensure_acting_as(claims: &Claims, acting_id: &str) -> Result<(), ClassError> {
    if claims.is_admin() || claims.sub == acting_id.trim() {
        Ok(())
    } else {
        Err(ClassError::Forbidden)
    }
}

#[derive(Clone)]
pub struct ClassService {
    repo: Arc<dyn ClassRepository>,
}

impl ClassService {
    pub fn new(repo: Arc<dyn ClassRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, claims), fields(caller = %claims.sub))]
    pub async fn teacher_classes(
        &self,
        claims: &Claims,
        teacher_id: &str,
    ) -> Result<Vec<String>, ClassError> {
        ensure_acting_as(claims, teacher_id)?;
        let teacher_id = Uuid::parse_str(teacher_id.trim())
            .map_err(|_| ClassError::Invalid("Invalid teacher id".to_string()))?;

        self.repo.classes_for_teacher(teacher_id).await
    }

    /// Checks that the caller may post to `class_name` as `acting_id`.
    ///
    /// Admins may post to any class on behalf of anyone.
    pub async fn ensure_may_post(
        &self,
        claims: &Claims,
        acting_id: Uuid,
        class_name: &str,
    ) -> Result<(), ClassError> {
        ensure_acting_as(claims, &acting_id.to_string())?;
        if claims.is_admin() {
            return Ok(());
        }

        if !self.repo.is_assigned(acting_id, class_name).await? {
            debug!(%acting_id, class_name, "Teacher not assigned to class");
            return Err(ClassError::NotAssigned(class_name.to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self, claims, dto), fields(class_id = %dto.class_id))]
    pub async fn send_homework(
        &self,
        claims: &Claims,
        dto: SendHomeworkRequest,
    ) -> Result<Homework, ClassError> {
        self.ensure_may_post(claims, dto.teacher_id, &dto.class_id)
            .await?;

        self.repo
            .insert_homework(NewHomework {
                class_id: dto.class_id,
                teacher_id: dto.teacher_id,
                subject: dto.subject,
                content: dto.content,
            })
            .await
    }

    /// Assigns `class_name`, cleaned the same way request class ids are.
    pub async fn assign_class(&self, teacher_id: Uuid, class_name: &str) -> Result<bool, ClassError> {
        let class_name = sanitize_str(class_name);
        if class_name.is_empty() {
            return Err(ClassError::Invalid("Class name is required".to_string()));
        }
        self.repo.assign_class(teacher_id, &class_name).await
    }

    pub async fn classes_for(&self, teacher_id: Uuid) -> Result<Vec<String>, ClassError> {
        self.repo.classes_for_teacher(teacher_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::classes::repository::InMemoryClassRepository;
    use schoolhub_models::UserRole;

    fn claims(id: Uuid, role: UserRole) -> Claims {
        Claims {
            sub: id.to_string(),
            username: "someone".to_string(),
            role,
            exp: 9999999999,
            iat: 0,
        }
    }

    fn homework(teacher_id: Uuid, class_id: &str) -> SendHomeworkRequest {
        SendHomeworkRequest {
            class_id: class_id.to_string(),
            teacher_id,
            subject: "Homework".to_string(),
            content: "Page 12".to_string(),
        }
    }

    #[tokio::test]
    async fn test_teacher_sees_own_classes_only() {
        let service = ClassService::new(Arc::new(InMemoryClassRepository::new()));
        let teacher = Uuid::new_v4();
        service.assign_class(teacher, "3B").await.unwrap();

        let own = service
            .teacher_classes(&claims(teacher, UserRole::Teacher), &teacher.to_string())
            .await
            .unwrap();
        assert_eq!(own, vec!["3B".to_string()]);

        let other = service
            .teacher_classes(
                &claims(Uuid::new_v4(), UserRole::Teacher),
                &teacher.to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(other, ClassError::Forbidden));

        let admin = service
            .teacher_classes(&claims(Uuid::new_v4(), UserRole::Admin), &teacher.to_string())
            .await
            .unwrap();
        assert_eq!(admin, own);
    }

    #[tokio::test]
    async fn test_send_homework_requires_assignment() {
        let repo = Arc::new(InMemoryClassRepository::new());
        let service = ClassService::new(repo.clone());
        let teacher = Uuid::new_v4();
        let caller = claims(teacher, UserRole::Teacher);
        service.assign_class(teacher, "3B").await.unwrap();

        let err = service
            .send_homework(&caller, homework(teacher, "4C"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassError::NotAssigned(ref class) if class == "4C"));

        let stored = service
            .send_homework(&caller, homework(teacher, "3B"))
            .await
            .unwrap();
        assert_eq!(stored.class_id, "3B");
        assert_eq!(repo.homework().await, vec![stored]);
    }

    #[tokio::test]
    async fn test_cannot_post_as_someone_else() {
        let service = ClassService::new(Arc::new(InMemoryClassRepository::new()));
        let teacher = Uuid::new_v4();
        service.assign_class(teacher, "3B").await.unwrap();

        let err = service
            .send_homework(&claims(Uuid::new_v4(), UserRole::Teacher), homework(teacher, "3B"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassError::Forbidden));

        service
            .send_homework(&claims(Uuid::new_v4(), UserRole::Admin), homework(teacher, "9Z"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_assign_blank_class_name() {
        let service = ClassService::new(Arc::new(InMemoryClassRepository::new()));
        let err = service.assign_class(Uuid::new_v4(), "  ").await.unwrap_err();
        assert!(matches!(err, ClassError::Invalid(_)));

        let err = service.assign_class(Uuid::new_v4(), "<>").await.unwrap_err();
        assert!(matches!(err, ClassError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_assigned_name_matches_sanitized_requests() {
        let service = ClassService::new(Arc::new(InMemoryClassRepository::new()));
        let teacher = Uuid::new_v4();
        assert!(service.assign_class(teacher, " <3B> ").await.unwrap());
        assert!(!service.assign_class(teacher, "3B").await.unwrap());
        assert_eq!(service.classes_for(teacher).await.unwrap(), vec!["3B".to_string()]);

        service
            .send_homework(&claims(teacher, UserRole::Teacher), homework(teacher, "3B"))
            .await
            .unwrap();
    }
}

use std::sync::Arc;

use schoolhub_auth::Claims;
use schoolhub_models::{ClassMessage, SendClassMessageRequest};
use tracing::instrument;

use super::repository::{MessageRepository, NewClassMessage};
use crate::modules::classes::ClassError;
use crate::modules::classes::service::ClassService;

/// Stores class messages after the same access checks as homework.
#[derive(Clone)]
pub struct CommunicationService {
    messages: Arc<dyn MessageRepository>,
    classes: ClassService,
}

impl CommunicationService {
    pub fn new(messages: Arc<dyn MessageRepository>, classes: ClassService) -> Self {
        Self { messages, classes }
    }

    #[instrument(skip(self, claims, dto), fields(class_id = %dto.class_id))]
    pub async fn send_class_message(
        &self,
        claims: &Claims,
        dto: SendClassMessageRequest,
    ) -> Result<ClassMessage, ClassError> {
        self.classes
            .ensure_may_post(claims, dto.sender_id, &dto.class_id)
            .await?;

        self.messages
            .insert_message(NewClassMessage {
                class_id: dto.class_id,
                sender_id: dto.sender_id,
                content: dto.content,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::classes::repository::InMemoryClassRepository;
    use crate::modules::communication::repository::InMemoryMessageRepository;
    use schoolhub_models::UserRole;
    use uuid::Uuid;

    fn claims(id: Uuid) -> Claims {
        Claims {
            sub: id.to_string(),
            username: "mr.levi".to_string(),
            role: UserRole::Teacher,
            exp: 9999999999,
            iat: 0,
        }
    }

    #[tokio::test]
    async fn test_message_is_stored_for_assigned_class() {
        let classes = ClassService::new(Arc::new(InMemoryClassRepository::new()));
        let messages = Arc::new(InMemoryMessageRepository::new());
        let service = CommunicationService::new(messages.clone(), classes.clone());
        let teacher = Uuid::new_v4();
        classes.assign_class(teacher, "3B").await.unwrap();

        let request = |class_id: &str| SendClassMessageRequest {
            class_id: class_id.to_string(),
            sender_id: teacher,
            content: "Trip on Friday".to_string(),
        };

        let err = service
            .send_class_message(&claims(teacher), request("1A"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassError::NotAssigned(_)));
        assert!(messages.messages().await.is_empty());

        let sent = service
            .send_class_message(&claims(teacher), request("3B"))
            .await
            .unwrap();
        assert_eq!(sent.sender_id, teacher);
        assert_eq!(messages.messages().await, vec![sent]);
    }
}

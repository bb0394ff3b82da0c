use schoolhub_models::{SendClassMessageRequest, SendHomeworkRequest};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::ClassApi;
use crate::error::ClientError;
use crate::session::Session;

/// Subject sent with every homework post from this screen.
pub const HOMEWORK_SUBJECT: &str = "Homework";

const SEND_FAILED: &str = "Send failed";

/// A class as shown in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCard {
    /// 1-based position in the server's list.
    pub id: String,
    pub name: String,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkItem {
    /// Id of the stored homework, as returned by the server.
    pub id: Uuid,
    pub class_id: String,
    pub text: String,
    pub completed: bool,
}

/// A modal alert for the caller to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }
}

fn failure_message(e: &ClientError) -> String {
    match e {
        ClientError::Api { message, .. } => {
            message.clone().unwrap_or_else(|| SEND_FAILED.to_string())
        }
        other => other.to_string(),
    }
}

/// State and actions of the teacher's class screen.
pub struct ClassScreen<A: ClassApi> {
    api: A,
    session: Session,
    classes: Vec<ClassCard>,
    search_query: String,
    selected: Option<ClassCard>,
    homework: Vec<HomeworkItem>,
    homework_draft: String,
    message_draft: String,
    message_dialog_open: bool,
    alerts: Vec<Alert>,
}

impl<A: ClassApi> ClassScreen<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            classes: Vec::new(),
            search_query: String::new(),
            selected: None,
            homework: Vec::new(),
            homework_draft: String::new(),
            message_draft: String::new(),
            message_dialog_open: false,
            alerts: Vec::new(),
        }
    }

    /// Loads the logged-in teacher's classes.
    pub async fn mount(&mut self) {
        match self
            .api
            .teacher_classes(&self.session.token, self.session.user_id())
            .await
        {
            Ok(names) => {
                self.classes = names
                    .into_iter()
                    .enumerate()
                    .map(|(index, name)| ClassCard {
                        id: (index + 1).to_string(),
                        name,
                        subjects: Vec::new(),
                    })
                    .collect();
                info!(count = self.classes.len(), "Classes loaded");
            }
            Err(e) => {
                warn!(error = %e, "Failed to load classes");
                self.classes.clear();
                self.alerts.push(Alert::new(
                    "Error",
                    e.server_message().unwrap_or("Could not load classes"),
                ));
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn classes(&self) -> &[ClassCard] {
        &self.classes
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Cards whose name contains the search query, ignoring case.
    pub fn visible_classes(&self) -> Vec<&ClassCard> {
        let query = self.search_query.trim().to_lowercase();
        self.classes
            .iter()
            .filter(|card| query.is_empty() || card.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Selects the card with `id` and clears the homework list.
    ///
    /// Returns false when no card has that id.
    pub fn select_class(&mut self, id: &str) -> bool {
        let Some(card) = self.classes.iter().find(|card| card.id == id).cloned() else {
            return false;
        };
        self.selected = Some(card);
        self.homework.clear();
        true
    }

    pub fn selected_class(&self) -> Option<&ClassCard> {
        self.selected.as_ref()
    }

    pub fn homework(&self) -> &[HomeworkItem] {
        &self.homework
    }

    pub fn homework_draft(&self) -> &str {
        &self.homework_draft
    }

    pub fn set_homework_draft(&mut self, text: impl Into<String>) {
        self.homework_draft = text.into();
    }

    /// Posts the homework draft to the selected class. A blank draft is ignored.
    pub async fn add_homework(&mut self) {
        if self.homework_draft.trim().is_empty() {
            return;
        }
        let Some(class_name) = self.selected.as_ref().map(|card| card.name.clone()) else {
            self.alerts.push(Alert::new("Error", "No class selected"));
            return;
        };

        let request = SendHomeworkRequest {
            class_id: class_name,
            teacher_id: self.session.user_id(),
            subject: HOMEWORK_SUBJECT.to_string(),
            content: self.homework_draft.clone(),
        };

        match self.api.send_homework(&self.session.token, &request).await {
            Ok(response) => {
                info!(homework_id = %response.homework.id, "Homework sent");
                self.alerts
                    .push(Alert::new("Success", "Homework sent to parents"));
                self.homework.push(HomeworkItem {
                    id: response.homework.id,
                    class_id: response.homework.class_id,
                    text: response.homework.content,
                    completed: false,
                });
                self.homework_draft.clear();
            }
            Err(e) => {
                warn!(error = %e, "Homework send failed");
                self.alerts.push(Alert::new("Error", failure_message(&e)));
            }
        }
    }

    /// Flips the completion flag of a homework item; local only.
    pub fn toggle_homework(&mut self, id: Uuid) -> bool {
        match self.homework.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    pub fn open_message_dialog(&mut self) {
        self.message_dialog_open = true;
    }

    pub fn close_message_dialog(&mut self) {
        self.message_dialog_open = false;
    }

    pub fn is_message_dialog_open(&self) -> bool {
        self.message_dialog_open
    }

    pub fn message_draft(&self) -> &str {
        &self.message_draft
    }

    pub fn set_message_draft(&mut self, text: impl Into<String>) {
        self.message_draft = text.into();
    }

    /// Sends the message draft to every parent of the selected class.
    pub async fn send_message(&mut self) {
        if self.message_draft.trim().is_empty() {
            self.alerts
                .push(Alert::new("Error", "Cannot send an empty message."));
            return;
        }
        let Some(class_name) = self.selected.as_ref().map(|card| card.name.clone()) else {
            self.alerts.push(Alert::new("Error", "No class selected"));
            return;
        };

        let request = SendClassMessageRequest {
            class_id: class_name,
            sender_id: self.session.user_id(),
            content: self.message_draft.clone(),
        };

        match self
            .api
            .send_class_message(&self.session.token, &request)
            .await
        {
            Ok(response) => {
                info!(message_id = %response.class_message.id, "Class message sent");
                self.alerts.push(Alert::new(
                    "Message sent",
                    "The message was sent to all parents in the class",
                ));
                self.message_draft.clear();
                self.message_dialog_open = false;
            }
            Err(e) => {
                warn!(error = %e, "Class message send failed");
                self.alerts.push(Alert::new("Error", failure_message(&e)));
            }
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Returns and clears the pending alerts.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }
}

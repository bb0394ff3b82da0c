use crate::modules::communication::controller::send_class_message;
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_communication_router() -> Router<AppState> {
    Router::new().route("/send-class-message", post(send_class_message))
}

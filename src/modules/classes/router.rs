use crate::modules::classes::controller::{get_teacher_classes, send_homework};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new().route("/teacher-classes/{id}", get(get_teacher_classes))
}

pub fn init_homework_router() -> Router<AppState> {
    Router::new().route("/homework/send", post(send_homework))
}

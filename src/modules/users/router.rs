use crate::modules::users::controller::{
    delete_user, get_all_users, login, register, reset_password, update_user,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/reset-password", post(reset_password))
        .route("/users", get(get_all_users))
        .route(
            "/users/{id}",
            put(update_user).patch(update_user).delete(delete_user),
        )
}

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use schoolhub_core::{ErrorResponse, FieldError, ValidationErrorResponse};
use schoolhub_models::{
    ClassMessage, ClassMessageSentResponse, Homework, HomeworkSentResponse, LoginRequest,
    LoginResponse, MessageResponse, RegisterRequest, ResetPasswordRequest, SendClassMessageRequest,
    SendHomeworkRequest, UpdateUserRequest, User, UserRole,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::register,
        crate::modules::users::controller::login,
        crate::modules::users::controller::reset_password,
        crate::modules::users::controller::get_all_users,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::classes::controller::get_teacher_classes,
        crate::modules::classes::controller::send_homework,
        crate::modules::communication::controller::send_class_message,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRequest,
            UpdateUserRequest,
            LoginRequest,
            LoginResponse,
            ResetPasswordRequest,
            MessageResponse,
            Homework,
            SendHomeworkRequest,
            HomeworkSentResponse,
            ClassMessage,
            SendClassMessageRequest,
            ClassMessageSentResponse,
            ErrorResponse,
            ValidationErrorResponse,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, login and user management"),
        (name = "Classes", description = "Teacher classes and homework"),
        (name = "Communication", description = "Messages to the parents of a class")
    ),
    info(
        title = "SchoolHub API",
        version = "0.1.0",
        description = "School API for teachers and parents: accounts, classes, homework and class messages.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

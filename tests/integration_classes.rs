mod common;

use axum::http::StatusCode;
use common::TestApp;
use schoolhub_models::UserRole;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_teacher_classes_requires_token() {
    let app = TestApp::new();
    let uri = format!("/api/attendance/teacher-classes/{}", Uuid::new_v4());

    let (status, body) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");

    let (status, body) = app.get(&uri, Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_teacher_classes_sorted() {
    let app = TestApp::new();
    let (teacher, token) = app.user_with_token(UserRole::Teacher).await;
    for class in ["3B", "1A", "2C"] {
        app.state.classes.assign_class(teacher.id, class).await.unwrap();
    }

    let (status, body) = app
        .get(
            &format!("/api/attendance/teacher-classes/{}", teacher.id),
            Some(&token),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["1A", "2C", "3B"]));
}

#[tokio::test]
async fn test_teacher_classes_of_someone_else() {
    let app = TestApp::new();
    let (teacher, _) = app.user_with_token(UserRole::Teacher).await;
    let (_, other_token) = app.user_with_token(UserRole::Teacher).await;
    let (_, admin_token) = app.user_with_token(UserRole::Admin).await;
    app.state.classes.assign_class(teacher.id, "3B").await.unwrap();
    let uri = format!("/api/attendance/teacher-classes/{}", teacher.id);

    let (status, _) = app.get(&uri, Some(&other_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get(&uri, Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["3B"]));
}

#[tokio::test]
async fn test_send_homework() {
    let app = TestApp::new();
    let (teacher, token) = app.user_with_token(UserRole::Teacher).await;
    app.state.classes.assign_class(teacher.id, "3B").await.unwrap();

    let (status, body) = app
        .post(
            "/api/class/homework/send",
            json!({
                "classId": "3B",
                "teacherId": teacher.id,
                "subject": "Homework",
                "content": "  Exercises <1-4> on page 12 "
            }),
            Some(&token),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Homework sent to parents");
    assert_eq!(body["homework"]["classId"], "3B");
    assert_eq!(body["homework"]["teacherId"], teacher.id.to_string());
    assert_eq!(body["homework"]["content"], "Exercises 1-4 on page 12");
    assert!(Uuid::parse_str(body["homework"]["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_send_homework_rejections() {
    let app = TestApp::new();
    let (teacher, token) = app.user_with_token(UserRole::Teacher).await;
    let (other, _) = app.user_with_token(UserRole::Teacher).await;
    app.state.classes.assign_class(teacher.id, "3B").await.unwrap();

    let (status, body) = app
        .post(
            "/api/class/homework/send",
            json!({"classId": "3B", "teacherId": teacher.id, "subject": "Homework", "content": ""}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "content");

    let (status, body) = app
        .post(
            "/api/class/homework/send",
            json!({"classId": "3B", "teacherId": teacher.id, "subject": "Homework", "content": "<>"}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "content");

    let (status, body) = app
        .post(
            "/api/class/homework/send",
            json!({"classId": " <> ", "teacherId": teacher.id, "subject": "Homework", "content": "Page 12"}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "classId");

    let (status, body) = app
        .post(
            "/api/class/homework/send",
            json!({"classId": "3B", "subject": "Homework", "content": "Page 12"}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "teacherId is required");

    let (status, _) = app
        .post(
            "/api/class/homework/send",
            json!({"classId": "4C", "teacherId": teacher.id, "subject": "Homework", "content": "Page 12"}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/api/class/homework/send",
            json!({"classId": "3B", "teacherId": other.id, "subject": "Homework", "content": "Page 12"}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/api/class/homework/send",
            json!({"classId": "3B", "teacherId": teacher.id, "subject": "Homework", "content": "Page 12"}),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_send_class_message() {
    let app = TestApp::new();
    let (teacher, token) = app.user_with_token(UserRole::Teacher).await;
    app.state.classes.assign_class(teacher.id, "3B").await.unwrap();

    let (status, body) = app
        .post(
            "/api/communication/send-class-message",
            json!({"classId": "3B", "senderId": teacher.id, "content": "Trip on Friday\n"}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["message"].as_str().is_some());
    assert_eq!(body["classMessage"]["classId"], "3B");
    assert_eq!(body["classMessage"]["senderId"], teacher.id.to_string());
    assert_eq!(body["classMessage"]["content"], "Trip on Friday");
    assert!(body["classMessage"].get("sentAt").is_some());

    let (status, body) = app
        .post(
            "/api/communication/send-class-message",
            json!({"classId": "3B", "senderId": teacher.id, "content": ""}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "content");

    let (status, body) = app
        .post(
            "/api/communication/send-class-message",
            json!({"classId": "3B", "senderId": teacher.id, "content": " < > "}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "content");

    let (status, _) = app
        .post(
            "/api/communication/send-class-message",
            json!({"classId": "1A", "senderId": teacher.id, "content": "Hello"}),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

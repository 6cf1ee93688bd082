mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn admin_creates_user_with_explicit_role() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;

    let response = app
        .post("/api/users")
        .bearer_auth(&admin_token)
        .json(&json!({
            "username": "bob",
            "email": "bob@x.com",
            "password": "P@ssw0rd1",
            "role": "ADMIN"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "bob");
    assert_eq!(body["data"]["email"], "bob@x.com");
    assert_eq!(body["data"]["role"], "ADMIN");
    assert_eq!(body["data"]["enabled"], true);
    assert!(body["data"]["id"].is_string());
    // The hash never leaves the service.
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn admin_create_user_defaults_to_user_role() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;

    let response = app
        .post("/api/users")
        .bearer_auth(&admin_token)
        .json(&json!({
            "username": "bob",
            "email": "bob@x.com",
            "password": "P@ssw0rd1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["role"], "USER");
}

#[tokio::test]
async fn admin_create_user_duplicate_email_conflicts() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;
    app.register("bob", "bob@x.com", "P@ssw0rd1").await;

    let response = app
        .post("/api/users")
        .bearer_auth(&admin_token)
        .json(&json!({
            "username": "robert",
            "email": "bob@x.com",
            "password": "P@ssw0rd1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_create_user_duplicate_username_conflicts() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;
    app.register("bob", "bob@x.com", "P@ssw0rd1").await;

    let response = app
        .post("/api/users")
        .bearer_auth(&admin_token)
        .json(&json!({
            "username": "bob",
            "email": "other@x.com",
            "password": "P@ssw0rd1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_create_user_invalid_username_is_unprocessable() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;

    let response = app
        .post("/api/users")
        .bearer_auth(&admin_token)
        .json(&json!({
            "username": "x",
            "email": "bob@x.com",
            "password": "P@ssw0rd1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn admin_lists_and_gets_users() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;
    app.register("bob", "bob@x.com", "P@ssw0rd1").await;

    let response = app
        .get("/api/users")
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);

    let bob = users.iter().find(|u| u["username"] == "bob").unwrap();
    let bob_id = bob["id"].as_str().unwrap();

    let response = app
        .get(&format!("/api/users/{}", bob_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["email"], "bob@x.com");
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;

    let response = app
        .get("/api/users/00000000-0000-0000-0000-000000000000")
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_user_with_malformed_id_is_unprocessable() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;

    let response = app
        .get("/api/users/not-a-uuid")
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn admin_updates_role_and_flags() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;
    let session = app.register("bob", "bob@x.com", "P@ssw0rd1").await;

    let claims = app
        .authenticator
        .token_codec()
        .validate(session["accessToken"].as_str().unwrap())
        .unwrap();
    let bob_id = claims.user_id.unwrap();

    let response = app
        .put(&format!("/api/users/{}", bob_id))
        .bearer_auth(&admin_token)
        .json(&json!({
            "role": "ADMIN",
            "enabled": false
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["role"], "ADMIN");
    assert_eq!(body["data"]["enabled"], false);
    // Fields absent from the request are untouched.
    assert_eq!(body["data"]["username"], "bob");
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;

    let response = app
        .put("/api/users/00000000-0000-0000-0000-000000000000")
        .bearer_auth(&admin_token)
        .json(&json!({ "role": "ADMIN" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_deletes_user() {
    let app = TestApp::spawn().await;
    let admin_token = app.seed_admin("admin@x.com", "Adm1n!pass").await;
    let session = app.register("bob", "bob@x.com", "P@ssw0rd1").await;

    let claims = app
        .authenticator
        .token_codec()
        .validate(session["accessToken"].as_str().unwrap())
        .unwrap();
    let bob_id = claims.user_id.unwrap();

    let response = app
        .delete(&format!("/api/users/{}", bob_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get(&format!("/api/users/{}", bob_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_role_cannot_administer_users() {
    let app = TestApp::spawn().await;
    let session = app.register("bob", "bob@x.com", "P@ssw0rd1").await;
    let token = session["accessToken"].as_str().unwrap();

    let response = app
        .post("/api/users")
        .bearer_auth(token)
        .json(&json!({
            "username": "eve",
            "email": "eve@x.com",
            "password": "P@ssw0rd1"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn anonymous_cannot_administer_users() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

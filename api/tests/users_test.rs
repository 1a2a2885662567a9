//! Integration tests for back office user management

mod common;

use actix_web::test;
use mb_api::create_app;
use serde_json::{json, Value};

use common::{TestContext, ADMIN_EMAIL};

#[actix_web::test]
async fn test_create_and_get_user() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(ctx.bearer())
        .set_json(json!({
            "name": "Sari Teller",
            "email": "Sari@MiniBank.test",
            "password": "Tell3r!pw",
            "password_confirm": "Tell3r!pw",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["email"], "sari@minibank.test");
    assert!(created.get("password_hash").is_none());

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}", created["id"].as_str().expect("id")))
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["name"], "Sari Teller");
}

#[actix_web::test]
async fn test_create_user_duplicate_email_conflicts() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(ctx.bearer())
        .set_json(json!({
            "name": "Another Admin",
            "email": ADMIN_EMAIL,
            "password": "Tell3r!pw",
            "password_confirm": "Tell3r!pw",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["details"]["field"], "email");
}

#[actix_web::test]
async fn test_create_user_weak_password() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(ctx.bearer())
        .set_json(json!({
            "name": "Sari Teller",
            "email": "sari@minibank.test",
            "password": "weakpass",
            "password_confirm": "weakpass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["password"].is_array());
}

#[actix_web::test]
async fn test_list_users_paginates() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users?page=1&per_page=10")
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["data"][0]["email"], ADMIN_EMAIL);
}

#[actix_web::test]
async fn test_delete_user() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let uri = format!("/api/v1/users/{}", ctx.admin.id);
    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], ctx.admin.id.to_string());

    // Tokens stay valid until expiry, so the lookup itself reports 404
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(ctx.bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_get_user_with_malformed_id() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/not-a-uuid")
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

async fn create_teller(ctx: &TestContext, name: &str, email: &str) -> mb_core::User {
    ctx.state
        .user_service
        .create(mb_core::NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "Tell3r!pw".to_string(),
            password_confirm: "Tell3r!pw".to_string(),
        })
        .await
        .expect("seed user")
}

#[actix_web::test]
async fn test_list_users_search_and_sort() {
    let ctx = TestContext::new().await;
    create_teller(&ctx, "Teller", "zed@minibank.test").await;
    create_teller(&ctx, "Teller", "bea@minibank.test").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    // Default order is by email
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(ctx.bearer())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["data"][0]["email"], ADMIN_EMAIL);
    assert_eq!(body["data"][1]["email"], "bea@minibank.test");

    let req = test::TestRequest::get()
        .uri("/api/v1/users?search=name:Teller&sort=email:desc&per_page=1")
        .insert_header(ctx.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["email"], "zed@minibank.test");
}

#[actix_web::test]
async fn test_list_users_rejects_unknown_field() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    for uri in [
        "/api/v1/users?search=password_hash:x",
        "/api/v1/users?sort=email:sideways",
        "/api/v1/users?search=teller",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(ctx.bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }
}

#[actix_web::test]
async fn test_update_user() {
    let ctx = TestContext::new().await;
    let teller = create_teller(&ctx, "Teller", "teller@minibank.test").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", teller.id))
        .insert_header(ctx.bearer())
        .set_json(json!({ "name": "Head Teller", "email": "Head@MiniBank.test" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Head Teller");
    assert_eq!(body["email"], "head@minibank.test");

    // Taking the admin's email conflicts
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", teller.id))
        .insert_header(ctx.bearer())
        .set_json(json!({ "name": "Head Teller", "email": ADMIN_EMAIL }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["field"], "email");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", uuid::Uuid::new_v4()))
        .insert_header(ctx.bearer())
        .set_json(json!({ "name": "Ghost", "email": "ghost@minibank.test" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_update_user_rejects_invalid_body() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", ctx.admin.id))
        .insert_header(ctx.bearer())
        .set_json(json!({ "name": "", "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["email"].is_array());
}

#[actix_web::test]
async fn test_change_user_password() {
    let ctx = TestContext::new().await;
    let teller = create_teller(&ctx, "Teller", "teller@minibank.test").await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;
    let uri = format!("/api/v1/users/{}/change-password", teller.id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(ctx.bearer())
        .set_json(json!({
            "password_old": "Wr0ng!pw",
            "password_new": "N3w!pass",
            "password_confirm": "N3w!pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CREDENTIALS");

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(ctx.bearer())
        .set_json(json!({
            "password_old": "Tell3r!pw",
            "password_new": "N3w!pass",
            "password_confirm": "N3w!pass",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], teller.id.to_string());

    // The new password now logs in
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "teller@minibank.test", "password": "N3w!pass" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_change_user_password_mismatch() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/users/{}/change-password", ctx.admin.id))
        .insert_header(ctx.bearer())
        .set_json(json!({
            "password_old": common::ADMIN_PASSWORD,
            "password_new": "N3w!pass",
            "password_confirm": "Diff3r!nt",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "PASSWORD_MISMATCH");
}

#[actix_web::test]
async fn test_user_endpoints_require_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.config)).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/users/{}", ctx.admin.id))
        .set_json(json!({ "name": "Nobody", "email": "nobody@minibank.test" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}

//! E2E tests: project endpoints.

use actix_web::{http::header, test};
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_list_and_get_project() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, created) = post_json(
        &app,
        "/proyectos",
        json!({"nombre": "P1", "cliente": "C1", "responsable": "O1"}),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["nombre"], "P1");
    assert_eq!(created["cliente"], "C1");
    assert_eq!(created["responsable"], "O1");
    assert_eq!(created["activo"], true);
    assert!(created["creadoEn"].is_string());

    let id = created["id"].as_i64().unwrap();

    let (status, list) = get_json(&app, "/proyectos").await;
    assert_eq!(status, 200);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], id);

    let (status, one) = get_json(&app, &format!("/proyectos/{}", id)).await;
    assert_eq!(status, 200);
    assert_eq!(one["nombre"], "P1");
}

#[actix_rt::test]
async fn test_inactive_project_is_kept_inactive() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, created) = post_json(
        &app,
        "/proyectos",
        json!({"nombre": "Legacy", "cliente": "C1", "responsable": "O1", "activo": false}),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["activo"], false);
}

#[actix_rt::test]
async fn test_missing_project_returns_404() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, body) = get_json(&app, "/proyectos/999").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Project 999 not found");
}

#[actix_rt::test]
async fn test_blank_and_malformed_bodies_are_rejected() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, body) = post_json(
        &app,
        "/proyectos",
        json!({"nombre": "  ", "cliente": "C1", "responsable": "O1"}),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("nombre"));

    let req = test::TestRequest::post()
        .uri("/proyectos")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"nombre\": ")
        .to_request();
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());

    let (status, _) = post_json(&app, "/proyectos", json!({"nombre": "P1"})).await;
    assert_eq!(status, 400);

    let (_, list) = get_json(&app, "/proyectos").await;
    assert_eq!(list, json!([]));
}

#[actix_rt::test]
async fn test_non_numeric_id_is_rejected() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, _) = get_json(&app, "/proyectos/abc").await;
    assert_eq!(status, 400);
}

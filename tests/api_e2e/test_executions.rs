//! E2E tests: execution endpoints.

use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use qa_test_manager::entity::execution;

use super::test_helpers::*;

async fn seed_test_case<S>(app: &S) -> i64
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let project_id = create_project(app, "Portal").await;
    let plan = create_plan(app, project_id, "Smoke").await;
    create_test_case(app, plan["versiones"][0]["id"].as_i64().unwrap(), "Login").await
}

#[actix_rt::test]
async fn test_record_execution_with_defaults() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let case_id = seed_test_case(&app).await;

    let (status, exec) = post_json(
        &app,
        &format!("/casos/{}/ejecuciones", case_id),
        json!({"usuarioId": 17, "estado": "Fallido"}),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(exec["casoId"], case_id);
    assert_eq!(exec["usuarioId"], "17");
    assert_eq!(exec["estado"], "Fallido");
    assert_eq!(exec["tiempoReal"], 0);
    assert!(exec["observaciones"].is_null());
    assert!(exec["fecha"].is_string());
    assert_eq!(exec["evidencias"], json!([]));
}

#[actix_rt::test]
async fn test_execution_keeps_given_date_and_notes() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let case_id = seed_test_case(&app).await;

    let (status, exec) = post_json(
        &app,
        &format!("/casos/{}/ejecuciones", case_id),
        json!({
            "usuarioId": "ana",
            "estado": "Exitoso",
            "tiempoReal": 12,
            "observaciones": "Sin incidencias",
            "fecha": "2025-06-02T09:15:00Z",
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(exec["tiempoReal"], 12);
    assert_eq!(exec["observaciones"], "Sin incidencias");
    assert!(exec["fecha"].as_str().unwrap().starts_with("2025-06-02T09:15:00"));
}

#[actix_rt::test]
async fn test_execution_for_missing_case_is_not_created() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, body) = post_json(
        &app,
        "/casos/31/ejecuciones",
        json!({"usuarioId": "ana", "estado": "Exitoso"}),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Test case 31 not found");

    let count = execution::Entity::find()
        .count(ctx.pool.connection())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_rt::test]
async fn test_blank_status_is_rejected() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let case_id = seed_test_case(&app).await;

    let (status, _) = post_json(
        &app,
        &format!("/casos/{}/ejecuciones", case_id),
        json!({"usuarioId": "ana", "estado": ""}),
    )
    .await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_execution_listing_includes_evidence() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let (case_id, first) = seed_execution(&app).await;
    let second = create_execution(&app, case_id).await;

    let (status, _) = upload_evidence(
        &app,
        first,
        &[FormPart::file("evidencia", "a.png", "image/png", PNG_BYTES)],
    )
    .await;
    assert_eq!(status, 201);

    let (status, list) = get_json(&app, &format!("/casos/{}/ejecuciones", case_id)).await;
    assert_eq!(status, 200);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], first);
    assert_eq!(list[0]["evidencias"].as_array().unwrap().len(), 1);
    assert_eq!(list[0]["evidencias"][0]["ejecucionId"], first);
    assert_eq!(list[1]["id"], second);
    assert_eq!(list[1]["evidencias"], json!([]));

    let other_case = {
        let plan_versions = get_json(&app, "/planes").await.1;
        let version_id = plan_versions[0]["versiones"][0]["id"].as_i64().unwrap();
        create_test_case(&app, version_id, "Other").await
    };
    let (_, other) = get_json(&app, &format!("/casos/{}/ejecuciones", other_case)).await;
    assert_eq!(other, json!([]));
}

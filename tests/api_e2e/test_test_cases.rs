//! E2E tests: test case endpoints and cascading delete.

use actix_web::test;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use qa_test_manager::entity::{evidence, execution, test_case};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_test_case_defaults_estimate() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let project_id = create_project(&app, "Portal").await;
    let plan = create_plan(&app, project_id, "Smoke").await;
    let version_id = plan["versiones"][0]["id"].as_i64().unwrap();

    let (status, case) = post_json(
        &app,
        &format!("/versiones/{}/casos", version_id),
        json!({
            "titulo": "Login",
            "pasos": "1. abrir",
            "resultadoEsperado": "ok",
            "prioridad": "Alta",
            "asignadoA": "ana",
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(case["versionId"], version_id);
    assert_eq!(case["estimado"], 1);

    let (status, case) = post_json(
        &app,
        &format!("/versiones/{}/casos", version_id),
        json!({
            "titulo": "Logout",
            "pasos": "1. salir",
            "resultadoEsperado": "ok",
            "prioridad": "Baja",
            "estimado": 15,
            "asignadoA": "luis",
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(case["estimado"], 15);

    let (status, cases) = get_json(&app, &format!("/versiones/{}/casos", version_id)).await;
    assert_eq!(status, 200);
    assert_eq!(cases.as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_test_case_for_missing_version_is_not_created() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, body) = post_json(
        &app,
        "/versiones/5/casos",
        json!({
            "titulo": "Login",
            "pasos": "1. abrir",
            "resultadoEsperado": "ok",
            "prioridad": "Alta",
            "asignadoA": "ana",
        }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Version 5 not found");

    let count = test_case::Entity::find()
        .count(ctx.pool.connection())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_rt::test]
async fn test_negative_estimate_is_rejected() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let project_id = create_project(&app, "Portal").await;
    let plan = create_plan(&app, project_id, "Smoke").await;

    let (status, _) = post_json(
        &app,
        &format!("/versiones/{}/casos", plan["versiones"][0]["id"]),
        json!({
            "titulo": "Login",
            "pasos": "1. abrir",
            "resultadoEsperado": "ok",
            "prioridad": "Alta",
            "estimado": -3,
            "asignadoA": "ana",
        }),
    )
    .await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_test_cases_are_scoped_to_version() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let project_id = create_project(&app, "Portal").await;
    let plan = create_plan(&app, project_id, "Smoke").await;
    let initial = plan["versiones"][0]["id"].as_i64().unwrap();

    let (_, second) = post_json(
        &app,
        &format!("/planes/{}/versiones", plan["id"]),
        json!({"nombre": "v2"}),
    )
    .await;
    let second = second["id"].as_i64().unwrap();

    create_test_case(&app, initial, "Old flow").await;
    create_test_case(&app, second, "New flow").await;

    let (_, cases) = get_json(&app, &format!("/versiones/{}/casos", second)).await;
    let cases = cases.as_array().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0]["titulo"], "New flow");
    assert_eq!(cases[0]["versionId"], second);
}

#[actix_rt::test]
async fn test_delete_removes_executions_and_evidence() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let (case_id, execution_id) = seed_execution(&app).await;

    let (status, _) = upload_evidence(
        &app,
        execution_id,
        &[FormPart::file("evidencia", "shot.png", "image/png", PNG_BYTES)],
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(ctx.stored_file_count(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/casos/{}", case_id))
        .to_request();
    let (status, body) = send_json(&app, req).await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], case_id);
    assert!(body["mensaje"].is_string());

    let conn = ctx.pool.connection();
    assert_eq!(test_case::Entity::find().count(conn).await.unwrap(), 0);
    assert_eq!(execution::Entity::find().count(conn).await.unwrap(), 0);
    assert_eq!(evidence::Entity::find().count(conn).await.unwrap(), 0);
    assert_eq!(ctx.stored_file_count(), 0);

    let (status, _) = get_json(&app, &format!("/casos/{}/ejecuciones", case_id)).await;
    assert_eq!(status, 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/casos/{}", case_id))
        .to_request();
    let (status, _) = send_json(&app, req).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_delete_removes_evidence_of_every_execution_only() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let (case_id, first_execution) = seed_execution(&app).await;
    let second_execution = create_execution(&app, case_id).await;
    let (other_case, other_execution) = seed_execution(&app).await;

    for execution_id in [first_execution, second_execution, other_execution] {
        let (status, _) = upload_evidence(
            &app,
            execution_id,
            &[FormPart::file("evidencia", "shot.png", "image/png", PNG_BYTES)],
        )
        .await;
        assert_eq!(status, 201);
    }
    assert_eq!(ctx.stored_file_count(), 3);

    let req = test::TestRequest::delete()
        .uri(&format!("/casos/{}", case_id))
        .to_request();
    let (status, _) = send_json(&app, req).await;
    assert_eq!(status, 200);

    let conn = ctx.pool.connection();
    assert_eq!(execution::Entity::find().count(conn).await.unwrap(), 1);
    assert_eq!(evidence::Entity::find().count(conn).await.unwrap(), 1);
    assert_eq!(ctx.stored_file_count(), 1);

    let (status, remaining) =
        get_json(&app, &format!("/ejecuciones/{}/evidencia", other_execution)).await;
    assert_eq!(status, 200);
    assert_eq!(remaining.as_array().unwrap().len(), 1);

    let (status, executions) =
        get_json(&app, &format!("/casos/{}/ejecuciones", other_case)).await;
    assert_eq!(status, 200);
    assert_eq!(executions.as_array().unwrap().len(), 1);
}

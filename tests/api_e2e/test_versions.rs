//! E2E tests: version endpoints.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_and_list_versions() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let project_id = create_project(&app, "Portal").await;
    let plan = create_plan(&app, project_id, "Smoke").await;
    let plan_id = plan["id"].as_i64().unwrap();

    let (status, version) = post_json(
        &app,
        &format!("/planes/{}/versiones", plan_id),
        json!({"nombre": "v2.0", "fechaInicio": "2025-03-01", "fechaFin": "2025-03-31"}),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(version["nombre"], "v2.0");
    assert_eq!(version["planId"], plan_id);
    assert!(version["fechaInicio"].as_str().unwrap().starts_with("2025-03-01"));
    assert!(version["fechaFin"].as_str().unwrap().starts_with("2025-03-31"));

    let (status, versions) = get_json(&app, &format!("/planes/{}/versiones", plan_id)).await;
    assert_eq!(status, 200);
    let names: Vec<&str> = versions
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Versión Inicial", "v2.0"]);

    let (status, one) = get_json(&app, &format!("/versiones/{}", version["id"])).await;
    assert_eq!(status, 200);
    assert_eq!(one["nombre"], "v2.0");
}

#[actix_rt::test]
async fn test_version_dates_are_optional() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let project_id = create_project(&app, "Portal").await;
    let plan = create_plan(&app, project_id, "Smoke").await;

    let (status, version) = post_json(
        &app,
        &format!("/planes/{}/versiones", plan["id"]),
        json!({"nombre": "hotfix", "fechaFin": ""}),
    )
    .await;
    assert_eq!(status, 201);
    assert!(version["fechaInicio"].is_string());
    assert!(version["fechaFin"].is_null());
}

#[actix_rt::test]
async fn test_end_before_start_is_rejected() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let project_id = create_project(&app, "Portal").await;
    let plan = create_plan(&app, project_id, "Smoke").await;

    let (status, _) = post_json(
        &app,
        &format!("/planes/{}/versiones", plan["id"]),
        json!({"nombre": "v3", "fechaInicio": "2025-05-10", "fechaFin": "2025-05-01"}),
    )
    .await;
    assert_eq!(status, 400);

    let (_, versions) = get_json(&app, &format!("/planes/{}/versiones", plan["id"])).await;
    assert_eq!(versions.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_versions_of_missing_plan() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;

    let (status, body) = post_json(&app, "/planes/77/versiones", json!({"nombre": "v1"})).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Plan 77 not found");

    let (status, _) = get_json(&app, "/planes/77/versiones").await;
    assert_eq!(status, 404);

    let (status, _) = get_json(&app, "/versiones/77").await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_versions_are_scoped_to_plan() {
    let ctx = TestContext::new().await;
    let app = create_test_app(&ctx).await;
    let project_id = create_project(&app, "Portal").await;
    let first = create_plan(&app, project_id, "First").await;
    let second = create_plan(&app, project_id, "Second").await;

    post_json(
        &app,
        &format!("/planes/{}/versiones", first["id"]),
        json!({"nombre": "only-first"}),
    )
    .await;

    let (_, versions) = get_json(&app, &format!("/planes/{}/versiones", second["id"])).await;
    let versions = versions.as_array().unwrap();
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0]["planId"], second["id"]);
}

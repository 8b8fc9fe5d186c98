//! Shared test helpers for API E2E tests.

use actix_files::Files;
use actix_web::{App, dev::ServiceResponse, http::header, test, web};
use qa_test_manager::api;
use qa_test_manager::config::DatabaseSettings;
use qa_test_manager::db::DbPool;
use qa_test_manager::middleware::RequestLogger;
use qa_test_manager::services::{EvidenceStore, PUBLIC_PREFIX};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Evidence size limit used unless a test asks for another one.
pub const TEST_MAX_EVIDENCE_SIZE: usize = 1024 * 1024;

/// A minimal PNG signature followed by filler bytes.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

const BOUNDARY: &str = "qa-test-boundary-7MA4YWxkTrZu0gW";

/// Database, evidence store and the temp dir backing it.
pub struct TestContext {
    pub pool: DbPool,
    pub store: EvidenceStore,
    _upload_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_max_evidence_size(TEST_MAX_EVIDENCE_SIZE).await
    }

    /// Fresh in-memory database with migrations applied.
    ///
    /// A single pooled connection keeps the in-memory database alive and
    /// shared between queries.
    pub async fn with_max_evidence_size(max_size: usize) -> Self {
        let settings = DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        };
        let pool = DbPool::new(&settings)
            .await
            .expect("Failed to open in-memory database");
        pool.run_migrations()
            .await
            .expect("Failed to run migrations");

        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let store = EvidenceStore::new(upload_dir.path(), max_size);

        Self {
            pool,
            store,
            _upload_dir: upload_dir,
        }
    }

    /// Number of files currently in the upload directory.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.store.root())
            .expect("Failed to read upload dir")
            .count()
    }
}

/// Create the test app with every API route and the `/uploads` file service.
pub async fn create_test_app(
    ctx: &TestContext,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(ctx.pool.clone()))
            .app_data(web::Data::new(ctx.store.clone()))
            .service(Files::new(PUBLIC_PREFIX, ctx.store.root().to_path_buf()))
            .configure(api::configure_routes),
    )
    .await
}

/// Send a request and return the status with the JSON body.
pub async fn send_json<S>(app: &S, req: actix_http::Request) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

/// GET a path and return the status with the JSON body.
pub async fn get_json<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send_json(app, test::TestRequest::get().uri(uri).to_request()).await
}

/// POST a JSON body and return the status with the JSON body.
pub async fn post_json<S>(app: &S, uri: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    send_json(
        app,
        test::TestRequest::post().uri(uri).set_json(body).to_request(),
    )
    .await
}

/// Create a project and return its id.
pub async fn create_project<S>(app: &S, name: &str) -> i64
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post_json(
        app,
        "/proyectos",
        json!({"nombre": name, "cliente": "ACME", "responsable": "qa-lead"}),
    )
    .await;
    assert_eq!(status, 201, "Failed to create project: {}", body);
    body["id"].as_i64().unwrap()
}

/// Create a plan under a project and return the response body.
pub async fn create_plan<S>(app: &S, project_id: i64, name: &str) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post_json(
        app,
        &format!("/proyectos/{}/planes", project_id),
        json!({
            "nombre": name,
            "criticidad": "Alta",
            "descripcion": "Regression suite",
            "responsable": "qa-lead",
        }),
    )
    .await;
    assert_eq!(status, 201, "Failed to create plan: {}", body);
    body
}

/// Create a test case in a version and return its id.
pub async fn create_test_case<S>(app: &S, version_id: i64, title: &str) -> i64
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post_json(
        app,
        &format!("/versiones/{}/casos", version_id),
        json!({
            "titulo": title,
            "pasos": "1. Abrir la app\n2. Iniciar sesión",
            "resultadoEsperado": "El panel principal se muestra",
            "prioridad": "Alta",
            "asignadoA": "ana",
        }),
    )
    .await;
    assert_eq!(status, 201, "Failed to create test case: {}", body);
    body["id"].as_i64().unwrap()
}

/// Record an execution of a test case and return its id.
pub async fn create_execution<S>(app: &S, test_case_id: i64) -> i64
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = post_json(
        app,
        &format!("/casos/{}/ejecuciones", test_case_id),
        json!({"usuarioId": "ana", "estado": "Exitoso", "tiempoReal": 4}),
    )
    .await;
    assert_eq!(status, 201, "Failed to create execution: {}", body);
    body["id"].as_i64().unwrap()
}

/// Build project → plan → initial version → test case → execution.
///
/// Returns `(test_case_id, execution_id)`.
pub async fn seed_execution<S>(app: &S) -> (i64, i64)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let project_id = create_project(app, "Portal").await;
    let plan = create_plan(app, project_id, "Smoke").await;
    let version_id = plan["versiones"][0]["id"].as_i64().unwrap();
    let case_id = create_test_case(app, version_id, "Login").await;
    let execution_id = create_execution(app, case_id).await;
    (case_id, execution_id)
}

/// One part of a multipart form.
pub struct FormPart<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> FormPart<'a> {
    pub fn file(name: &'a str, filename: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            filename: Some(filename),
            content_type: Some(content_type),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

/// Encode parts as `multipart/form-data`, returning the content type and body.
pub fn multipart_body(parts: &[FormPart<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// POST a multipart form to an execution's evidence endpoint.
pub async fn upload_evidence<S>(app: &S, execution_id: i64, parts: &[FormPart<'_>]) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (content_type, body) = multipart_body(parts);
    let req = test::TestRequest::post()
        .uri(&format!("/ejecuciones/{}/evidencia", execution_id))
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
        .to_request();
    send_json(app, req).await
}

//! Evidence upload API handlers.

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::EvidenceResponse;
use crate::services::{EvidenceStore, StoredEvidence};

/// Multipart field carrying the image.
pub const EVIDENCE_FIELD: &str = "evidencia";
/// Optional multipart text field.
pub const DESCRIPTION_FIELD: &str = "descripcion";

const MAX_DESCRIPTION_BYTES: usize = 2048;

/// Multipart form accepted by the upload endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct EvidenceUploadForm {
    /// Image file (`image/*`).
    #[schema(value_type = String, format = Binary)]
    evidencia: Vec<u8>,
    /// Free-text description of what the image shows.
    descripcion: Option<String>,
}

#[derive(Default)]
struct UploadForm {
    file: Option<StoredEvidence>,
    description: Option<String>,
}

/// List the evidence attached to an execution.
#[utoipa::path(
    get,
    path = "/ejecuciones/{id}/evidencia",
    tag = "Evidence",
    params(("id" = i32, Path, description = "Execution ID")),
    responses(
        (status = 200, description = "Evidence of the execution", body = [EvidenceResponse]),
        (status = 404, description = "Execution not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_evidence(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let execution_id = path.into_inner();
    if pool.get_execution_by_id(execution_id).await?.is_none() {
        return Err(AppError::not_found("Execution", execution_id));
    }

    let evidence: Vec<EvidenceResponse> = pool
        .list_evidence_for_execution(execution_id)
        .await?
        .into_iter()
        .map(EvidenceResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(evidence))
}

/// Upload an evidence image for an execution.
///
/// The image is written to the upload directory first and the row is
/// recorded afterwards. A failed insert removes the written file.
#[utoipa::path(
    post,
    path = "/ejecuciones/{id}/evidencia",
    tag = "Evidence",
    params(("id" = i32, Path, description = "Execution ID")),
    request_body(content = EvidenceUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Evidence stored", body = EvidenceResponse),
        (status = 400, description = "Missing or malformed file field", body = crate::error::ErrorResponse),
        (status = 404, description = "Execution not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Rejected or failed upload", body = crate::error::ErrorResponse),
    )
)]
pub async fn upload_evidence(
    pool: web::Data<DbPool>,
    store: web::Data<EvidenceStore>,
    path: web::Path<i32>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let execution_id = path.into_inner();
    if pool.get_execution_by_id(execution_id).await?.is_none() {
        return Err(AppError::not_found("Execution", execution_id));
    }

    let mut form = UploadForm::default();
    if let Err(err) = read_upload_form(&mut payload, &store, &mut form).await {
        if let Some(stored) = form.file.take() {
            discard(&store, &stored).await;
        }
        return Err(err);
    }

    let stored = form.file.ok_or_else(|| {
        AppError::InvalidInput(format!("Missing file field '{}'", EVIDENCE_FIELD))
    })?;

    let evidence = match pool
        .insert_evidence(execution_id, stored.url.clone(), form.description)
        .await
    {
        Ok(evidence) => evidence,
        Err(err) => {
            discard(&store, &stored).await;
            return Err(err);
        }
    };

    info!(
        "Evidence uploaded: id={}, execution_id={}, url={}, size={}",
        evidence.id, execution_id, evidence.url, stored.size
    );

    Ok(HttpResponse::Created().json(EvidenceResponse::from(evidence)))
}

async fn read_upload_form(
    payload: &mut Multipart,
    store: &EvidenceStore,
    form: &mut UploadForm,
) -> AppResult<()> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .map(str::to_string);

        // A part without a filename is a plain text value, never the file.
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        match (name.as_deref(), filename) {
            (Some(EVIDENCE_FIELD), Some(filename)) if form.file.is_none() => {
                let content_type = field.content_type().map(|m| m.essence_str().to_string());
                let extension =
                    EvidenceStore::image_extension(content_type.as_deref(), Some(&filename))?;
                form.file = Some(store.store(&mut field, &extension).await?);
            }
            (Some(DESCRIPTION_FIELD), _) => {
                let text = read_text_field(&mut field).await?;
                form.description = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => drain(&mut field).await?,
        }
    }

    Ok(())
}

async fn read_text_field(field: &mut Field) -> AppResult<String> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
        if data.len() + chunk.len() > MAX_DESCRIPTION_BYTES {
            return Err(AppError::InvalidInput(format!(
                "'{}' exceeds {} bytes",
                DESCRIPTION_FIELD, MAX_DESCRIPTION_BYTES
            )));
        }
        data.extend_from_slice(&chunk);
    }

    String::from_utf8(data)
        .map_err(|_| AppError::InvalidInput(format!("'{}' must be UTF-8", DESCRIPTION_FIELD)))
}

async fn drain(field: &mut Field) -> AppResult<()> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
    }
    Ok(())
}

async fn discard(store: &EvidenceStore, stored: &StoredEvidence) {
    if let Err(e) = store.remove_by_url(&stored.url).await {
        warn!("Failed to remove evidence file {}: {}", stored.file_name, e);
    }
}

/// Configure evidence routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ejecuciones/{id}/evidencia")
            .route(web::get().to(list_evidence))
            .route(web::post().to(upload_evidence)),
    );
}

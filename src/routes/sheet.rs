use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::errors::AppError;
use crate::models::requests::{ChecklistWriteBody, StatusUpdateBody};
use crate::models::responses::{ChecklistPayload, ResetAck, StatusAck, WriteAck};
use crate::repositories::ChecklistRepository;
use crate::state::AppState;
use crate::validation::validate_status_update;

#[utoipa::path(
    get,
    path = "/sheet",
    tag = "Checklist",
    responses(
        (status = 200, description = "Every bar on the checklist", body = ChecklistPayload),
        (status = 500, description = "Spreadsheet not configured"),
        (status = 502, description = "Spreadsheet failure")
    )
)]
pub async fn get_sheet(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let store = state.store()?;
    let bars = ChecklistRepository::list(store).await?;
    Ok(HttpResponse::Ok().json(ChecklistPayload { bars }))
}

#[utoipa::path(
    post,
    path = "/sheet",
    tag = "Checklist",
    request_body = ChecklistWriteBody,
    responses(
        (status = 200, description = "Checklist replaced", body = WriteAck),
        (status = 400, description = "Missing bars array"),
        (status = 502, description = "Spreadsheet failure")
    )
)]
pub async fn write_sheet(
    state: web::Data<AppState>,
    body: web::Json<ChecklistWriteBody>,
) -> ActixResult<HttpResponse> {
    let bars = body
        .bars
        .as_deref()
        .ok_or_else(|| AppError::Validation("Missing bars array in body".into()))?;

    let store = state.store()?;
    let count = ChecklistRepository::replace(store, bars).await?;
    log::info!("Checklist replaced with {count} bars");

    Ok(HttpResponse::Ok().json(WriteAck { ok: true, count }))
}

#[utoipa::path(
    post,
    path = "/sheet-status",
    tag = "Checklist",
    request_body = StatusUpdateBody,
    responses(
        (status = 200, description = "Check status updated", body = StatusAck),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Bar not on the checklist"),
        (status = 502, description = "Spreadsheet failure")
    )
)]
pub async fn update_status(
    state: web::Data<AppState>,
    body: web::Json<StatusUpdateBody>,
) -> ActixResult<HttpResponse> {
    let (place_id, check_status) = validate_status_update(&body)?;

    let store = state.store()?;
    ChecklistRepository::set_status(store, &place_id, check_status).await?;

    Ok(HttpResponse::Ok().json(StatusAck {
        ok: true,
        place_id,
        check_status,
    }))
}

#[utoipa::path(
    post,
    path = "/sheet-reset",
    tag = "Checklist",
    responses(
        (status = 200, description = "Every bar set back to unchecked", body = ResetAck),
        (status = 502, description = "Spreadsheet failure")
    )
)]
pub async fn reset_sheet(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let store = state.store()?;
    let ack = match ChecklistRepository::reset(store).await? {
        Some(count) => ResetAck {
            ok: true,
            reset_count: Some(count),
            message: None,
        },
        None => ResetAck {
            ok: true,
            reset_count: None,
            message: Some("Nothing to reset".into()),
        },
    };
    Ok(HttpResponse::Ok().json(ack))
}

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::models::requests::HintBody;
use crate::models::responses::{HintAck, HintsPayload, OkPayload};
use crate::repositories::HintsRepository;
use crate::state::AppState;
use crate::validation::validate_hint;

#[utoipa::path(
    get,
    path = "/hints",
    tag = "Hints",
    responses(
        (status = 200, description = "Hints in the order they were added", body = HintsPayload),
        (status = 502, description = "Spreadsheet failure")
    )
)]
pub async fn get_hints(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let store = state.store()?;
    let hints = HintsRepository::list(store).await?;
    Ok(HttpResponse::Ok().json(HintsPayload { hints }))
}

#[utoipa::path(
    post,
    path = "/hints",
    tag = "Hints",
    request_body = HintBody,
    responses(
        (status = 200, description = "Hint recorded", body = HintAck),
        (status = 400, description = "Blank hint"),
        (status = 502, description = "Spreadsheet failure")
    )
)]
pub async fn add_hint(
    state: web::Data<AppState>,
    body: web::Json<HintBody>,
) -> ActixResult<HttpResponse> {
    let text = validate_hint(body.hint.as_deref())?;

    let store = state.store()?;
    let hint = HintsRepository::add(store, &text).await?;

    Ok(HttpResponse::Ok().json(HintAck {
        ok: true,
        hint: hint.text,
        timestamp: hint.timestamp,
    }))
}

#[utoipa::path(
    post,
    path = "/hints-reset",
    tag = "Hints",
    responses(
        (status = 200, description = "All hints removed", body = OkPayload),
        (status = 502, description = "Spreadsheet failure")
    )
)]
pub async fn reset_hints(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let store = state.store()?;
    HintsRepository::reset(store).await?;
    Ok(HttpResponse::Ok().json(OkPayload { ok: true }))
}

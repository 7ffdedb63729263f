pub mod bars;
pub mod health;
pub mod hints;
pub mod sheet;

use actix_web::{web, Error};

use crate::config::API_PREFIX;
use crate::errors::AppError;

/// Mounts every handler under the API prefix. Extractor failures (bad query
/// numbers, malformed JSON) are turned into the same 400 body the handlers use.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
        .app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
        .service(
            web::scope(API_PREFIX)
                .route("/health", web::get().to(health::health))
                .route("/bars", web::get().to(bars::nearby_bars))
                .route("/sheet", web::get().to(sheet::get_sheet))
                .route("/sheet", web::post().to(sheet::write_sheet))
                .route("/sheet-status", web::post().to(sheet::update_status))
                .route("/sheet-reset", web::post().to(sheet::reset_sheet))
                .route("/hints", web::get().to(hints::get_hints))
                .route("/hints", web::post().to(hints::add_hint))
                .route("/hints-reset", web::post().to(hints::reset_hints)),
        );
}

fn bad_request(err: impl std::fmt::Display) -> Error {
    AppError::Validation(format!("Invalid request: {err}")).into()
}

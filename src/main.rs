mod classify;
mod config;
mod errors;
mod geometry;
mod models;
mod places;
mod repositories;
mod routes;
mod search;
mod state;
mod store;
mod validation;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use utoipa::openapi::Server;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::API_PREFIX;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chicken Run API",
        description = "Finds bars around a point by tiling the area into overlapping \
            nearby-search circles, and keeps a shared checklist of bars and hints in a \
            Google Sheets spreadsheet.",
        version = "1.0.0"
    ),
    paths(
        routes::health::health,
        routes::bars::nearby_bars,
        routes::sheet::get_sheet,
        routes::sheet::write_sheet,
        routes::sheet::update_status,
        routes::sheet::reset_sheet,
        routes::hints::get_hints,
        routes::hints::add_hint,
        routes::hints::reset_hints,
    ),
    components(schemas(
        models::HealthPayload, models::BarsQuery, models::BarSearchPayload,
        models::CoordinateInfo, models::NormalizedBar, classify::Category,
        models::ChecklistPayload, models::ChecklistBar, models::CheckStatus,
        models::ChecklistWriteBody, models::ChecklistBarInput, models::WriteAck,
        models::StatusUpdateBody, models::StatusAck, models::ResetAck,
        models::HintBody, models::Hint, models::HintsPayload, models::HintAck,
        models::OkPayload,
    )),
    tags(
        (name = "System", description = "Health and status"),
        (name = "Bars", description = "Multi-circle nearby bar search"),
        (name = "Checklist", description = "Spreadsheet-backed bar checklist"),
        (name = "Hints", description = "Free-text hints log"),
    )
)]
struct ApiDoc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
    let cfg = config::Config::from_env();

    let state = web::Data::new(AppState::from_config(&cfg));
    log::info!(
        "Places search: {}, spreadsheet store: {}",
        if state.places.is_some() { "configured" } else { "disabled" },
        if state.store.is_some() { "configured" } else { "disabled" },
    );

    let bind = format!("{}:{}", cfg.host, cfg.port);
    log::info!("Starting Chicken Run API on {bind}");
    log::info!("Swagger UI: http://{bind}{API_PREFIX}/docs/");

    let mut openapi = ApiDoc::openapi();
    openapi.servers = Some(vec![Server::new(API_PREFIX)]);

    let openapi_url: &'static str = Box::leak(format!("{API_PREFIX}/openapi.json").into_boxed_str());
    let docs_path: &'static str = Box::leak(format!("{API_PREFIX}/docs/{{_:.*}}").into_boxed_str());

    HttpServer::new(move || {
        App::new()
            .wrap(
                Logger::new(r#"%a "%r" %s %b %Dms "%{User-Agent}i""#)
                    .exclude(format!("{API_PREFIX}/health")),
            )
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .service(SwaggerUi::new(docs_path).url(openapi_url, openapi.clone()))
            .configure(routes::configure_routes)
    })
    .bind(&bind)?
    .run()
    .await
}

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::error::NotebookError;
use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
}

/// Liveness plus whether both note directories can be listed.
/// Always 200; `status` is `degraded` when either directory is unusable.
async fn health_check(data: web::Data<AppState>) -> Result<HttpResponse, NotebookError> {
    let notes = Arc::clone(&data.notes);
    let results = Arc::clone(&data.results);

    let (notes_ready, results_ready) =
        web::block(move || (notes.count().is_ok(), results.len().is_ok())).await?;

    let status = if notes_ready && results_ready {
        "ok"
    } else {
        log::warn!(
            "[HEALTH] notes dir ready: {}, results dir ready: {}",
            notes_ready,
            results_ready
        );
        "degraded"
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": status,
        "version": VERSION,
        "notes_dir_ready": notes_ready,
        "results_dir_ready": results_ready
    })))
}

async fn get_version() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}

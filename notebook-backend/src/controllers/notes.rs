//! Notes JSON API: create notes, run searches, report store status.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};
use notebook_types::{ErrorDetail, NotesInfo, ResultResponse, TextPayload};
use std::sync::Arc;

use crate::error::NotebookError;
use crate::AppState;

/// Reject malformed bodies with 422 and a `detail` message
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    log::warn!("Rejected request body: {}", detail);
    InternalError::from_response(
        err,
        HttpResponse::UnprocessableEntity().json(ErrorDetail::new(detail)),
    )
    .into()
}

// --- Create note ---

/// Write the body text as a new note
async fn create_note(
    data: web::Data<AppState>,
    body: web::Json<TextPayload>,
) -> Result<HttpResponse, NotebookError> {
    let notes = Arc::clone(&data.notes);
    let content = body.into_inner().str_data;

    let created = web::block(move || notes.create(&content)).await??;

    Ok(HttpResponse::Ok().json(ResultResponse::new(created.confirmation())))
}

// --- Search notes ---

/// Rescan all notes and replace the result set with the matches
async fn search_notes(
    data: web::Data<AppState>,
    body: web::Json<TextPayload>,
) -> Result<HttpResponse, NotebookError> {
    let search = Arc::clone(&data.search);
    let query = body.into_inner().str_data;

    let matched = web::block(move || search.search(&query)).await??;

    Ok(HttpResponse::Ok().json(ResultResponse::new(matched)))
}

// --- Notes info ---

async fn notes_info(data: web::Data<AppState>) -> Result<HttpResponse, NotebookError> {
    let notes = Arc::clone(&data.notes);
    let results = Arc::clone(&data.results);

    let (note_count, result_count) = web::block(move || -> Result<(usize, usize), NotebookError> {
        Ok((notes.count()?, results.len()?))
    })
    .await??;

    Ok(HttpResponse::Ok().json(NotesInfo {
        notes_dir: data.notes.storage().root(),
        results_dir: data.results.root(),
        note_count,
        result_count,
        match_mode: data.search.mode().as_str().to_string(),
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/note", web::post().to(create_note))
        .route("/search", web::post().to(search_notes))
        .route("/api/notes/info", web::get().to(notes_info));
}

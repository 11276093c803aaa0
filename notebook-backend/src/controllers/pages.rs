//! HTML pages: the homepage and the result browser.

use actix_web::error::{InternalError, PathError};
use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse};
use notebook_types::ErrorDetail;
use std::sync::Arc;

use crate::error::NotebookError;
use crate::AppState;

/// Reject ids that are not integers with 422 and a `detail` message
fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    log::warn!("Rejected path {}: {}", req.path(), detail);
    InternalError::from_response(
        err,
        HttpResponse::UnprocessableEntity().json(ErrorDetail::new(detail)),
    )
    .into()
}

async fn homepage(data: web::Data<AppState>) -> Result<HttpResponse, NotebookError> {
    let html = data.templates.render_home()?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

/// Show the result at `item_id` in file-name order
async fn browse(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, NotebookError> {
    let item_id = path.into_inner();
    let results = Arc::clone(&data.results);

    let entry = web::block(move || results.get(item_id)).await??;
    log::debug!("[BROWSE] {} -> {}", item_id, entry.name);

    let html = data.templates.render_browse(&entry)?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(html))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/", web::get().to(homepage))
        .route("/browse/{item_id}", web::get().to(browse));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::display_date;
    use crate::search::MatchMode;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_homepage() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory(MatchMode::Observed)))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("Notebook"));
    }

    #[actix_web::test]
    async fn test_browse_renders_result() {
        let state = AppState::in_memory(MatchMode::Observed);
        state.notes.create("hello world").unwrap();
        state.search.search("hello").unwrap();
        let name = state.results.names().unwrap().remove(0);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/browse/0").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let html = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
        assert!(html.contains("hello world"));
        assert!(html.contains(&display_date(&name)));
    }

    #[actix_web::test]
    async fn test_browse_out_of_range() {
        let state = AppState::in_memory(MatchMode::Observed);
        state.notes.create("hello world").unwrap();
        state.search.search("hello").unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(config),
        )
        .await;

        for uri in ["/browse/1", "/browse/-1"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);

            let body: ErrorDetail = test::read_body_json(resp).await;
            assert_eq!(body.detail, "Item not found");
        }
    }

    #[actix_web::test]
    async fn test_browse_non_integer_id_is_unprocessable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory(MatchMode::Observed)))
                .configure(config),
        )
        .await;

        for uri in ["/browse/abc", "/browse/1.5"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);

            let body: ErrorDetail = test::read_body_json(resp).await;
            assert!(!body.detail.is_empty());
        }
    }
}

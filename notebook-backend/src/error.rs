use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use notebook_types::ErrorDetail;
use std::io;
use std::path::Path;

pub type Result<T> = std::result::Result<T, NotebookError>;

#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("Item not found")]
    NotFound,

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Blocking task failed: {0}")]
    Blocking(String),
}

impl NotebookError {
    /// Wrap an I/O error with the path it happened on.
    /// A missing path is reported as a missing directory.
    pub fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            NotebookError::DirectoryNotFound(path.display().to_string())
        } else {
            NotebookError::Io {
                path: path.display().to_string(),
                source,
            }
        }
    }
}

impl From<actix_web::error::BlockingError> for NotebookError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        NotebookError::Blocking(e.to_string())
    }
}

impl ResponseError for NotebookError {
    fn status_code(&self) -> StatusCode {
        match self {
            NotebookError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(status).json(ErrorDetail::new(self.to_string()))
    }
}

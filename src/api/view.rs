//! Rendered pages
//!
//! A page is the view name plus the data a template needs, the pending
//! flash messages and any field errors from a rejected submission.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::forms::FieldErrors;

#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub view: &'static str,
    pub flashes: Vec<String>,
    pub errors: FieldErrors,
    pub data: T,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> Page<T> {
    pub fn new(view: &'static str, data: T) -> Self {
        Self {
            view,
            flashes: Vec::new(),
            errors: FieldErrors::new(),
            data,
            status: StatusCode::OK,
        }
    }

    pub fn with_flashes(mut self, flashes: Vec<String>) -> Self {
        self.flashes = flashes;
        self
    }

    /// Re-render of a rejected form
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self.status = StatusCode::UNPROCESSABLE_ENTITY;
        self
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

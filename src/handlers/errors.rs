//! 라우트에 매칭되지 않은 요청 처리

use actix_web::{HttpRequest, HttpResponse, ResponseError};

use crate::core::errors::AppError;

/// `default_service`로 등록되는 404 핸들러
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    log::warn!("404 {} {}", req.method(), req.path());
    AppError::NotFound(req.path().to_string()).error_response()
}

//! # Application Error Handling
//!
//! 카탈로그 서비스 전체에서 사용하는 통합 에러 타입입니다.
//! 핸들러 체인의 어느 단계에서든 `AppError`를 반환하면 Actix-Web이
//! `ResponseError` 구현을 통해 곧바로 HTML 에러 페이지로 변환합니다.
//!
//! ## 상태 코드 정책
//!
//! 서버 렌더링 페이지는 에러를 두 갈래로만 구분합니다.
//!
//! | 에러 | 응답 |
//! |------|------|
//! | `NotFound` | `404 | The page does not exist!` |
//! | 그 외 전부 | `500 | Sorry, our application is experiencing a problem!` |
//!
//! 검증 실패나 중복 키 위반도 데이터 저장소 작업 실패로 보고 500으로 응답합니다.
//! 사용자에게 보여줄 메시지가 필요한 경우(회원 가입 검증, 로그인 실패)에는
//! 에러를 반환하지 않고 플래시 메시지와 리다이렉트로 처리합니다.
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult, ErrorContext};
//!
//! async fn load(store: &dyn DocumentStore<Game>, id: &str) -> AppResult<Game> {
//!     store
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound(format!("game {}", id)))
//! }
//!
//! let body = serde_json::to_string(&value).context("JSON 직렬화 실패")?;
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// MongoDB duplicate key 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 애플리케이션 전역 에러 타입
///
/// ## 에러 분류
///
/// ### 데이터 계층
/// - `DatabaseError`: MongoDB 연결/쿼리 실패
/// - `ConflictError`: unique 필드 중복
///
/// ### 요청 계층
/// - `ValidationError`: 폼 값 또는 식별자 검증 실패
/// - `NotFound`: 식별자에 해당하는 레코드 없음, 일치하는 라우트 없음
/// - `AuthenticationError`: 자격 증명 검증 실패
///
/// ### 렌더링/인프라 계층
/// - `SessionError`: 세션 쿠키 읽기/쓰기 실패
/// - `TemplateError`: Handlebars 등록/렌더링 실패
/// - `InternalError`: 그 외 예상하지 못한 오류
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 상태 코드에 맞는 HTML 에러 페이지를 생성합니다.
    ///
    /// 내부 에러 메시지는 로그로만 남기고 응답 본문에는 노출하지 않습니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", status.as_u16(), self);
        }

        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(error_page(status))
    }
}

/// 상태 코드별 에러 페이지 본문을 반환합니다.
pub fn error_page(status: StatusCode) -> String {
    let message = if status == StatusCode::NOT_FOUND {
        "The page does not exist!"
    } else {
        "Sorry, our application is experiencing a problem!"
    };

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{code}</title></head>\
         <body><h1>{code} | {message}</h1><a href=\"/\">Home</a></body></html>",
        code = status.as_u16(),
        message = message,
    )
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        if is_duplicate_key(&error) {
            AppError::ConflictError(error.to_string())
        } else {
            AppError::DatabaseError(error.to_string())
        }
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(validation_messages(&errors).join(" and "))
    }
}

/// `ValidationErrors`에서 사람이 읽을 수 있는 메시지 목록을 뽑아냅니다.
///
/// 규칙에 `message`가 지정되지 않은 경우 `"<필드>: <코드>"` 형태로 대체합니다.
/// 필드 이름 순서로 정렬되어 있어 결과가 항상 같습니다.
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, error.code),
            })
        })
        .collect()
}

impl From<handlebars::RenderError> for AppError {
    fn from(error: handlebars::RenderError) -> Self {
        AppError::TemplateError(error.to_string())
    }
}

impl From<handlebars::TemplateError> for AppError {
    fn from(error: handlebars::TemplateError) -> Self {
        AppError::TemplateError(error.to_string())
    }
}

impl From<actix_session::SessionInsertError> for AppError {
    fn from(error: actix_session::SessionInsertError) -> Self {
        AppError::SessionError(error.to_string())
    }
}

impl From<actix_session::SessionGetError> for AppError {
    fn from(error: actix_session::SessionGetError) -> Self {
        AppError::SessionError(error.to_string())
    }
}

/// 에러 컨텍스트 추가를 위한 확장 트레이트
///
/// 표시 가능한 어떤 에러든 설명을 덧붙여 `InternalError`로 바꿉니다.
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

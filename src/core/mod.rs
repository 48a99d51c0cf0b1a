//! # Core Module
//!
//! 요청 처리의 뼈대가 되는 두 가지를 제공합니다.
//!
//! - [`chain`] - 라우트별 처리 단계 체인 (`Chain`, `Handler`, `Flow`, `ResponseContext`)
//! - [`errors`] - 통합 에러 타입 (`AppError`, `AppResult`, `ErrorContext`)
//!
//! ```rust,ignore
//! use crate::core::chain::{Chain, Flow, Handler};
//! use crate::core::errors::AppResult;
//!
//! let chain = Chain::new()
//!     .then(ResourceStep::<Game>::new(ResourceAction::Create))
//!     .then(ResourceStep::<Game>::new(ResourceAction::RedirectView));
//! ```

pub mod chain;
pub mod errors;

//! # Domain Models Module
//!
//! 저장되지 않는 요청 범위 값 객체입니다.
//!
//! - `CurrentUser` - 세션의 로그인 사용자
//! - `RequestLocals` - 미들웨어가 요청마다 준비하는 로그인 상태와 플래시 메시지

pub mod auth;

pub use auth::*;

//! # Service Layer
//!
//! 컨트롤러 단계에서 재사용하는 비즈니스 로직입니다.
//!
//! - [`users`] - 비밀번호 해싱과 자격 증명 검증

pub mod users;

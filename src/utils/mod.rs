//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 폼 입력값 검증, 정리, 느슨한 역직렬화
//! - [`display_terminal`] - 서버 시작 과정 터미널 출력

pub mod string_utils;
pub mod display_terminal;

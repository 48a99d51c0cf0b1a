//! HTTP 핸들러 모듈
//!
//! 라우트 체인을 구성하는 단계(`Handler` 구현)들입니다.
//!
//! - `resource` - Games/Books/Users 공통 CRUD 단계 (`ResourceStep<R>`)
//! - `users` - 회원 가입 검증, 로그인, 로그아웃
//! - `pages` - 정적 페이지
//! - `errors` - 매칭되지 않은 요청의 404 응답

pub mod errors;
pub mod pages;
pub mod resource;
pub mod users;

pub use errors::not_found;
pub use pages::StaticPage;
pub use resource::{redirect_view, ResourceAction, ResourceController, ResourceStep};
pub use users::{Authenticate, LoginForm, Logout, ValidateUser};

//! 게임/도서 카탈로그 웹 애플리케이션
//!
//! 서버에서 HTML을 렌더링하는 CRUD 애플리케이션입니다. 게임, 도서, 사용자
//! 세 가지 리소스를 같은 컨트롤러 패턴으로 다루고, 쿠키 세션으로 로그인 상태와
//! 플래시 메시지를 유지합니다.
//!
//! # Features
//!
//! - **리소스 CRUD**: 목록, 상세, 생성, 수정, 삭제 화면 (`/games`, `/books`, `/users`)
//! - **세션 인증**: 사용자명/비밀번호 로그인, 로그아웃, 레이아웃의 로그인 상태 표시
//! - **플래시 메시지**: 리다이렉트 다음 요청에서 한 번만 표시
//! - **MongoDB**: 리소스별 컬렉션, unique 인덱스 (메모리 저장소로 대체 가능)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ Middlewares          │ ← 속도 제한, 로그, 메서드 오버라이드, 세션, 요청 로컬 값
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │ Routes → Chain       │ ← (메서드, 경로)별 단계 목록
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │ Handlers             │ ← ResourceStep<R>, 로그인/로그아웃, 정적 페이지
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │ Services / Views     │ ← 비밀번호 검증, Handlebars 렌더링
//! └──────────────────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │ Repositories         │ ← DocumentStore<R>: MongoStore / MemoryStore
//! └──────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use game_book_catalog::routes::configure_all_routes;
//! use game_book_catalog::state::AppState;
//!
//! let state = AppState::in_memory()?;
//! let app = App::new()
//!     .app_data(web::Data::new(state))
//!     .configure(configure_all_routes);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod session;
pub mod state;
pub mod views;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

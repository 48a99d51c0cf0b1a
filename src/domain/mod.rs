//! # Domain Layer
//!
//! ```text
//! domain
//! ├── resource.rs   ← CRUD 리소스 추상화 (Resource, FieldSpec)
//! ├── entities/     ← 영속 레코드 (Game, Book, User)
//! ├── dto/          ← 폼 본문 (화이트리스트)
//! └── models/       ← 요청 범위 값 객체 (CurrentUser, RequestLocals)
//! ```

pub mod resource;
pub mod entities;
pub mod dto;
pub mod models;

pub use resource::*;
pub use entities::*;
pub use models::*;

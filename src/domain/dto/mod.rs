//! # Data Transfer Objects (DTO) Module
//!
//! HTML 폼(또는 JSON) 본문을 받는 타입들입니다.
//! 각 DTO는 해당 리소스가 받아들이는 필드 화이트리스트 역할을 합니다.

pub mod games;
pub mod books;
pub mod users;

pub use games::*;
pub use books::*;
pub use users::*;

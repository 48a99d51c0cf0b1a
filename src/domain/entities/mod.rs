//! # Entities Module
//!
//! MongoDB 컬렉션 하나에 대응하는 영속 레코드입니다.
//! 모든 엔티티는 `_id`, `createdAt`, `updatedAt`을 가지며 `Resource`를 구현합니다.

pub mod game;
pub mod book;
pub mod user;

pub use game::Game;
pub use book::Book;
pub use user::User;

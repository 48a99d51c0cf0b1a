//! 데이터 액세스 계층
//!
//! 리소스 종류마다 하나의 `DocumentStore<R>`를 사용합니다.
//! MongoDB 구현(`MongoStore`)과 프로세스 메모리 구현(`MemoryStore`)은 같은 의미를 가지며,
//! 어떤 구현을 쓸지는 시작 시 `StoreConfig::backend()`로 결정합니다.
//!
//! # 공통 의미
//!
//! - 식별자는 24자리 16진수 ObjectId 문자열입니다. 형식이 틀리면 `ValidationError`입니다.
//! - unique 필드가 겹치면 `ConflictError`입니다.
//! - `find_by_id_and_update`는 `$set`을 적용한 **이후의** 레코드를 반환합니다.
//! - 대상이 없으면 `Ok(None)`입니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let games: Arc<dyn DocumentStore<Game>> = Arc::new(MemoryStore::new());
//! let game = games.create(Game::from_create_form(form)?).await?;
//! let found = games.find_by_id(&game.id_string()).await?;
//! ```

pub mod memory_store;
pub mod mongo_store;

pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::core::errors::{AppError, AppResult};
use crate::domain::resource::Resource;

/// 리소스 레코드 저장소
#[async_trait]
pub trait DocumentStore<R: Resource>: Send + Sync {
    /// 저장 순서대로 모든 레코드를 가져옵니다.
    async fn find_all(&self) -> AppResult<Vec<R>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<R>>;

    /// 문자열 필드가 정확히 일치하는 첫 레코드를 가져옵니다.
    async fn find_one_by(&self, field: &str, value: &str) -> AppResult<Option<R>>;

    /// 레코드를 저장하고 식별자가 채워진 레코드를 반환합니다.
    async fn create(&self, record: R) -> AppResult<R>;

    /// `changes`를 `$set`으로 원자적으로 적용합니다.
    async fn find_by_id_and_update(&self, id: &str, changes: Document) -> AppResult<Option<R>>;

    /// 레코드를 삭제하고 삭제된 레코드를 반환합니다.
    async fn find_by_id_and_delete(&self, id: &str) -> AppResult<Option<R>>;
}

/// 문자열 식별자를 ObjectId로 변환합니다.
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError(format!("유효하지 않은 ID 형식입니다: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();

        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(AppError::ValidationError(_))
        ));
    }
}

//! 애플리케이션 공유 상태
//!
//! 워커 간에 공유되는 것은 리소스별 저장소와 템플릿 레지스트리뿐입니다.
//! 요청별 값은 모두 `ResponseContext`에 있습니다.

use std::sync::Arc;

use crate::core::errors::AppResult;
use crate::db::Database;
use crate::domain::entities::{Book, Game, User};
use crate::domain::resource::Resource;
use crate::repositories::{DocumentStore, MemoryStore, MongoStore};
use crate::utils::display_terminal::print_index_report;
use crate::views::Views;

#[derive(Clone)]
pub struct AppState {
    pub games: Arc<dyn DocumentStore<Game>>,
    pub books: Arc<dyn DocumentStore<Book>>,
    pub users: Arc<dyn DocumentStore<User>>,
    pub views: Arc<Views>,
}

impl AppState {
    pub const COLLECTIONS: usize = 3;

    pub fn new(
        games: Arc<dyn DocumentStore<Game>>,
        books: Arc<dyn DocumentStore<Book>>,
        users: Arc<dyn DocumentStore<User>>,
    ) -> AppResult<Self> {
        Ok(Self {
            games,
            books,
            users,
            views: Arc::new(Views::new()?),
        })
    }

    /// 프로세스 메모리 저장소로 구성합니다.
    pub fn in_memory() -> AppResult<Self> {
        Self::new(
            Arc::new(MemoryStore::<Game>::new()),
            Arc::new(MemoryStore::<Book>::new()),
            Arc::new(MemoryStore::<User>::new()),
        )
    }

    /// MongoDB 저장소로 구성하고 unique 인덱스를 생성합니다.
    pub async fn with_mongo(database: &Database) -> AppResult<Self> {
        Self::new(
            Arc::new(mongo_store::<Game>(database).await?),
            Arc::new(mongo_store::<Book>(database).await?),
            Arc::new(mongo_store::<User>(database).await?),
        )
    }
}

async fn mongo_store<R: Resource>(database: &Database) -> AppResult<MongoStore<R>> {
    let store = MongoStore::<R>::new(database);
    store.create_indexes().await?;
    print_index_report(R::COLLECTION, R::UNIQUE_FIELDS);
    Ok(store)
}

//! MongoDB 연결 관리 모듈
//!
//! `DatabaseConfig`의 URI와 데이터베이스 이름으로 클라이언트를 만들고
//! `ping` 명령으로 연결을 확인합니다. 클라이언트는 내부적으로 커넥션 풀을
//! 가지므로 복제해서 공유해도 됩니다.
//!
//! ```rust,ignore
//! let database = Database::connect().await?;
//! let games = MongoStore::<Game>::new(&database);
//! ```

use log::info;
use mongodb::bson::doc;
use mongodb::{options::ClientOptions, Client};

use crate::config::DatabaseConfig;
use crate::core::errors::AppResult;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 환경 설정으로 연결합니다.
    pub async fn connect() -> AppResult<Self> {
        Self::connect_to(&DatabaseConfig::uri(), &DatabaseConfig::database_name()).await
    }

    /// 지정한 URI와 데이터베이스로 연결하고 `ping`으로 확인합니다.
    ///
    /// # Errors
    ///
    /// * `DatabaseError` - URI 파싱 실패, 서버에 도달할 수 없음
    pub async fn connect_to(uri: &str, database_name: &str) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // 서버 로그에서 이 서비스의 연결을 구분하기 위한 이름
        client_options.app_name = Some("game_book_catalog".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(database_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name: database_name.to_string(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

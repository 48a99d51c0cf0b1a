//! MongoDB 저장소
//!
//! 리소스의 `COLLECTION` 이름으로 컬렉션을 열고, 단일 문서 연산만 사용합니다.
//! 갱신과 삭제는 `find_one_and_*` 연산이라 문서 단위로 원자적입니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::resource::Resource;
use crate::repositories::{parse_object_id, DocumentStore};

pub struct MongoStore<R: Resource> {
    collection: Collection<R>,
}

impl<R: Resource> MongoStore<R> {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<R>(R::COLLECTION),
        }
    }

    /// `UNIQUE_FIELDS`마다 unique 인덱스를 생성합니다.
    ///
    /// 이미 중복 데이터가 있는 컬렉션에서는 인덱스 생성이 실패합니다.
    /// 생성한 인덱스 수를 반환합니다.
    pub async fn create_indexes(&self) -> AppResult<usize> {
        let indexes: Vec<IndexModel> = R::UNIQUE_FIELDS
            .iter()
            .map(|field| {
                let mut keys = Document::new();
                keys.insert(*field, 1);

                IndexModel::builder()
                    .keys(keys)
                    .options(
                        IndexOptions::builder()
                            .unique(true)
                            .name(format!("{}_unique", field))
                            .build(),
                    )
                    .build()
            })
            .collect();

        if indexes.is_empty() {
            return Ok(0);
        }

        let count = indexes.len();
        self.collection.create_indexes(indexes).await?;

        Ok(count)
    }
}

#[async_trait]
impl<R: Resource> DocumentStore<R> for MongoStore<R> {
    async fn find_all(&self) -> AppResult<Vec<R>> {
        let cursor = self.collection.find(doc! {}).await?;
        let records: Vec<R> = cursor.try_collect().await?;

        Ok(records)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<R>> {
        let object_id = parse_object_id(id)?;

        Ok(self.collection.find_one(doc! { "_id": object_id }).await?)
    }

    async fn find_one_by(&self, field: &str, value: &str) -> AppResult<Option<R>> {
        let mut filter = Document::new();
        filter.insert(field, value);

        Ok(self.collection.find_one(filter).await?)
    }

    async fn create(&self, mut record: R) -> AppResult<R> {
        let result = self.collection.insert_one(&record).await?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::InternalError(format!("{}: 삽입된 _id가 ObjectId가 아닙니다", R::COLLECTION))
        })?;
        record.set_id(id);

        Ok(record)
    }

    async fn find_by_id_and_update(&self, id: &str, changes: Document) -> AppResult<Option<R>> {
        let object_id = parse_object_id(id)?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": changes })
            .with_options(options)
            .await?;

        Ok(updated)
    }

    async fn find_by_id_and_delete(&self, id: &str) -> AppResult<Option<R>> {
        let object_id = parse_object_id(id)?;

        Ok(self
            .collection
            .find_one_and_delete(doc! { "_id": object_id })
            .await?)
    }
}

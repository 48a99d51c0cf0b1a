//! 프로세스 메모리 저장소
//!
//! `STORE_BACKEND=memory` 또는 테스트에서 MongoDB 없이 같은 의미를 제공합니다.
//! 레코드는 삽입 순서대로 보관되며, 필드 비교와 `$set` 적용은 BSON 문서로 변환해
//! MongoDB와 같은 필드 이름(`createdAt`, `passwordHash` 등) 기준으로 처리합니다.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Bson, Document};

use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::resource::Resource;
use crate::repositories::{parse_object_id, DocumentStore};

pub struct MemoryStore<R: Resource> {
    records: RwLock<Vec<R>>,
}

impl<R: Resource> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<R>>> {
        self.records
            .read()
            .map_err(|_| AppError::InternalError(format!("{} 저장소 잠금 오염", R::COLLECTION)))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<R>>> {
        self.records
            .write()
            .map_err(|_| AppError::InternalError(format!("{} 저장소 잠금 오염", R::COLLECTION)))
    }

    fn to_document(record: &R) -> AppResult<Document> {
        bson::to_document(record).with_context(|| format!("{} 레코드 BSON 변환 실패", R::COLLECTION))
    }

    /// `candidate`와 식별자가 다른 레코드 중 unique 필드 값이 같은 것이 있으면 충돌입니다.
    fn ensure_unique(records: &[R], candidate: &R) -> AppResult<()> {
        if R::UNIQUE_FIELDS.is_empty() {
            return Ok(());
        }

        let candidate_doc = Self::to_document(candidate)?;
        for other in records.iter().filter(|other| other.id() != candidate.id()) {
            let other_doc = Self::to_document(other)?;

            for field in R::UNIQUE_FIELDS {
                match (candidate_doc.get(*field), other_doc.get(*field)) {
                    (Some(value), Some(existing)) if value == existing => {
                        return Err(AppError::ConflictError(format!(
                            "E11000 duplicate key error collection: {} index: {}_unique dup key: {{ {}: {} }}",
                            R::COLLECTION,
                            field,
                            field,
                            value
                        )));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn position(records: &[R], id: ObjectId) -> Option<usize> {
        records.iter().position(|record| record.id() == Some(id))
    }
}

#[async_trait]
impl<R: Resource> DocumentStore<R> for MemoryStore<R> {
    async fn find_all(&self) -> AppResult<Vec<R>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<R>> {
        let object_id = parse_object_id(id)?;
        let records = self.read()?;

        Ok(Self::position(&records, object_id).map(|index| records[index].clone()))
    }

    async fn find_one_by(&self, field: &str, value: &str) -> AppResult<Option<R>> {
        let records = self.read()?;

        for record in records.iter() {
            if let Some(Bson::String(stored)) = Self::to_document(record)?.get(field) {
                if stored == value {
                    return Ok(Some(record.clone()));
                }
            }
        }

        Ok(None)
    }

    async fn create(&self, mut record: R) -> AppResult<R> {
        let mut records = self.write()?;

        record.set_id(ObjectId::new());
        Self::ensure_unique(&records, &record)?;
        records.push(record.clone());

        Ok(record)
    }

    async fn find_by_id_and_update(&self, id: &str, changes: Document) -> AppResult<Option<R>> {
        let object_id = parse_object_id(id)?;
        let mut records = self.write()?;

        let Some(index) = Self::position(&records, object_id) else {
            return Ok(None);
        };

        let mut document = Self::to_document(&records[index])?;
        for (key, value) in changes {
            document.insert(key, value);
        }
        let updated: R = bson::from_document(document)
            .with_context(|| format!("{} 레코드 갱신 결과 역직렬화 실패", R::COLLECTION))?;

        Self::ensure_unique(&records, &updated)?;
        records[index] = updated.clone();

        Ok(Some(updated))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> AppResult<Option<R>> {
        let object_id = parse_object_id(id)?;
        let mut records = self.write()?;

        Ok(Self::position(&records, object_id).map(|index| records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Game;
    use mongodb::bson::doc;

    fn game(title: &str, cost: f64) -> Game {
        Game::new(
            title.to_string(),
            "X".to_string(),
            "Strategy".to_string(),
            cost,
            "a.png".to_string(),
        )
    }

    #[actix_web::test]
    async fn test_create_assigns_id_and_keeps_order() {
        let store = MemoryStore::<Game>::new();

        let chess = store.create(game("Chess", 10.0)).await.unwrap();
        store.create(game("Go", 5.0)).await.unwrap();

        assert!(chess.id.is_some());
        let titles: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Chess", "Go"]);
    }

    #[actix_web::test]
    async fn test_duplicate_title_conflicts() {
        let store = MemoryStore::<Game>::new();
        store.create(game("Chess", 10.0)).await.unwrap();

        let result = store.create(game("Chess", 1.0)).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_update_applies_only_given_fields() {
        let store = MemoryStore::<Game>::new();
        let chess = store.create(game("Chess", 10.0)).await.unwrap();
        let id = chess.id.unwrap().to_hex();

        let updated = store
            .find_by_id_and_update(&id, doc! { "genre": "Puzzle" })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.genre, "Puzzle");
        assert_eq!(updated.title, "Chess");
        assert_eq!(updated.cost, 10.0);
        assert_eq!(store.find_by_id(&id).await.unwrap().unwrap().genre, "Puzzle");
    }

    #[actix_web::test]
    async fn test_update_into_duplicate_title_conflicts() {
        let store = MemoryStore::<Game>::new();
        store.create(game("Chess", 10.0)).await.unwrap();
        let go = store.create(game("Go", 5.0)).await.unwrap();

        let result = store
            .find_by_id_and_update(&go.id.unwrap().to_hex(), doc! { "title": "Chess" })
            .await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_delete_and_missing_records() {
        let store = MemoryStore::<Game>::new();
        let chess = store.create(game("Chess", 10.0)).await.unwrap();
        let id = chess.id.unwrap().to_hex();

        assert!(store.find_by_id_and_delete(&id).await.unwrap().is_some());
        assert!(store.find_by_id(&id).await.unwrap().is_none());
        assert!(store.find_by_id_and_delete(&id).await.unwrap().is_none());
        assert!(store
            .find_by_id_and_update(&id, doc! { "genre": "x" })
            .await
            .unwrap()
            .is_none());
    }

    #[actix_web::test]
    async fn test_find_one_by_field() {
        let store = MemoryStore::<Game>::new();
        store.create(game("Chess", 10.0)).await.unwrap();

        assert!(store.find_one_by("title", "Chess").await.unwrap().is_some());
        assert!(store.find_one_by("title", "Go").await.unwrap().is_none());
    }
}

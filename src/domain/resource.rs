//! # Resource Trait
//!
//! 게임, 도서, 사용자처럼 같은 CRUD 흐름을 따르는 레코드 종류를 추상화합니다.
//! 컨트롤러, 저장소, 뷰 모델은 모두 이 트레이트 하나에만 의존하므로
//! 새 리소스는 엔티티와 폼 DTO를 정의하고 이 트레이트를 구현하는 것으로 끝납니다.
//!
//! ## 구현 체크리스트
//!
//! | 항목 | 예 (`Game`) |
//! |------|-------------|
//! | `COLLECTION` | `"games"` (MongoDB 컬렉션 이름이자 URL 경로) |
//! | `SINGULAR` | `"game"` (컨텍스트 키, 페이지 이름) |
//! | `LABEL` | `"Game"` (화면 제목) |
//! | `FIELDS` | 목록/상세 화면에 표시할 필드 |
//! | `UNIQUE_FIELDS` | `["title"]` |
//! | `from_create_form` | 화이트리스트 필드만으로 검증된 레코드 생성 |
//! | `update_document` | 제출된 화이트리스트 필드만 담은 `$set` 문서 |

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::errors::AppResult;
use crate::repositories::DocumentStore;
use crate::state::AppState;

/// 자동 관리되는 생성 시각 필드 이름
pub const CREATED_AT: &str = "createdAt";
/// 자동 관리되는 수정 시각 필드 이름
pub const UPDATED_AT: &str = "updatedAt";

/// 폼 입력 종류 (HTML `input type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Password,
    /// 이미지 URL. 목록/상세 화면에서 `<img>`로 표시됩니다.
    Image,
}

impl FieldKind {
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Image => "text",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
        }
    }
}

/// 화면에 표시되는 필드 정의
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

/// CRUD 리소스
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// 생성 폼 본문
    type CreateForm: DeserializeOwned;
    /// 수정 폼 본문 (모든 필드 선택)
    type UpdateForm: DeserializeOwned + std::fmt::Debug;

    const COLLECTION: &'static str;
    const SINGULAR: &'static str;
    const LABEL: &'static str;
    const FIELDS: &'static [FieldSpec];
    const UNIQUE_FIELDS: &'static [&'static str];

    /// 생성/수정 폼에 보여줄 필드. 기본값은 `FIELDS`입니다.
    fn form_fields(_editing: bool) -> &'static [FieldSpec] {
        Self::FIELDS
    }

    /// 생성 폼에서 검증된 새 레코드를 만듭니다. 식별자는 비어 있습니다.
    fn from_create_form(form: Self::CreateForm) -> AppResult<Self>;

    /// 수정 폼에서 실제로 제출된 필드와 `updatedAt`만 담은 문서를 만듭니다.
    fn update_document(form: Self::UpdateForm) -> AppResult<Document>;

    fn id(&self) -> Option<ObjectId>;

    fn set_id(&mut self, id: ObjectId);

    /// 목록/상세 화면의 제목 줄
    fn heading(&self) -> String;

    /// 필드 이름으로 표시용 값을 가져옵니다.
    fn field_value(&self, field: &str) -> Option<String>;

    /// 생성 성공 시 보여줄 플래시 메시지
    fn created_message(&self) -> Option<String> {
        None
    }

    /// 애플리케이션 상태에서 이 리소스의 저장소를 찾습니다.
    fn store(state: &AppState) -> Arc<dyn DocumentStore<Self>>;

    fn id_string(&self) -> String {
        self.id().map(|id| id.to_hex()).unwrap_or_default()
    }

    /// `/games`
    fn collection_path() -> String {
        format!("/{}", Self::COLLECTION)
    }

    /// `/games/{id}`
    fn record_path(id: &str) -> String {
        format!("/{}/{}", Self::COLLECTION, id)
    }
}

//! # Book Entity

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::errors::AppResult;
use crate::domain::dto::{BookForm, BookUpdateForm};
use crate::domain::resource::{FieldKind, FieldSpec, Resource, UPDATED_AT};
use crate::repositories::DocumentStore;
use crate::state::AppState;
use crate::utils::string_utils::validate_required_string;

/// 도서 레코드. 모든 문자열 필드가 필수입니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Book {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(length(min = 1))]
    pub genre: String,
    /// 한 줄 소개
    #[validate(length(min = 1))]
    pub one_words: String,
    #[validate(length(min = 1))]
    pub image: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

impl Resource for Book {
    type CreateForm = BookForm;
    type UpdateForm = BookUpdateForm;

    const COLLECTION: &'static str = "books";
    const SINGULAR: &'static str = "book";
    const LABEL: &'static str = "Book";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("author", "Author", FieldKind::Text),
        FieldSpec::new("genre", "Genre", FieldKind::Text),
        FieldSpec::new("one_words", "In One Words", FieldKind::Text),
        FieldSpec::new("image", "Image", FieldKind::Image),
    ];
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn from_create_form(form: BookForm) -> AppResult<Self> {
        let now = DateTime::now();
        let book = Book {
            id: None,
            title: validate_required_string(&form.title, "title")?,
            author: validate_required_string(&form.author, "author")?,
            genre: validate_required_string(&form.genre, "genre")?,
            one_words: validate_required_string(&form.one_words, "one_words")?,
            image: validate_required_string(&form.image, "image")?,
            created_at: now,
            updated_at: now,
        };

        book.validate()?;
        Ok(book)
    }

    fn update_document(form: BookUpdateForm) -> AppResult<Document> {
        let mut changes = Document::new();

        let submitted = [
            ("title", form.title),
            ("author", form.author),
            ("genre", form.genre),
            ("one_words", form.one_words),
            ("image", form.image),
        ];
        for (field, value) in submitted {
            if let Some(value) = value {
                changes.insert(field, validate_required_string(&value, field)?);
            }
        }

        changes.insert(UPDATED_AT, DateTime::now());
        Ok(changes)
    }

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn heading(&self) -> String {
        format!("{} by {}", self.title, self.author)
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "title" => Some(self.title.clone()),
            "author" => Some(self.author.clone()),
            "genre" => Some(self.genre.clone()),
            "one_words" => Some(self.one_words.clone()),
            "image" => Some(self.image.clone()),
            _ => None,
        }
    }

    fn store(state: &AppState) -> Arc<dyn DocumentStore<Self>> {
        state.books.clone()
    }
}

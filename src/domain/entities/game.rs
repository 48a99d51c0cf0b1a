//! # Game Entity
//!
//! 게임 카탈로그 레코드입니다. `title`은 컬렉션 전체에서 유일하며
//! `cost`는 음수가 될 수 없습니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::{GameForm, GameUpdateForm};
use crate::domain::resource::{FieldKind, FieldSpec, Resource, UPDATED_AT};
use crate::repositories::DocumentStore;
use crate::state::AppState;
use crate::utils::string_utils::{clean_optional_string, parse_optional_number, validate_required_string};

pub const NEGATIVE_COST_MESSAGE: &str = "Game cannot have a negative cost";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Game {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[validate(length(min = 1, message = "Game title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Game producer is required"))]
    pub producer: String,
    #[validate(length(min = 1, message = "Game genre is required"))]
    pub genre: String,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Game cannot have a negative cost"))]
    pub cost: f64,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

impl Game {
    pub fn new(title: String, producer: String, genre: String, cost: f64, image: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            title,
            producer,
            genre,
            cost,
            image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// 빈 값은 기본값 0
fn parse_cost(raw: Option<&str>) -> AppResult<f64> {
    let cost = parse_optional_number(raw, "cost")?.unwrap_or(0.0);
    if cost < 0.0 {
        return Err(AppError::ValidationError(NEGATIVE_COST_MESSAGE.to_string()));
    }
    Ok(cost)
}

impl Resource for Game {
    type CreateForm = GameForm;
    type UpdateForm = GameUpdateForm;

    const COLLECTION: &'static str = "games";
    const SINGULAR: &'static str = "game";
    const LABEL: &'static str = "Game";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("producer", "Producer", FieldKind::Text),
        FieldSpec::new("genre", "Genre", FieldKind::Text),
        FieldSpec::new("cost", "Cost", FieldKind::Number),
        FieldSpec::new("image", "Image", FieldKind::Image),
    ];
    const UNIQUE_FIELDS: &'static [&'static str] = &["title"];

    fn from_create_form(form: GameForm) -> AppResult<Self> {
        let game = Game::new(
            validate_required_string(&form.title, "title")?,
            validate_required_string(&form.producer, "producer")?,
            validate_required_string(&form.genre, "genre")?,
            parse_cost(form.cost.as_deref())?,
            clean_optional_string(form.image).unwrap_or_default(),
        );

        game.validate()?;
        Ok(game)
    }

    fn update_document(form: GameUpdateForm) -> AppResult<Document> {
        let mut changes = Document::new();

        if let Some(title) = form.title {
            changes.insert("title", validate_required_string(&title, "title")?);
        }
        if let Some(producer) = form.producer {
            changes.insert("producer", validate_required_string(&producer, "producer")?);
        }
        if let Some(genre) = form.genre {
            changes.insert("genre", validate_required_string(&genre, "genre")?);
        }
        if let Some(cost) = form.cost {
            changes.insert("cost", parse_cost(Some(&cost))?);
        }
        if let Some(image) = form.image {
            changes.insert("image", image.trim());
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
        self.title.clone()
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "title" => Some(self.title.clone()),
            "producer" => Some(self.producer.clone()),
            "genre" => Some(self.genre.clone()),
            "cost" => Some(self.cost.to_string()),
            "image" => Some(self.image.clone()),
            _ => None,
        }
    }

    fn store(state: &AppState) -> Arc<dyn DocumentStore<Self>> {
        state.games.clone()
    }
}

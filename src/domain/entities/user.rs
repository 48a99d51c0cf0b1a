//! # User Entity
//!
//! 로그인 가능한 사용자입니다. 비밀번호는 bcrypt 해시로만 저장하며,
//! `username`과 `email`은 각각 유일해야 합니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::errors::AppResult;
use crate::domain::dto::{CreateUserRequest, UpdateUserRequest};
use crate::domain::resource::{FieldKind, FieldSpec, Resource, UPDATED_AT};
use crate::repositories::DocumentStore;
use crate::services::users::UserService;
use crate::state::AppState;
use crate::utils::string_utils::{normalize_email, validate_required_string};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 ID (unique)
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    /// 소문자로 정규화된 이메일 (unique)
    #[validate(length(min = 1))]
    pub email: String,
    /// bcrypt 해시
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성
    pub fn new_local(username: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Resource for User {
    type CreateForm = CreateUserRequest;
    type UpdateForm = UpdateUserRequest;

    const COLLECTION: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const LABEL: &'static str = "User";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("username", "Username", FieldKind::Text),
        FieldSpec::new("email", "Email", FieldKind::Email),
    ];
    const UNIQUE_FIELDS: &'static [&'static str] = &["username", "email"];

    fn form_fields(editing: bool) -> &'static [FieldSpec] {
        const SIGN_UP_FIELDS: &[FieldSpec] = &[
            FieldSpec::new("username", "Username", FieldKind::Text),
            FieldSpec::new("email", "Email", FieldKind::Email),
            FieldSpec::new("password", "Password", FieldKind::Password),
        ];

        if editing { Self::FIELDS } else { SIGN_UP_FIELDS }
    }

    /// 폼을 검증하고 비밀번호를 해싱해 새 사용자를 만듭니다.
    fn from_create_form(form: CreateUserRequest) -> AppResult<Self> {
        form.validate()?;

        let user = User::new_local(
            form.username.trim().to_string(),
            normalize_email(&form.email),
            UserService::hash_password(&form.password)?,
        );

        user.validate()?;
        Ok(user)
    }

    fn update_document(form: UpdateUserRequest) -> AppResult<Document> {
        form.validate()?;
        let mut changes = Document::new();

        if let Some(username) = form.username {
            changes.insert("username", validate_required_string(&username, "username")?);
        }
        if let Some(email) = form.email {
            changes.insert("email", normalize_email(&email));
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
        self.username.clone()
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "username" => Some(self.username.clone()),
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }

    fn created_message(&self) -> Option<String> {
        Some(format!("{}'s account created successfully!", self.username))
    }

    fn store(state: &AppState) -> Arc<dyn DocumentStore<Self>> {
        state.users.clone()
    }
}

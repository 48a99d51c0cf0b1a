//! 게임 폼 DTO

use serde::Deserialize;

use crate::utils::string_utils::deserialize_loose_string;

/// `POST /games/create` 본문
///
/// 화이트리스트: `title`, `producer`, `genre`, `cost`, `image`.
/// 그 밖의 제출 필드(`_method` 등)는 무시됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameForm {
    pub title: String,
    pub producer: String,
    pub genre: String,
    #[serde(deserialize_with = "deserialize_loose_string")]
    pub cost: Option<String>,
    pub image: Option<String>,
}

/// `PUT /games/{id}/update` 본문. 제출되지 않은 필드는 변경하지 않습니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameUpdateForm {
    pub title: Option<String>,
    pub producer: Option<String>,
    pub genre: Option<String>,
    #[serde(deserialize_with = "deserialize_loose_string")]
    pub cost: Option<String>,
    pub image: Option<String>,
}

//! 도서 폼 DTO

use serde::Deserialize;

/// `POST /books/create` 본문. 다섯 필드 모두 필수입니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub one_words: String,
    pub image: String,
}

/// `PUT /books/{id}/update` 본문
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookUpdateForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub one_words: Option<String>,
    pub image: Option<String>,
}

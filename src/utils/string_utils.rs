//! # 문자열 유틸리티
//!
//! 폼 입력값을 정리하고 검증하는 공통 함수들입니다.
//! HTML 폼은 모든 값을 문자열로 보내고 JSON 본문은 숫자를 그대로 보내므로,
//! 두 경우를 같은 DTO로 받을 수 있도록 느슨한 역직렬화도 제공합니다.

use serde::Deserialize;

use crate::core::errors::{AppError, AppResult};

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(validate_required_string("  Chess  ", "title").unwrap(), "Chess");
/// assert!(validate_required_string("   ", "title").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", field_name)));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일 주소 정규화 (앞뒤 공백 제거, 소문자 변환)
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 숫자 필드 파싱
///
/// 값이 없거나 비어 있으면 `Ok(None)`입니다.
/// 숫자가 아니거나 유한하지 않은 값(`NaN`, `inf`)은 ValidationError입니다.
pub fn parse_optional_number(value: Option<&str>, field_name: &str) -> AppResult<Option<f64>> {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(AppError::ValidationError(format!(
            "{} must be a number, got '{}'",
            field_name, raw
        ))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// 문자열 또는 숫자를 문자열로 받는 역직렬화 함수
///
/// 폼(`cost=10`)과 JSON(`"cost": 10`) 본문을 같은 필드로 받을 때 사용합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct GameForm {
///     #[serde(default, deserialize_with = "deserialize_loose_string")]
///     cost: Option<String>,
/// }
/// ```
pub fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<LooseValue>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        LooseValue::Text(text) => text,
        LooseValue::Integer(number) => number.to_string(),
        LooseValue::Float(number) => number.to_string(),
    }))
}

//! # 사용자 요청 DTO
//!
//! 회원 가입, 정보 수정, 로그인 폼 본문입니다.
//!
//! ## 검증 규칙 (회원 가입)
//!
//! ### 사용자명 (`username`)
//! - 길이: 3-30자
//! - 허용 문자: 영문, 숫자, 언더스코어(_)
//!
//! ### 이메일 (`email`)
//! - 이메일 형식 (앞뒤 공백은 검증 전에 무시)
//!
//! ### 비밀번호 (`password`)
//! - 최소 길이: 8자
//!
//! 검증 메시지는 플래시 메시지로 그대로 화면에 표시됩니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// `POST /users/create` 본문
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(custom(function = "validate_email_address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// `PUT /users/{id}/update` 본문
///
/// 화이트리스트: `username`, `email`. 비밀번호는 이 경로로 바꿀 수 없습니다.
/// 보낸 필드에는 가입과 같은 규칙이 적용됩니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,

    #[validate(custom(function = "validate_email_address"))]
    pub email: Option<String>,
}

/// `POST /users/login` 본문
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 사용자명의 문자 제약을 검증합니다.
///
/// 알파벳, 숫자, 언더스코어만 허용합니다.
///
/// ```rust,ignore
/// assert!(validate_username("john_doe123").is_ok());
/// assert!(validate_username("user-name").is_err());
/// assert!(validate_username("user name").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("Username may only contain letters, numbers and underscores".into()));
    }
    Ok(())
}

/// 앞뒤 공백을 제외한 이메일 형식을 검증합니다.
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    use validator::ValidateEmail;

    if !email.trim().validate_email() {
        return Err(ValidationError::new("invalid_email")
            .with_message("Email is invalid".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("jon_snow", " Jon@Example.com ", "winteriscoming").validate().is_ok());
    }

    #[test]
    fn test_invalid_fields_are_reported() {
        let errors = request("j!", "not-an-email", "short").validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("user_2024").is_ok());
        assert!(validate_username("user-name").is_err());
        assert!(validate_username("user@domain").is_err());
        assert!(validate_username("user name").is_err());
    }

    #[test]
    fn test_update_request_uses_sign_up_rules() {
        let short = UpdateUserRequest {
            username: Some("jo".to_string()),
            email: None,
        };
        let long = UpdateUserRequest {
            username: Some("a".repeat(31)),
            email: None,
        };

        assert!(short.validate().unwrap_err().field_errors().contains_key("username"));
        assert!(long.validate().is_err());
        assert!(UpdateUserRequest::default().validate().is_ok());
    }

    #[test]
    fn test_login_request_from_form() {
        let login: LoginRequest = serde_urlencoded::from_str("username=jon&password=pw").unwrap();

        assert_eq!(login.username, "jon");
        assert_eq!(login.password, "pw");
    }
}

//! # 사용자 인증 서비스
//!
//! 로그인 폼의 자격 증명을 검증합니다.
//!
//! ## 보안 설계
//!
//! - **bcrypt 해싱**: 환경별 cost (`PasswordConfig::bcrypt_cost`)
//! - **동일한 실패 메시지**: 존재하지 않는 사용자와 틀린 비밀번호를 구분하지 않습니다.
//! - **실패 로깅**: 인증 실패는 `warn` 레벨로 기록합니다.

use std::sync::Arc;

use bcrypt::hash;

use crate::config::PasswordConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::User;
use crate::repositories::DocumentStore;

const INVALID_CREDENTIALS: &str = "잘못된 사용자명 또는 비밀번호입니다";

/// 사용자 인증 서비스
///
/// ```rust,ignore
/// let service = UserService::new(state.users.clone());
/// let user = service.authenticate("jon_snow", "winteriscoming").await?;
/// ```
pub struct UserService {
    users: Arc<dyn DocumentStore<User>>,
}

impl UserService {
    pub fn new(users: Arc<dyn DocumentStore<User>>) -> Self {
        Self { users }
    }

    /// 평문 비밀번호를 bcrypt로 해싱합니다.
    pub fn hash_password(password: &str) -> AppResult<String> {
        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        log::debug!("Password hashing took: {:?}", hash_start.elapsed());
        Ok(password_hash)
    }

    /// 저장된 해시와 비밀번호가 일치하는지 확인합니다.
    ///
    /// 해시 형식이 깨진 경우에도 `false`를 반환합니다.
    pub fn verify_password(user: &User, password: &str) -> bool {
        match bcrypt::verify(password, &user.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                log::error!("사용자 {}의 비밀번호 해시 검증 실패: {}", user.username, e);
                false
            }
        }
    }

    /// 사용자명과 비밀번호로 사용자를 인증합니다.
    ///
    /// # Errors
    ///
    /// * `AuthenticationError` - 사용자가 없거나 비밀번호가 틀린 경우
    /// * `DatabaseError` - 사용자 조회 실패
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let start_time = std::time::Instant::now();
        let username = username.trim();

        let user = self
            .users
            .find_one_by("username", username)
            .await?
            .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

        if !Self::verify_password(&user, password) {
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        log::debug!("Total password verification took: {:?}", start_time.elapsed());
        Ok(user)
    }
}

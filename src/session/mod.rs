//! # Typed Session Wrappers
//!
//! 쿠키 세션(`actix_session::Session`)에 저장하는 값을 관심사별로 감쌉니다.
//! 세션 키 문자열은 이 모듈 밖으로 나가지 않습니다.
//!
//! - `AuthSession` - 로그인한 사용자 ID (`auth:user`)
//! - `FlashSession` - 다음 요청에서 한 번만 보여줄 메시지 (`flash`)
//!
//! ```rust,ignore
//! AuthSession::new(req.session()).login(&user.id_string())?;
//! FlashSession::new(req.session()).success("Logged in!")?;
//! ```

use actix_session::Session;

use crate::core::errors::AppResult;
use crate::domain::models::FlashMessages;

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_FLASH: &str = "flash";

pub const FLASH_SUCCESS: &str = "success";
pub const FLASH_ERROR: &str = "error";

/// 인증 상태 세션
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// 로그인 처리. 세션 고정 공격을 막기 위해 세션 키를 갱신합니다.
    pub fn login(&self, user_id: &str) -> AppResult<()> {
        self.session.renew();
        self.session.insert(SESSION_AUTH_USER_ID, user_id)?;
        Ok(())
    }

    /// 로그인한 사용자 ID
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - 로그인 상태
    /// - `Ok(None)` - 비로그인
    /// - `Err(AppError::SessionError(_))` - 세션 값 역직렬화 실패
    pub fn user_id(&self) -> AppResult<Option<String>> {
        Ok(self.session.get::<String>(SESSION_AUTH_USER_ID)?)
    }

    /// 로그인 정보만 제거합니다. 같은 요청에서 추가한 플래시 메시지는 유지됩니다.
    pub fn logout(&self) {
        self.session.remove(SESSION_AUTH_USER_ID);
    }
}

/// 플래시 메시지 세션
///
/// 메시지는 종류(`success`, `error`)별 목록으로 저장되며,
/// `take_all`로 꺼내는 순간 세션에서 사라집니다.
pub struct FlashSession<'a> {
    session: &'a Session,
}

impl<'a> FlashSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn push(&self, kind: &str, message: impl Into<String>) -> AppResult<()> {
        let mut messages = self
            .session
            .get::<FlashMessages>(SESSION_FLASH)?
            .unwrap_or_default();

        messages.entry(kind.to_string()).or_default().push(message.into());
        self.session.insert(SESSION_FLASH, messages)?;
        Ok(())
    }

    pub fn success(&self, message: impl Into<String>) -> AppResult<()> {
        self.push(FLASH_SUCCESS, message)
    }

    pub fn error(&self, message: impl Into<String>) -> AppResult<()> {
        self.push(FLASH_ERROR, message)
    }

    /// 쌓인 메시지를 모두 꺼냅니다. 손상된 값은 버립니다.
    pub fn take_all(&self) -> FlashMessages {
        match self.session.remove_as::<FlashMessages>(SESSION_FLASH) {
            Some(Ok(messages)) => messages,
            Some(Err(raw)) => {
                log::warn!("플래시 메시지 역직렬화 실패, 폐기: {}", raw);
                FlashMessages::default()
            }
            None => FlashMessages::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::SessionExt;
    use actix_web::test::TestRequest;

    #[test]
    fn test_flash_messages_are_taken_once() {
        let req = TestRequest::default().to_http_request();
        let session = req.get_session();
        let flash = FlashSession::new(&session);

        flash.success("Logged in!").unwrap();
        flash.error("first").unwrap();
        flash.error("second").unwrap();

        let messages = flash.take_all();
        assert_eq!(messages[FLASH_SUCCESS], vec!["Logged in!"]);
        assert_eq!(messages[FLASH_ERROR], vec!["first", "second"]);
        assert!(flash.take_all().is_empty());
    }

    #[test]
    fn test_login_and_logout() {
        let req = TestRequest::default().to_http_request();
        let session = req.get_session();
        let auth = AuthSession::new(&session);

        assert_eq!(auth.user_id().unwrap(), None);

        auth.login("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        assert_eq!(auth.user_id().unwrap().as_deref(), Some("65a1f0c2e4b0a1b2c3d4e5f6"));

        FlashSession::new(&session).success("bye").unwrap();
        auth.logout();
        assert_eq!(auth.user_id().unwrap(), None);
        assert_eq!(FlashSession::new(&session).take_all()[FLASH_SUCCESS], vec!["bye"]);
    }
}

use std::collections::BTreeMap;
use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::entities::User;
use crate::domain::resource::Resource;

/// 종류(`success`, `error`)별 플래시 메시지 목록
pub type FlashMessages = BTreeMap<String, Vec<String>>;

/// 세션에 로그인한 사용자 (템플릿의 `currentUser`)
///
/// 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// 요청마다 `LocalsMiddleware`가 채워 넣는 값
#[derive(Debug, Clone, Default)]
pub struct RequestLocals {
    pub logged_in: bool,
    pub current_user: Option<CurrentUser>,
    pub flash_messages: FlashMessages,
}

impl RequestLocals {
    pub fn new(current_user: Option<CurrentUser>, flash_messages: FlashMessages) -> Self {
        Self {
            logged_in: current_user.is_some(),
            current_user,
            flash_messages,
        }
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 미들웨어가 없는 라우트에서는 비로그인 상태의 빈 값을 돌려줍니다.
impl FromRequest for RequestLocals {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let locals = req.extensions().get::<RequestLocals>().cloned().unwrap_or_default();
        ready(Ok(locals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_logged_in_follows_current_user() {
        let user = CurrentUser {
            id: "65a1f0c2e4b0a1b2c3d4e5f6".to_string(),
            username: "jon_snow".to_string(),
            email: "jon@wall.org".to_string(),
        };

        assert!(RequestLocals::new(Some(user), FlashMessages::new()).logged_in);
        assert!(!RequestLocals::new(None, FlashMessages::new()).logged_in);
    }

    #[actix_web::test]
    async fn test_extractor_defaults_to_anonymous() {
        let req = TestRequest::default().to_http_request();

        let locals = RequestLocals::extract(&req).await.unwrap();

        assert!(!locals.logged_in);
        assert!(locals.current_user.is_none());
    }
}

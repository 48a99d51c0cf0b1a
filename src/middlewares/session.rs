//! 쿠키 세션 미들웨어 구성

use actix_session::config::PersistentSession;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::time::Duration;
use actix_web::cookie::Key;

use crate::config::SessionConfig;

/// 서명/암호화된 쿠키에 세션 전체를 저장하는 미들웨어를 만듭니다.
///
/// `key`는 모든 워커가 같은 값을 써야 하므로 서버 시작 시 한 번 만들어 복제합니다.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SessionConfig::cookie_name())
        .cookie_secure(SessionConfig::cookie_secure())
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::seconds(SessionConfig::ttl_seconds())),
        )
        .build()
}

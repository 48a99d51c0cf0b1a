//! # Session & Traffic Configuration
//!
//! 쿠키 세션과 Rate Limiting 관련 설정입니다.
//!
//! ```bash
//! # 64바이트 이상의 임의 문자열
//! export SESSION_SECRET="...."
//! export SESSION_TTL_SECONDS="4000"
//! export SESSION_COOKIE_SECURE="false"
//!
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! ```

use std::env;

use actix_web::cookie::Key;
use log::{error, info, warn};

use crate::config::data_config::Environment;

/// 쿠키 세션 설정
///
/// 세션 데이터(로그인 사용자, 플래시 메시지)는 암호화된 쿠키에 저장됩니다.
pub struct SessionConfig;

impl SessionConfig {
    /// 쿠키 암호화 키 최소 길이 (바이트)
    pub const MIN_SECRET_LEN: usize = 64;
    pub const DEFAULT_TTL_SECONDS: i64 = 4000;

    /// 세션 쿠키 키를 반환합니다.
    ///
    /// `SESSION_SECRET`이 없거나 64바이트보다 짧으면 임의 키를 생성합니다.
    /// 이 경우 서버를 재시작하면 기존 세션은 모두 무효가 됩니다.
    pub fn key() -> Key {
        Self::key_from_secret(env::var("SESSION_SECRET").ok().as_deref())
    }

    pub fn key_from_secret(secret: Option<&str>) -> Key {
        match secret {
            Some(secret) if secret.len() >= Self::MIN_SECRET_LEN => {
                match Key::try_from(secret.as_bytes()) {
                    Ok(key) => key,
                    Err(e) => {
                        warn!("SESSION_SECRET으로 키 생성 실패: {}. 임의 키를 사용합니다", e);
                        Key::generate()
                    }
                }
            }
            Some(_) => {
                warn!(
                    "SESSION_SECRET이 {}바이트보다 짧습니다. 임의 키를 사용합니다",
                    Self::MIN_SECRET_LEN
                );
                Key::generate()
            }
            None => {
                warn!("SESSION_SECRET이 설정되지 않았습니다. 재시작 시 세션이 초기화됩니다");
                Key::generate()
            }
        }
    }

    /// 영속 세션 쿠키 수명 (초). 기본값: 4000
    pub fn ttl_seconds() -> i64 {
        env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|ttl| *ttl > 0)
            .unwrap_or(Self::DEFAULT_TTL_SECONDS)
    }

    /// 세션 쿠키 이름. 기본값: `catalog_session`
    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "catalog_session".to_string())
    }

    /// `Secure` 쿠키 속성 사용 여부
    ///
    /// 명시하지 않으면 프로덕션 환경에서만 `true`입니다.
    pub fn cookie_secure() -> bool {
        match env::var("SESSION_COOKIE_SECURE") {
            Ok(value) => matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"),
            Err(_) => Environment::current().is_production(),
        }
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        let config = Self {
            per_second,
            burst_size,
        };

        info!("Rate Limiting 설정 로드됨: {:?}", config);
        config
    }
}

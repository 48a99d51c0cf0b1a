//! # Configuration Module
//!
//! 환경 변수 기반 설정을 한곳에서 관리합니다.
//! 값은 호출 시점마다 환경 변수에서 읽으며, 없으면 개발용 기본값을 사용합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, MongoDB, 저장소 백엔드, bcrypt 설정
//! - [`app_config`] - 세션 쿠키, Rate Limiting 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="3000"
//!
//! # 저장소
//! export STORE_BACKEND="mongodb"     # mongodb | memory
//! export MONGODB_URI="mongodb://127.0.0.1:27017"
//! export DATABASE_NAME="finalProject"
//!
//! # 보안
//! export ENVIRONMENT="production"    # development, test, staging, production
//! export BCRYPT_COST="12"            # 4-15 범위
//! export SESSION_SECRET="<64바이트 이상>"
//! ```

pub mod data_config;
pub mod app_config;

pub use data_config::*;
pub use app_config::*;

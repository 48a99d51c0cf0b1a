//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사입니다. `main.rs`에서 다음 순서로 등록되며,
//! 위쪽이 바깥쪽(먼저 실행)입니다.
//!
//! | 순서 | 미들웨어 | 역할 |
//! |------|----------|------|
//! | 1 | `Logger` | 요청 로그 |
//! | 2 | `NormalizePath::trim` | 끝 슬래시 제거 |
//! | 3 | `MethodOverride` | `_method` 쿼리로 PUT/DELETE 표현 |
//! | 4 | `session_middleware` | 쿠키 세션 |
//! | 5 | `LocalsMiddleware` | 로그인 상태와 플래시 메시지 준비 |
//! | 6 | `Governor` | 요청 속도 제한 (`Unpin` future를 요구하므로 라우팅 바로 바깥) |
//!
//! actix-web에서는 마지막에 `.wrap()`한 미들웨어가 가장 바깥쪽이므로
//! 코드에서는 역순으로 등록합니다.

pub mod locals_inner;
pub mod locals_middleware;
pub mod method_override;
pub mod session;

pub use locals_middleware::LocalsMiddleware;
pub use method_override::MethodOverride;
pub use session::session_middleware;

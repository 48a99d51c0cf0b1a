//! 게임/도서 카탈로그 메인 애플리케이션
//!
//! 환경 설정을 읽고 저장소(MongoDB 또는 메모리)와 템플릿을 준비한 뒤
//! Actix-web HTTP 서버를 구동합니다.

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use game_book_catalog::config::{RateLimitConfig, ServerConfig, SessionConfig, StoreBackend, StoreConfig};
use game_book_catalog::core::errors::AppResult;
use game_book_catalog::db::Database;
use game_book_catalog::handlers::not_found;
use game_book_catalog::middlewares::{session_middleware, LocalsMiddleware, MethodOverride};
use game_book_catalog::routes::configure_all_routes;
use game_book_catalog::state::AppState;
use game_book_catalog::utils::display_terminal::{
    print_banner, print_ready, print_step_done, print_step_start,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    print_banner("🎮 Game & Book Catalog");
    info!("🚀 카탈로그 서비스 시작중...");

    let backend = StoreConfig::backend();

    print_step_start(1, "저장소 초기화");
    let state = initialize_state(backend).await.map_err(|e| {
        error!("저장소 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    print_step_done(1, "저장소 초기화", &format!("{}, {} collections", backend.as_str(), AppState::COLLECTIONS));

    print_step_start(2, "템플릿 등록");
    print_step_done(2, "템플릿 등록", &format!("{} templates", state.views.template_count()));

    let bind_address = ServerConfig::bind_address();
    print_ready(backend.as_str(), AppState::COLLECTIONS, &bind_address);

    start_http_server(state, bind_address).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 바깥쪽부터 요청 로그, 경로 정규화, 메서드 오버라이드, 세션,
/// 요청 로컬 값, Rate Limiting 순서로 실행됩니다. `Governor`는 감싸는 서비스의
/// future가 `Unpin`이어야 하므로 라우팅 바로 바깥에 둡니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패, 잘못된 Rate Limiting 설정
async fn start_http_server(state: AppState, bind_address: String) -> std::io::Result<()> {
    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다 (0 값)"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    // 모든 워커가 같은 키를 써야 쿠키가 워커를 넘나들어도 유효합니다
    let session_key = SessionConfig::key();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            // 안쪽부터 등록 (마지막 wrap이 가장 바깥)
            .wrap(Governor::new(&governor_conf))
            .wrap(LocalsMiddleware)
            .wrap(session_middleware(session_key.clone()))
            .wrap(MethodOverride)
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .configure(configure_all_routes)
            .default_service(web::to(not_found))
    })
    .bind(&bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// 프로필 파일이 없으면 기본 .env 파일로 대신합니다.
///
/// ```bash
/// PROFILE=prod cargo run
/// ```
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    let profile_file = match profile.as_str() {
        "prod" => Some(".env.prod"),
        "dev" => Some(".env.dev"),
        _ => None,
    };

    match profile_file.map(dotenv::from_filename) {
        Some(Ok(_)) => info!("{:?} 파일 로드 됨", profile_file),
        Some(Err(e)) => {
            warn!("{:?} 파일 로드 실패: {}. 기본 .env 사용", profile_file, e);
            dotenv().ok();
        }
        None => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=game_book_catalog=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 설정된 백엔드로 저장소를 구성합니다
///
/// MongoDB 백엔드는 연결 확인(`ping`)과 unique 인덱스 생성까지 마친 뒤 반환합니다.
async fn initialize_state(backend: StoreBackend) -> AppResult<AppState> {
    match backend {
        StoreBackend::Memory => {
            warn!("⚠️ 메모리 저장소 사용: 서버를 재시작하면 데이터가 사라집니다");
            AppState::in_memory()
        }
        StoreBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");
            let database = Database::connect().await?;
            AppState::with_mongo(&database).await
        }
    }
}

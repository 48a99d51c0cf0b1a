//! `main.rs`와 같은 전체 미들웨어 스택 (요청 로그, Rate Limiting 포함)

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::test::{call_service, init_service, TestRequest};
use actix_web::{middleware, web, App};

use game_book_catalog::handlers::not_found;
use game_book_catalog::middlewares::{session_middleware, LocalsMiddleware, MethodOverride};
use game_book_catalog::routes::configure_all_routes;
use game_book_catalog::state::AppState;

#[actix_web::test]
async fn test_full_stack_serves_pages_and_limits_bursts() {
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(1)
        .burst_size(2)
        .use_headers()
        .finish()
        .unwrap();

    let app = init_service(
        App::new()
            .app_data(web::Data::new(AppState::in_memory().unwrap()))
            .wrap(Governor::new(&governor_conf))
            .wrap(LocalsMiddleware)
            .wrap(session_middleware(Key::generate()))
            .wrap(MethodOverride)
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .configure(configure_all_routes)
            .default_service(web::to(not_found)),
    )
    .await;

    let request = || {
        TestRequest::get()
            .uri("/about/")
            .peer_addr("127.0.0.1:40000".parse().unwrap())
            .to_request()
    };

    assert_eq!(call_service(&app, request()).await.status(), StatusCode::OK);
    assert_eq!(call_service(&app, request()).await.status(), StatusCode::OK);
    assert_eq!(
        call_service(&app, request()).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test::TestRequest;

/// 메모리 저장소로 전체 애플리케이션을 구성합니다. `(service, state)`를 반환합니다.
///
/// Rate Limiting과 요청 로그를 뺀 나머지 미들웨어는 `main.rs`와 같은 순서입니다.
macro_rules! catalog_app {
    () => {{
        let state = actix_web::web::Data::new(
            game_book_catalog::state::AppState::in_memory().unwrap(),
        );
        let app = actix_web::test::init_service(
            actix_web::App::new()
                .app_data(state.clone())
                .wrap(game_book_catalog::middlewares::LocalsMiddleware)
                .wrap(game_book_catalog::middlewares::session_middleware(
                    actix_web::cookie::Key::generate(),
                ))
                .wrap(game_book_catalog::middlewares::MethodOverride)
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(game_book_catalog::routes::configure_all_routes)
                .default_service(actix_web::web::to(game_book_catalog::handlers::not_found)),
        )
        .await;
        (app, state)
    }};
}

pub fn form_post(uri: &str, fields: &[(&str, &str)]) -> TestRequest {
    TestRequest::post().uri(uri).set_form(fields)
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// 응답이 세션 쿠키를 새로 내려주면 그것을, 아니면 기존 쿠키를 유지합니다.
pub fn session_cookie<B>(
    resp: &ServiceResponse<B>,
    current: Option<Cookie<'static>>,
) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .next()
        .map(|cookie| cookie.into_owned())
        .or(current)
}

pub fn with_cookie(req: TestRequest, cookie: &Option<Cookie<'static>>) -> TestRequest {
    match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}

pub fn body_text(bytes: actix_web::web::Bytes) -> String {
    String::from_utf8_lossy(&bytes).to_string()
}

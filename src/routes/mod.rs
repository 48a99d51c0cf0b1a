//! 라우트 설정 모듈
//!
//! (메서드, 경로)마다 실행할 단계 체인을 등록합니다.
//!
//! # Route Groups
//!
//! - 헬스체크: `GET /health`
//! - 정적 페이지: `/`, `/about`, `/transportation`
//! - 세션 인증: `GET|POST /users/login`, `GET /users/logout`
//! - 리소스 CRUD: `/users`, `/games`, `/books` (경로 규칙은 `handlers::resource` 참고)
//!
//! 경로는 등록 순서대로 매칭되므로 `/users/login`, `/{c}/new` 같은 고정 경로를
//! `/{c}/{id}`보다 먼저 등록합니다. `cfg.route`는 메서드 가드를 리소스 단위로
//! 올리기 때문에 메서드가 다른 요청은 다음 후보로 넘어가고, 끝까지 맞는 것이
//! 없으면 `default_service`(404)가 응답합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(state))
//!     .configure(configure_all_routes)
//!     .default_service(web::to(handlers::not_found));
//! ```

use actix_session::Session;
use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse, Route};
use serde_json::json;

use crate::core::chain::Chain;
use crate::domain::entities::{Book, Game, User};
use crate::domain::models::RequestLocals;
use crate::domain::resource::Resource;
use crate::handlers::{
    Authenticate, LoginForm, Logout, ResourceAction, ResourceStep, StaticPage, ValidateUser,
};

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_page_routes(cfg);
    configure_auth_routes(cfg);

    configure_resource_routes::<User>(cfg, Chain::new().then(ValidateUser));
    configure_resource_routes::<Game>(cfg, Chain::new());
    configure_resource_routes::<Book>(cfg, Chain::new());
}

/// 체인을 실행하는 라우트를 만듭니다.
///
/// 본문은 바이트로 한 번 읽어 두고, 각 단계가 필요한 형태로 파싱합니다.
fn chain_route(method: Method, chain: Chain) -> Route {
    web::method(method).to(
        move |http: HttpRequest, body: web::Bytes, session: Session, locals: RequestLocals| {
            let chain = chain.clone();
            async move { chain.dispatch(http, body, session, locals).await }
        },
    )
}

fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    for page in [StaticPage::HOME, StaticPage::ABOUT, StaticPage::TRANSPORTATION] {
        let path = if page.page == "home" {
            "/".to_string()
        } else {
            format!("/{}", page.page)
        };
        cfg.route(&path, chain_route(Method::GET, Chain::new().then(page)));
    }
}

/// 세션 로그인/로그아웃
///
/// - `GET /users/login` - 로그인 화면
/// - `POST /users/login` - 자격 증명 확인 후 `/` 또는 `/users/login`으로 리다이렉트
/// - `GET /users/logout` - 로그아웃 후 `/`로 리다이렉트
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    let redirect = || ResourceStep::<User>::new(ResourceAction::RedirectView);

    cfg.route("/users/login", chain_route(Method::GET, Chain::new().then(LoginForm)));
    cfg.route(
        "/users/login",
        chain_route(Method::POST, Chain::new().then(Authenticate).then(redirect())),
    );
    cfg.route(
        "/users/logout",
        chain_route(Method::GET, Chain::new().then(Logout).then(redirect())),
    );
}

/// 리소스 하나의 CRUD 라우트를 등록합니다.
///
/// `before_create`는 create 단계 앞에 붙는 단계들입니다 (사용자 가입 검증 등).
fn configure_resource_routes<R: Resource>(cfg: &mut web::ServiceConfig, before_create: Chain) {
    let base = R::collection_path();
    let step = |action| ResourceStep::<R>::new(action);

    cfg.route(
        &base,
        chain_route(
            Method::GET,
            Chain::new().then(step(ResourceAction::Index)).then(step(ResourceAction::IndexView)),
        ),
    );
    cfg.route(
        &format!("{base}/new"),
        chain_route(Method::GET, Chain::new().then(step(ResourceAction::New))),
    );
    cfg.route(
        &format!("{base}/create"),
        chain_route(
            Method::POST,
            before_create
                .then(step(ResourceAction::Create))
                .then(step(ResourceAction::RedirectView)),
        ),
    );
    cfg.route(
        &format!("{base}/{{id}}"),
        chain_route(
            Method::GET,
            Chain::new().then(step(ResourceAction::Show)).then(step(ResourceAction::ShowView)),
        ),
    );
    cfg.route(
        &format!("{base}/{{id}}/edit"),
        chain_route(Method::GET, Chain::new().then(step(ResourceAction::Edit))),
    );
    cfg.route(
        &format!("{base}/{{id}}/update"),
        chain_route(
            Method::PUT,
            Chain::new()
                .then(step(ResourceAction::Update))
                .then(step(ResourceAction::RedirectView)),
        ),
    );
    cfg.route(
        &format!("{base}/{{id}}/delete"),
        chain_route(
            Method::DELETE,
            Chain::new()
                .then(step(ResourceAction::Delete))
                .then(step(ResourceAction::RedirectView)),
        ),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:3000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "game_book_catalog",
///   "timestamp": "2026-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

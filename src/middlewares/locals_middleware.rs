//! 요청 로컬 값 미들웨어
//!
//! 모든 요청에서 세션을 읽어 템플릿 공통 값(`loggedIn`, `currentUser`,
//! `flashMessages`)을 준비하고 request extensions에 `RequestLocals`로 넣습니다.
//! 라우트 핸들러는 `RequestLocals` 추출자로 이 값을 받습니다.
//!
//! 세션 미들웨어 안쪽에 등록해야 합니다.
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(LocalsMiddleware)
//!     .wrap(session_middleware(key.clone()))
//! ```

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;

use crate::middlewares::locals_inner::LocalsMiddlewareService;

pub struct LocalsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for LocalsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = LocalsMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LocalsMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{AppError, AppResult};
    use crate::domain::entities::{Book, Game, User};
    use crate::domain::models::RequestLocals;
    use crate::middlewares::session_middleware;
    use crate::repositories::{DocumentStore, MemoryStore};
    use crate::session::{AuthSession, FlashSession};
    use crate::state::AppState;
    use actix_session::Session;
    use actix_web::cookie::Key;
    use actix_web::test::{call_service, init_service, read_body, TestRequest};
    use actix_web::{web, App, HttpResponse};
    use async_trait::async_trait;
    use mongodb::bson::Document;
    use std::sync::Arc;

    async fn describe(locals: RequestLocals) -> HttpResponse {
        let username = locals
            .current_user
            .map(|user| user.username)
            .unwrap_or_else(|| "anonymous".to_string());
        let flashes: usize = locals.flash_messages.values().map(Vec::len).sum();
        HttpResponse::Ok().body(format!("{}:{}:{}", locals.logged_in, username, flashes))
    }

    async fn sign_in(session: Session, state: web::Data<AppState>) -> HttpResponse {
        let user = state
            .users
            .create(User::new_local("arya".to_string(), "arya@stark.org".to_string(), "x".to_string()))
            .await
            .unwrap();
        AuthSession::new(&session).login(&user.id.unwrap().to_hex()).unwrap();
        FlashSession::new(&session).success("Logged in!").unwrap();
        HttpResponse::Ok().finish()
    }

    async fn stale_sign_in(session: Session) -> HttpResponse {
        AuthSession::new(&session).login("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_locals_follow_session() {
        let app = init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory().unwrap()))
                .wrap(LocalsMiddleware)
                .wrap(session_middleware(Key::generate()))
                .route("/locals", web::get().to(describe))
                .route("/sign-in", web::get().to(sign_in))
                .route("/stale", web::get().to(stale_sign_in)),
        )
        .await;

        let resp = call_service(&app, TestRequest::get().uri("/locals").to_request()).await;
        assert_eq!(read_body(resp).await, "false:anonymous:0");

        let resp = call_service(&app, TestRequest::get().uri("/sign-in").to_request()).await;
        let cookie = resp.response().cookies().next().unwrap().into_owned();

        let resp = call_service(
            &app,
            TestRequest::get().uri("/locals").cookie(cookie.clone()).to_request(),
        )
        .await;
        let drained = resp.response().cookies().next().map(|c| c.into_owned());
        assert_eq!(read_body(resp).await, "true:arya:1");

        let resp = call_service(
            &app,
            TestRequest::get()
                .uri("/locals")
                .cookie(drained.unwrap_or(cookie))
                .to_request(),
        )
        .await;
        assert_eq!(read_body(resp).await, "true:arya:0");

        let resp = call_service(&app, TestRequest::get().uri("/stale").to_request()).await;
        let stale = resp.response().cookies().next().unwrap().into_owned();
        let resp = call_service(&app, TestRequest::get().uri("/locals").cookie(stale).to_request()).await;
        assert_eq!(read_body(resp).await, "false:anonymous:0");
    }

    /// 모든 조회가 실패하는 사용자 저장소 (DB 장애)
    struct UnreachableUsers;

    fn unreachable() -> AppError {
        AppError::DatabaseError("server selection timeout".to_string())
    }

    #[async_trait]
    impl DocumentStore<User> for UnreachableUsers {
        async fn find_all(&self) -> AppResult<Vec<User>> {
            Err(unreachable())
        }

        async fn find_by_id(&self, _id: &str) -> AppResult<Option<User>> {
            Err(unreachable())
        }

        async fn find_one_by(&self, _field: &str, _value: &str) -> AppResult<Option<User>> {
            Err(unreachable())
        }

        async fn create(&self, _record: User) -> AppResult<User> {
            Err(unreachable())
        }

        async fn find_by_id_and_update(&self, _id: &str, _changes: Document) -> AppResult<Option<User>> {
            Err(unreachable())
        }

        async fn find_by_id_and_delete(&self, _id: &str) -> AppResult<Option<User>> {
            Err(unreachable())
        }
    }

    async fn principal(session: Session, locals: RequestLocals) -> HttpResponse {
        let user_id = AuthSession::new(&session).user_id().unwrap();
        HttpResponse::Ok().body(format!("{}:{}", locals.logged_in, user_id.unwrap_or_default()))
    }

    #[actix_web::test]
    async fn test_store_outage_keeps_session_principal() {
        let state = AppState::new(
            Arc::new(MemoryStore::<Game>::new()),
            Arc::new(MemoryStore::<Book>::new()),
            Arc::new(UnreachableUsers),
        )
        .unwrap();
        let app = init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(LocalsMiddleware)
                .wrap(session_middleware(Key::generate()))
                .route("/principal", web::get().to(principal))
                .route("/stale", web::get().to(stale_sign_in)),
        )
        .await;

        let resp = call_service(&app, TestRequest::get().uri("/stale").to_request()).await;
        let cookie = resp.response().cookies().next().unwrap().into_owned();

        let resp = call_service(
            &app,
            TestRequest::get().uri("/principal").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(read_body(resp).await, "false:65a1f0c2e4b0a1b2c3d4e5f6");
    }
}

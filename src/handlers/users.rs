//! # User Handlers
//!
//! 회원 가입 검증과 세션 로그인/로그아웃 단계입니다. 사용자 CRUD 자체는
//! `ResourceStep<User>`가 처리하고, 이 모듈은 그 앞뒤에 붙는 단계만 제공합니다.
//!
//! | 메서드 | 경로 | 체인 |
//! |--------|------|------|
//! | `POST` | `/users/create` | validate → create → redirectView |
//! | `GET` | `/users/login` | login |
//! | `POST` | `/users/login` | authenticate → redirectView |
//! | `GET` | `/users/logout` | logout → redirectView |
//!
//! 실패 시 응답은 모두 리다이렉트와 플래시 메시지입니다. 로그인 실패는
//! 에러 페이지가 아니라 로그인 화면으로 돌아갑니다.

use async_trait::async_trait;
use log::{info, warn};
use validator::Validate;

use crate::core::chain::{ChainRequest, Flow, Handler, ResponseContext, View};
use crate::core::errors::{validation_messages, AppError, AppResult};
use crate::domain::dto::{CreateUserRequest, LoginRequest};
use crate::domain::entities::User;
use crate::domain::resource::Resource;
use crate::services::users::UserService;
use crate::session::{AuthSession, FlashSession};

pub const LOGIN_PATH: &str = "/users/login";
pub const SIGN_UP_PATH: &str = "/users/new";
pub const HOME_PATH: &str = "/";

pub const LOGGED_IN_MESSAGE: &str = "Logged in!";
pub const LOGIN_FAILED_MESSAGE: &str = "Failed to login.";
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out!";

/// 회원 가입 폼 검증
///
/// 실패하면 메시지마다 에러 플래시를 남기고 가입 화면으로 리다이렉트를 예약한 뒤,
/// 이후 단계(`create`)가 아무것도 하지 않도록 표시합니다.
pub struct ValidateUser;

#[async_trait(?Send)]
impl Handler for ValidateUser {
    fn name(&self) -> &'static str {
        "validate"
    }

    async fn handle(&self, req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow> {
        let form: CreateUserRequest = req.form()?;

        if let Err(errors) = form.validate() {
            let messages = validation_messages(&errors);
            warn!("회원 가입 검증 실패 ({}): {}", form.username, messages.join(", "));

            let flash = FlashSession::new(req.session());
            for message in messages {
                flash.error(message)?;
            }
            ctx.stage_redirect(SIGN_UP_PATH);
            ctx.skip_remaining();
        }

        Ok(Flow::Next)
    }
}

/// 로그인 화면
pub struct LoginForm;

#[async_trait(?Send)]
impl Handler for LoginForm {
    fn name(&self) -> &'static str {
        "login"
    }

    async fn handle(&self, _req: &ChainRequest, _ctx: &mut ResponseContext) -> AppResult<Flow> {
        let view = View::new("login", "login", "Login").with("action", LOGIN_PATH)?;
        Ok(Flow::Render(view))
    }
}

/// 자격 증명을 확인하고 세션에 로그인 사용자를 기록합니다.
pub struct Authenticate;

#[async_trait(?Send)]
impl Handler for Authenticate {
    fn name(&self) -> &'static str {
        "authenticate"
    }

    async fn handle(&self, req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow> {
        let credentials: LoginRequest = req.form()?;
        let service = UserService::new(User::store(req.state()?));
        let flash = FlashSession::new(req.session());

        match service.authenticate(&credentials.username, &credentials.password).await {
            Ok(user) => {
                AuthSession::new(req.session()).login(&user.id_string())?;
                info!("로그인 성공: {}", user.username);

                flash.success(LOGGED_IN_MESSAGE)?;
                ctx.stage_redirect(HOME_PATH);
            }
            Err(AppError::AuthenticationError(reason)) => {
                warn!("로그인 실패 ({}): {}", credentials.username.trim(), reason);

                flash.error(LOGIN_FAILED_MESSAGE)?;
                ctx.stage_redirect(LOGIN_PATH);
            }
            Err(e) => return Err(e),
        }

        Ok(Flow::Next)
    }
}

/// 세션의 로그인 정보를 지웁니다. 비로그인 상태에서도 같은 응답입니다.
pub struct Logout;

#[async_trait(?Send)]
impl Handler for Logout {
    fn name(&self) -> &'static str {
        "logout"
    }

    async fn handle(&self, req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow> {
        let auth = AuthSession::new(req.session());
        if let Some(user_id) = auth.user_id().unwrap_or_default() {
            info!("로그아웃: {}", user_id);
        }
        auth.logout();

        FlashSession::new(req.session()).success(LOGGED_OUT_MESSAGE)?;
        ctx.stage_redirect(HOME_PATH);
        Ok(Flow::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RequestLocals;
    use crate::repositories::DocumentStore;
    use crate::session::{FLASH_ERROR, FLASH_SUCCESS};
    use crate::state::AppState;
    use actix_session::SessionExt;
    use actix_web::http::header;
    use actix_web::test::TestRequest;
    use actix_web::web;

    fn form_request(state: AppState, body: &'static str) -> ChainRequest {
        let http = TestRequest::post()
            .app_data(web::Data::new(state))
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .to_http_request();
        let session = http.get_session();
        ChainRequest::new(http, web::Bytes::from_static(body.as_bytes()), session)
    }

    fn context() -> ResponseContext {
        ResponseContext::from_locals(&RequestLocals::default())
    }

    #[actix_web::test]
    async fn test_invalid_sign_up_skips_create() {
        let req = form_request(AppState::in_memory().unwrap(), "username=a!&email=nope&password=short");
        let mut ctx = context();

        ValidateUser.handle(&req, &mut ctx).await.unwrap();

        assert!(ctx.should_skip());
        assert_eq!(ctx.redirect_target(), Some(SIGN_UP_PATH));
        let flashes = FlashSession::new(req.session()).take_all();
        assert!(flashes[FLASH_ERROR].len() >= 3);
        assert!(flashes[FLASH_ERROR].contains(&"Password must be at least 8 characters".to_string()));
    }

    #[actix_web::test]
    async fn test_valid_sign_up_passes_through() {
        let req = form_request(
            AppState::in_memory().unwrap(),
            "username=jon_snow&email=jon%40wall.org&password=winteriscoming",
        );
        let mut ctx = context();

        ValidateUser.handle(&req, &mut ctx).await.unwrap();

        assert!(!ctx.should_skip());
        assert!(ctx.redirect_target().is_none());
    }

    #[actix_web::test]
    async fn test_authenticate_success_and_failure() {
        let state = AppState::in_memory().unwrap();
        let hash = UserService::hash_password("winteriscoming").unwrap();
        state
            .users
            .create(User::new_local("jon_snow".to_string(), "jon@wall.org".to_string(), hash))
            .await
            .unwrap();

        let ok = form_request(state.clone(), "username=jon_snow&password=winteriscoming");
        let mut ctx = context();
        Authenticate.handle(&ok, &mut ctx).await.unwrap();
        assert_eq!(ctx.redirect_target(), Some(HOME_PATH));
        assert!(AuthSession::new(ok.session()).user_id().unwrap().is_some());
        assert_eq!(FlashSession::new(ok.session()).take_all()[FLASH_SUCCESS], vec![LOGGED_IN_MESSAGE]);

        let bad = form_request(state, "username=jon_snow&password=wrong");
        let mut ctx = context();
        Authenticate.handle(&bad, &mut ctx).await.unwrap();
        assert_eq!(ctx.redirect_target(), Some(LOGIN_PATH));
        assert!(AuthSession::new(bad.session()).user_id().unwrap().is_none());
        assert_eq!(FlashSession::new(bad.session()).take_all()[FLASH_ERROR], vec![LOGIN_FAILED_MESSAGE]);
    }

    #[actix_web::test]
    async fn test_logout_clears_user() {
        let req = form_request(AppState::in_memory().unwrap(), "");
        AuthSession::new(req.session()).login("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let mut ctx = context();

        Logout.handle(&req, &mut ctx).await.unwrap();

        assert!(AuthSession::new(req.session()).user_id().unwrap().is_none());
        assert_eq!(ctx.redirect_target(), Some(HOME_PATH));
    }
}

use std::rc::Rc;

use actix_session::{Session, SessionExt};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::{AppError, AppResult};
use crate::domain::models::{CurrentUser, RequestLocals};
use crate::repositories::DocumentStore;
use crate::session::{AuthSession, FlashSession};
use crate::state::AppState;

/// 세션에서 요청 로컬 값을 만드는 서비스
pub struct LocalsMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for LocalsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let session = req.get_session();
            let flash_messages = FlashSession::new(&session).take_all();

            let current_user = match load_current_user(&req, &session).await {
                Ok(user) => user,
                // 읽을 수 없는 principal은 세션에서 지웁니다
                Err(err @ (AppError::SessionError(_) | AppError::ValidationError(_))) => {
                    log::warn!("세션 principal 손상, 로그인 정보 제거: {}", err);
                    AuthSession::new(&session).logout();
                    None
                }
                // 저장소 장애 등은 이번 요청만 비로그인으로 처리하고 세션은 유지합니다
                Err(err) => {
                    log::error!("세션 사용자 조회 실패, 비로그인으로 처리: {}", err);
                    None
                }
            };

            if let Some(user) = &current_user {
                log::debug!("세션 사용자: {} ({})", user.username, user.id);
            }

            req.extensions_mut()
                .insert(RequestLocals::new(current_user, flash_messages));

            service.call(req).await
        })
    }
}

/// 세션 principal의 사용자를 조회합니다. 더 이상 존재하지 않는 사용자는 세션에서 지웁니다.
async fn load_current_user(req: &ServiceRequest, session: &Session) -> AppResult<Option<CurrentUser>> {
    let auth = AuthSession::new(session);
    let Some(user_id) = auth.user_id()? else {
        return Ok(None);
    };

    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("AppState가 등록되지 않았습니다".to_string()))?;

    match state.users.find_by_id(&user_id).await? {
        Some(user) => Ok(Some(CurrentUser::from(&user))),
        None => {
            log::info!("세션 사용자 {} 없음, 로그인 정보 제거", user_id);
            auth.logout();
            Ok(None)
        }
    }
}

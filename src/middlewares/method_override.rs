//! HTTP 메서드 오버라이드 미들웨어
//!
//! HTML 폼은 GET/POST만 보낼 수 있으므로 `_method` 쿼리 파라미터로 실제 메서드를
//! 지정합니다. 라우팅보다 먼저 실행되어야 PUT/DELETE 라우트에 매칭됩니다.
//!
//! ```text
//! POST /games/65a1.../update?_method=PUT  →  PUT /games/65a1.../update
//! ```

use std::collections::HashMap;
use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{web, Error};
use futures_util::future::LocalBoxFuture;

const METHOD_PARAM: &str = "_method";

/// 오버라이드 후 요청 메서드를 계산합니다.
///
/// GET/POST 요청의 `_method` 값이 유효한 메서드 이름(대소문자 무관)일 때만
/// `Some`을 반환합니다.
pub fn override_method(method: &Method, query: &str) -> Option<Method> {
    if method != Method::GET && method != Method::POST {
        return None;
    }

    let params = web::Query::<HashMap<String, String>>::from_query(query).ok()?;
    let requested = params.get(METHOD_PARAM)?.trim().to_ascii_uppercase();
    if requested.is_empty() {
        return None;
    }

    Method::from_bytes(requested.as_bytes()).ok()
}

pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideService {
            service: Rc::new(service),
        }))
    }
}

pub struct MethodOverrideService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if let Some(method) = override_method(req.method(), req.query_string()) {
            log::debug!("메서드 오버라이드: {} → {} {}", req.method(), method, req.path());
            req.head_mut().method = method;
        }

        let service = self.service.clone();
        Box::pin(async move { service.call(req).await })
    }
}

//! # Handler Chain
//!
//! 라우트 하나에 연결된 처리 단계들을 순서대로 실행하는 모듈입니다.
//!
//! 각 단계(`Handler`)는 요청(`ChainRequest`)과 요청 범위 컨텍스트(`ResponseContext`)를
//! 받아 다음 셋 중 하나를 돌려줍니다.
//!
//! - `Flow::Next`: 다음 단계로 넘어갑니다.
//! - `Flow::Render(view)`: 레이아웃 안에 템플릿을 렌더링하고 체인을 끝냅니다.
//! - `Flow::Redirect(path)`: 302 응답으로 체인을 끝냅니다.
//!
//! 에러(`Err(AppError)`)를 반환하면 체인이 즉시 중단되고 `ResponseError` 구현이
//! 에러 페이지를 만듭니다. 마지막 단계까지 `Next`만 돌아오면 404입니다.
//!
//! ```text
//! POST /games/create
//!   ┌──────────┐  stage(record), stage_redirect("/games")  ┌──────────────┐
//!   │  create  │ ─────────────── Flow::Next ─────────────▶ │ redirectView │ ─▶ 302 /games
//!   └──────────┘                                           └──────────────┘
//! ```
//!
//! 단계 사이의 데이터 전달은 오직 `ResponseContext`를 통해서만 이루어집니다.

use std::rc::Rc;

use actix_session::Session;
use actix_web::http::header;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::RequestLocals;
use crate::state::AppState;

/// 템플릿에서 로그인 여부를 확인하는 키
pub const LOCAL_LOGGED_IN: &str = "loggedIn";
/// 템플릿에서 현재 사용자를 참조하는 키
pub const LOCAL_CURRENT_USER: &str = "currentUser";
/// 이번 요청에서 표시할 플래시 메시지 키
pub const LOCAL_FLASH_MESSAGES: &str = "flashMessages";

/// 단계 실행 결과
#[derive(Debug)]
pub enum Flow {
    Next,
    Render(View),
    Redirect(String),
}

/// 렌더링할 템플릿과 페이지 고유 데이터
#[derive(Debug, Clone)]
pub struct View {
    pub template: &'static str,
    pub page: String,
    pub title: String,
    data: Map<String, Value>,
}

impl View {
    pub fn new(template: &'static str, page: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            template,
            page: page.into(),
            title: title.into(),
            data: Map::new(),
        }
    }

    /// 직렬화 가능한 값을 페이지 데이터로 추가합니다.
    pub fn with<T: Serialize>(mut self, key: &str, value: T) -> AppResult<Self> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("뷰 데이터 '{}' 직렬화 실패", key))?;
        self.data.insert(key.to_string(), value);
        Ok(self)
    }

    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

/// 요청 범위 응답 컨텍스트
///
/// 체인의 단계들이 주고받는 유일한 통로입니다. 요청마다 새로 만들어지며
/// 다른 요청과 공유되지 않습니다.
///
/// - `locals`: 템플릿에 그대로 전달되는 값들 (`loggedIn`, `currentUser`, 조회된 레코드 등)
/// - `redirect`: 나중 단계가 처리할 리다이렉트 대상. `take_redirect`로 한 번만 꺼낼 수 있습니다.
/// - `skip`: 앞 단계가 이후의 변경 작업을 건너뛰도록 표시한 경우
#[derive(Debug, Default)]
pub struct ResponseContext {
    locals: Map<String, Value>,
    redirect: Option<String>,
    skip: bool,
}

impl ResponseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 미들웨어가 준비한 요청 로컬 값으로 컨텍스트를 시작합니다.
    pub fn from_locals(locals: &RequestLocals) -> Self {
        let mut context = Self::new();

        context
            .locals
            .insert(LOCAL_LOGGED_IN.to_string(), Value::Bool(locals.logged_in));
        context.locals.insert(
            LOCAL_CURRENT_USER.to_string(),
            serde_json::to_value(&locals.current_user).unwrap_or(Value::Null),
        );
        context.locals.insert(
            LOCAL_FLASH_MESSAGES.to_string(),
            serde_json::to_value(&locals.flash_messages).unwrap_or_default(),
        );

        context
    }

    pub fn stage<T: Serialize>(&mut self, key: &str, value: T) -> AppResult<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("컨텍스트 값 '{}' 직렬화 실패", key))?;
        self.locals.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.locals.get(key)
    }

    pub fn locals(&self) -> &Map<String, Value> {
        &self.locals
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.locals.get(LOCAL_LOGGED_IN), Some(Value::Bool(true)))
    }

    pub fn stage_redirect(&mut self, path: impl Into<String>) {
        self.redirect = Some(path.into());
    }

    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    /// 예약된 리다이렉트를 꺼냅니다. 두 번째 호출은 항상 `None`입니다.
    pub fn take_redirect(&mut self) -> Option<String> {
        self.redirect.take()
    }

    pub fn skip_remaining(&mut self) {
        self.skip = true;
    }

    pub fn should_skip(&self) -> bool {
        self.skip
    }
}

/// 체인 단계가 보는 요청
///
/// 본문은 라우트 진입 시 한 번 읽어 두고, 필요한 단계가 원하는 타입으로 파싱합니다.
pub struct ChainRequest {
    http: HttpRequest,
    body: web::Bytes,
    session: Session,
}

impl ChainRequest {
    pub fn new(http: HttpRequest, body: web::Bytes, session: Session) -> Self {
        Self { http, body, session }
    }

    pub fn http(&self) -> &HttpRequest {
        &self.http
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 경로 파라미터(`{id}` 등)를 가져옵니다.
    pub fn param(&self, name: &str) -> AppResult<String> {
        self.http
            .match_info()
            .get(name)
            .map(str::to_string)
            .ok_or_else(|| AppError::InternalError(format!("경로 파라미터 '{}' 없음", name)))
    }

    /// 제출된 본문을 파싱합니다.
    ///
    /// `application/json`이면 JSON으로, 그 외에는 HTML 폼
    /// (`application/x-www-form-urlencoded`)으로 해석합니다.
    pub fn form<T: DeserializeOwned>(&self) -> AppResult<T> {
        if self.http.content_type().eq_ignore_ascii_case("application/json") {
            serde_json::from_slice(&self.body)
                .map_err(|e| AppError::ValidationError(format!("JSON 본문 파싱 실패: {}", e)))
        } else {
            serde_urlencoded::from_bytes(&self.body)
                .map_err(|e| AppError::ValidationError(format!("폼 본문 파싱 실패: {}", e)))
        }
    }

    pub fn state(&self) -> AppResult<&AppState> {
        self.http
            .app_data::<web::Data<AppState>>()
            .map(|data| data.get_ref())
            .ok_or_else(|| AppError::InternalError("AppState가 등록되지 않았습니다".to_string()))
    }
}

/// 체인을 구성하는 처리 단계
///
/// 세션(`Session`)이 `Rc` 기반이라 단계의 Future는 `Send`가 아닙니다.
#[async_trait(?Send)]
pub trait Handler {
    /// 로그에 표시할 단계 이름
    fn name(&self) -> &'static str;

    async fn handle(&self, req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow>;
}

/// 라우트 하나의 처리 단계 목록
#[derive(Clone, Default)]
pub struct Chain {
    steps: Vec<Rc<dyn Handler>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then<H: Handler + 'static>(mut self, step: H) -> Self {
        self.steps.push(Rc::new(step));
        self
    }

    pub fn then_shared(mut self, step: Rc<dyn Handler>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// 단계를 순서대로 실행해 최종 응답을 만듭니다.
    pub async fn run(&self, req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<HttpResponse> {
        for step in &self.steps {
            log::debug!("{} {} → {}", req.http.method(), req.http.path(), step.name());

            match step.handle(req, ctx).await? {
                Flow::Next => continue,
                Flow::Redirect(location) => {
                    return Ok(HttpResponse::Found()
                        .insert_header((header::LOCATION, location))
                        .finish());
                }
                Flow::Render(view) => {
                    let html = req.state()?.views.render(&view, ctx)?;
                    return Ok(HttpResponse::Ok()
                        .content_type("text/html; charset=utf-8")
                        .body(html));
                }
            }
        }

        Err(AppError::NotFound(format!(
            "{} {}: 응답을 만든 단계가 없습니다",
            req.http.method(),
            req.http.path()
        )))
    }

    /// 라우트 진입점. 요청 로컬 값으로 컨텍스트를 만들고 체인을 실행합니다.
    pub async fn dispatch(
        &self,
        http: HttpRequest,
        body: web::Bytes,
        session: Session,
        locals: RequestLocals,
    ) -> AppResult<HttpResponse> {
        let request = ChainRequest::new(http, body, session);
        let mut context = ResponseContext::from_locals(&locals);

        self.run(&request, &mut context).await
    }
}

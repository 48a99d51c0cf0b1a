//! # Resource Controller
//!
//! Games, Books, Users가 공유하는 CRUD 단계들입니다. 리소스별 차이는
//! `Resource` 구현(컬렉션 이름, 필드, 폼 타입, 검증)에만 있습니다.
//!
//! ## 라우트와 체인
//!
//! | 메서드 | 경로 | 체인 |
//! |--------|------|------|
//! | `GET` | `/{c}` | index → indexView |
//! | `GET` | `/{c}/new` | new |
//! | `POST` | `/{c}/create` | create → redirectView |
//! | `GET` | `/{c}/{id}` | show → showView |
//! | `GET` | `/{c}/{id}/edit` | edit |
//! | `PUT` | `/{c}/{id}/update` | update → redirectView |
//! | `DELETE` | `/{c}/{id}/delete` | delete → redirectView |
//!
//! 데이터를 읽거나 쓰는 단계는 결과를 `ResponseContext`에 올려 두고 `Flow::Next`를
//! 반환하며, 화면은 뒤따르는 View 단계가 만듭니다.

use std::marker::PhantomData;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::core::chain::{ChainRequest, Flow, Handler, ResponseContext, View};
use crate::core::errors::{AppError, AppResult};
use crate::domain::resource::Resource;
use crate::session::FlashSession;
use crate::views::{FormFieldView, RecordView, ResourceMeta};

/// 컨트롤러 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceAction {
    Index,
    IndexView,
    New,
    Create,
    Show,
    ShowView,
    Edit,
    Update,
    Delete,
    RedirectView,
}

impl ResourceAction {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceAction::Index => "index",
            ResourceAction::IndexView => "indexView",
            ResourceAction::New => "new",
            ResourceAction::Create => "create",
            ResourceAction::Show => "show",
            ResourceAction::ShowView => "showView",
            ResourceAction::Edit => "edit",
            ResourceAction::Update => "update",
            ResourceAction::Delete => "delete",
            ResourceAction::RedirectView => "redirectView",
        }
    }
}

/// 리소스 `R`에 대한 체인 단계 하나
pub struct ResourceStep<R> {
    action: ResourceAction,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceStep<R> {
    pub fn new(action: ResourceAction) -> Self {
        Self {
            action,
            _resource: PhantomData,
        }
    }

    pub fn action(&self) -> ResourceAction {
        self.action
    }
}

#[async_trait(?Send)]
impl<R: Resource> Handler for ResourceStep<R> {
    fn name(&self) -> &'static str {
        self.action.name()
    }

    async fn handle(&self, req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow> {
        match self.action {
            ResourceAction::Index => ResourceController::<R>::index(req, ctx).await,
            ResourceAction::IndexView => ResourceController::<R>::index_view(ctx),
            ResourceAction::New => ResourceController::<R>::new_view(),
            ResourceAction::Create => ResourceController::<R>::create(req, ctx).await,
            ResourceAction::Show => ResourceController::<R>::show(req, ctx).await,
            ResourceAction::ShowView => ResourceController::<R>::show_view(ctx),
            ResourceAction::Edit => ResourceController::<R>::edit(req).await,
            ResourceAction::Update => ResourceController::<R>::update(req, ctx).await,
            ResourceAction::Delete => ResourceController::<R>::delete(req, ctx).await,
            ResourceAction::RedirectView => Ok(redirect_view(ctx)),
        }
    }
}

/// 예약된 리다이렉트가 있으면 응답으로 내보냅니다. 없으면 다음 단계로 넘깁니다.
pub fn redirect_view(ctx: &mut ResponseContext) -> Flow {
    match ctx.take_redirect() {
        Some(path) => Flow::Redirect(path),
        None => Flow::Next,
    }
}

/// 리소스별 컨트롤러 동작 구현
pub struct ResourceController<R>(PhantomData<fn() -> R>);

impl<R: Resource> ResourceController<R> {
    fn missing(id: &str) -> AppError {
        AppError::NotFound(format!("{} {}", R::SINGULAR, id))
    }

    /// 전체 레코드를 조회해 `R::COLLECTION` 키로 올려 둡니다.
    pub async fn index(req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow> {
        let store = R::store(req.state()?);

        match store.find_all().await {
            Ok(records) => {
                debug!("{} {}건 조회", R::COLLECTION, records.len());
                let views: Vec<RecordView> = records.iter().map(RecordView::from_record).collect();
                ctx.stage(R::COLLECTION, views)?;
                Ok(Flow::Next)
            }
            Err(e) => {
                error!("Error fetching {}: {}", R::COLLECTION, e);
                Err(e)
            }
        }
    }

    pub fn index_view(ctx: &mut ResponseContext) -> AppResult<Flow> {
        let records = ctx
            .get(R::COLLECTION)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));

        let view = View::new("index", R::COLLECTION, format!("All {}s", R::LABEL))
            .with_value("records", records)
            .with("resource", ResourceMeta::of::<R>())?;

        Ok(Flow::Render(view))
    }

    /// 빈 입력 폼
    pub fn new_view() -> AppResult<Flow> {
        let view = View::new("form", format!("new-{}", R::SINGULAR), format!("New {}", R::LABEL))
            .with("action", format!("{}/create", R::collection_path()))?
            .with("submit", format!("Create {}", R::LABEL))?
            .with("fields", FormFieldView::for_fields::<R>(R::form_fields(false), None))?
            .with("resource", ResourceMeta::of::<R>())?;

        Ok(Flow::Render(view))
    }

    /// 폼을 파싱해 레코드를 저장하고 목록으로 리다이렉트를 예약합니다.
    ///
    /// 앞 단계가 `skip_remaining`을 표시했다면 아무것도 하지 않습니다.
    pub async fn create(req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow> {
        if ctx.should_skip() {
            debug!("{} 생성 건너뜀", R::SINGULAR);
            return Ok(Flow::Next);
        }

        let store = R::store(req.state()?);
        let record = match req.form::<R::CreateForm>().and_then(R::from_create_form) {
            Ok(record) => record,
            Err(e) => {
                error!("Error creating {}: {}", R::SINGULAR, e);
                return Err(e);
            }
        };

        match store.create(record).await {
            Ok(created) => {
                info!("{} 생성: {}", R::SINGULAR, created.id_string());

                if let Some(message) = created.created_message() {
                    FlashSession::new(req.session()).success(message)?;
                }
                ctx.stage(R::SINGULAR, RecordView::from_record(&created))?;
                ctx.stage_redirect(R::collection_path());
                Ok(Flow::Next)
            }
            Err(e) => {
                error!("Error saving {}: {}", R::SINGULAR, e);
                Err(e)
            }
        }
    }

    /// `{id}` 레코드를 조회해 `R::SINGULAR` 키로 올려 둡니다.
    pub async fn show(req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow> {
        let id = req.param("id")?;
        let store = R::store(req.state()?);

        match store.find_by_id(&id).await {
            Ok(Some(record)) => {
                ctx.stage(R::SINGULAR, RecordView::from_record(&record))?;
                Ok(Flow::Next)
            }
            Ok(None) => Err(Self::missing(&id)),
            Err(e) => {
                error!("Error fetching {} by ID: {}", R::SINGULAR, e);
                Err(e)
            }
        }
    }

    pub fn show_view(ctx: &mut ResponseContext) -> AppResult<Flow> {
        let Some(record) = ctx.get(R::SINGULAR).cloned() else {
            return Ok(Flow::Next);
        };

        let view = View::new("show", format!("{}-details", R::SINGULAR), format!("{} Details", R::LABEL))
            .with_value("record", record)
            .with("resource", ResourceMeta::of::<R>())?;

        Ok(Flow::Render(view))
    }

    /// 현재 값으로 채운 수정 폼. 제출은 `_method=PUT`으로 update에 도달합니다.
    pub async fn edit(req: &ChainRequest) -> AppResult<Flow> {
        let id = req.param("id")?;
        let store = R::store(req.state()?);

        let record = match store.find_by_id(&id).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(Self::missing(&id)),
            Err(e) => {
                error!("Error fetching {} by ID: {}", R::SINGULAR, e);
                return Err(e);
            }
        };

        let view = View::new("form", format!("edit-{}", R::SINGULAR), format!("Edit {}", R::LABEL))
            .with("action", format!("{}/update?_method=PUT", R::record_path(&id)))?
            .with("submit", format!("Update {}", R::LABEL))?
            .with("fields", FormFieldView::for_fields(R::form_fields(true), Some(&record)))?
            .with("resource", ResourceMeta::of::<R>())?;

        Ok(Flow::Render(view))
    }

    /// 제출된 필드만 갱신하고 상세 화면으로 리다이렉트를 예약합니다.
    pub async fn update(req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow> {
        let id = req.param("id")?;
        let store = R::store(req.state()?);

        let changes = match req.form::<R::UpdateForm>().and_then(|form| {
            debug!("{} 수정 요청 {}: {:?}", R::SINGULAR, id, form);
            R::update_document(form)
        }) {
            Ok(changes) => changes,
            Err(e) => {
                error!("Error updating {} by ID: {}", R::SINGULAR, e);
                return Err(e);
            }
        };

        match store.find_by_id_and_update(&id, changes).await {
            Ok(Some(updated)) => {
                info!("{} 수정: {}", R::SINGULAR, id);
                ctx.stage(R::SINGULAR, RecordView::from_record(&updated))?;
                ctx.stage_redirect(R::record_path(&id));
                Ok(Flow::Next)
            }
            Ok(None) => Err(Self::missing(&id)),
            Err(e) => {
                error!("Error updating {} by ID: {}", R::SINGULAR, e);
                Err(e)
            }
        }
    }

    /// 레코드를 삭제합니다. 삭제 실패는 기록만 하고 항상 목록으로 보냅니다.
    pub async fn delete(req: &ChainRequest, ctx: &mut ResponseContext) -> AppResult<Flow> {
        let id = req.param("id")?;
        let store = R::store(req.state()?);

        match store.find_by_id_and_delete(&id).await {
            Ok(Some(_)) => info!("{} 삭제: {}", R::SINGULAR, id),
            Ok(None) => warn!("삭제할 {} 없음: {}", R::SINGULAR, id),
            Err(e) => error!("Error deleting {} by ID: {}", R::SINGULAR, e),
        }

        ctx.stage_redirect(R::collection_path());
        Ok(Flow::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Book, Game};
    use crate::domain::models::RequestLocals;
    use crate::repositories::DocumentStore;
    use crate::state::AppState;
    use actix_session::SessionExt;
    use actix_web::http::header;
    use actix_web::test::TestRequest;
    use actix_web::web;

    fn chain_request(req: TestRequest, body: &'static str) -> ChainRequest {
        let http = req
            .app_data(web::Data::new(AppState::in_memory().unwrap()))
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .to_http_request();
        let session = http.get_session();
        ChainRequest::new(http, web::Bytes::from_static(body.as_bytes()), session)
    }

    fn context() -> ResponseContext {
        ResponseContext::from_locals(&RequestLocals::default())
    }

    #[test]
    fn test_action_names() {
        assert_eq!(ResourceStep::<Game>::new(ResourceAction::IndexView).name(), "indexView");
        assert_eq!(ResourceStep::<Book>::new(ResourceAction::RedirectView).name(), "redirectView");
    }

    #[actix_web::test]
    async fn test_create_stages_record_and_redirect() {
        let req = chain_request(
            TestRequest::post().uri("/games/create"),
            "title=Chess&genre=Strategy&cost=10&image=a.png&producer=X",
        );
        let mut ctx = context();

        let flow = ResourceController::<Game>::create(&req, &mut ctx).await.unwrap();

        assert!(matches!(flow, Flow::Next));
        assert_eq!(ctx.redirect_target(), Some("/games"));
        assert_eq!(ctx.get("game").unwrap()["heading"], "Chess");
        assert_eq!(req.state().unwrap().games.find_all().await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_create_respects_skip() {
        let req = chain_request(TestRequest::post().uri("/games/create"), "title=Chess&cost=10");
        let mut ctx = context();
        ctx.skip_remaining();

        ResourceController::<Game>::create(&req, &mut ctx).await.unwrap();

        assert!(ctx.redirect_target().is_none());
        assert!(req.state().unwrap().games.find_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_create_negative_cost_fails() {
        let req = chain_request(TestRequest::post().uri("/games/create"), "title=Chess&cost=-1");
        let mut ctx = context();

        let result = ResourceController::<Game>::create(&req, &mut ctx).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(ctx.redirect_target().is_none());
    }

    #[actix_web::test]
    async fn test_delete_always_redirects_to_collection() {
        let req = chain_request(
            TestRequest::post().uri("/books/not-an-id/delete").param("id", "not-an-id"),
            "",
        );
        let mut ctx = context();

        let flow = ResourceController::<Book>::delete(&req, &mut ctx).await.unwrap();

        assert!(matches!(flow, Flow::Next));
        assert!(matches!(redirect_view(&mut ctx), Flow::Redirect(path) if path == "/books"));
        assert!(matches!(redirect_view(&mut ctx), Flow::Next));
    }

    #[actix_web::test]
    async fn test_show_missing_record_is_not_found() {
        let id = mongodb::bson::oid::ObjectId::new().to_hex();
        let uri = format!("/games/{}", id);
        let http = TestRequest::get()
            .uri(&uri)
            .param("id", id)
            .app_data(web::Data::new(AppState::in_memory().unwrap()))
            .to_http_request();
        let session = http.get_session();
        let req = ChainRequest::new(http, web::Bytes::new(), session);

        let result = ResourceController::<Game>::show(&req, &mut context()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_index_view_renders_empty_collection() {
        let flow = ResourceController::<Book>::index_view(&mut context()).unwrap();

        match flow {
            Flow::Render(view) => {
                assert_eq!(view.template, "index");
                assert_eq!(view.title, "All Books");
                assert_eq!(view.data()["records"], Value::Array(Vec::new()));
            }
            other => panic!("unexpected flow: {:?}", other),
        }
    }
}

//! # Views
//!
//! Handlebars 템플릿 레지스트리와 템플릿에 넘기는 뷰 모델입니다.
//! 템플릿은 바이너리에 포함(`include_str!`)되므로 실행 위치와 무관하게 동작합니다.
//!
//! 모든 페이지는 `layout` 안에 렌더링됩니다. 페이지 본문을 먼저 렌더링한 뒤
//! 그 결과를 `body`로 레이아웃에 넘기며, 레이아웃은 내비게이션, 로그인 상태,
//! 플래시 메시지를 표시합니다.
//!
//! ## 템플릿 데이터
//!
//! | 키 | 출처 |
//! |----|------|
//! | `loggedIn`, `currentUser`, `flashMessages` | `ResponseContext` (미들웨어) |
//! | 컨트롤러가 `stage`한 값 | `ResponseContext` |
//! | `page`, `title`, 페이지 고유 값 | `View` |
//! | `flashes` | `flashMessages`를 펼친 목록 |

use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::chain::{ResponseContext, View, LOCAL_FLASH_MESSAGES};
use crate::core::errors::AppResult;
use crate::domain::resource::{FieldKind, FieldSpec, Resource};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../../templates/layout.hbs")),
    ("home", include_str!("../../templates/home.hbs")),
    ("about", include_str!("../../templates/about.hbs")),
    ("transportation", include_str!("../../templates/transportation.hbs")),
    ("index", include_str!("../../templates/index.hbs")),
    ("show", include_str!("../../templates/show.hbs")),
    ("form", include_str!("../../templates/form.hbs")),
    ("login", include_str!("../../templates/login.hbs")),
];

/// 템플릿 레지스트리
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    /// 내장 템플릿을 모두 등록합니다.
    ///
    /// # Errors
    ///
    /// * `TemplateError` - 템플릿 문법 오류
    pub fn new() -> AppResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);

        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }

        Ok(Self { registry })
    }

    pub fn template_count(&self) -> usize {
        self.registry.get_templates().len()
    }

    /// 페이지를 렌더링하고 레이아웃으로 감싼 HTML을 반환합니다.
    pub fn render(&self, view: &View, ctx: &ResponseContext) -> AppResult<String> {
        let mut data: Map<String, Value> = ctx.locals().clone();
        data.insert("page".to_string(), Value::String(view.page.clone()));
        data.insert("title".to_string(), Value::String(view.title.clone()));
        for (key, value) in view.data() {
            data.insert(key.clone(), value.clone());
        }

        let flashes = flatten_flashes(data.get(LOCAL_FLASH_MESSAGES));
        data.insert("flashes".to_string(), serde_json::to_value(flashes).unwrap_or_default());

        let body = self.registry.render(view.template, &data)?;
        data.insert("body".to_string(), Value::String(body));

        Ok(self.registry.render("layout", &data)?)
    }
}

/// 플래시 메시지 한 건
#[derive(Debug, Serialize, PartialEq)]
pub struct FlashView {
    pub kind: String,
    pub message: String,
}

fn flatten_flashes(messages: Option<&Value>) -> Vec<FlashView> {
    let Some(Value::Object(kinds)) = messages else {
        return Vec::new();
    };

    kinds
        .iter()
        .flat_map(|(kind, list)| {
            list.as_array()
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .map(move |message| FlashView {
                    kind: kind.clone(),
                    message: message.to_string(),
                })
        })
        .collect()
}

/// 목록/상세 화면의 필드 한 칸
#[derive(Debug, Serialize)]
pub struct CellView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub is_image: bool,
}

/// 목록/상세 화면의 레코드 한 건
#[derive(Debug, Serialize)]
pub struct RecordView {
    pub id: String,
    pub heading: String,
    pub cells: Vec<CellView>,
    pub show_path: String,
    pub edit_path: String,
    pub delete_path: String,
}

impl RecordView {
    pub fn from_record<R: Resource>(record: &R) -> Self {
        let id = record.id_string();
        let cells = R::FIELDS
            .iter()
            .map(|field| CellView {
                name: field.name,
                label: field.label,
                value: record.field_value(field.name).unwrap_or_default(),
                is_image: field.kind == FieldKind::Image,
            })
            .collect();

        Self {
            heading: record.heading(),
            cells,
            show_path: R::record_path(&id),
            edit_path: format!("{}/edit", R::record_path(&id)),
            delete_path: format!("{}/delete?_method=DELETE", R::record_path(&id)),
            id,
        }
    }
}

/// 폼 입력 한 칸
#[derive(Debug, Serialize)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
}

impl FormFieldView {
    /// 필드 목록으로 폼을 만듭니다. `record`가 있으면 현재 값으로 채웁니다.
    pub fn for_fields<R: Resource>(fields: &[FieldSpec], record: Option<&R>) -> Vec<Self> {
        fields
            .iter()
            .map(|field| FormFieldView {
                name: field.name,
                label: field.label,
                input_type: field.kind.input_type(),
                value: record
                    .and_then(|record| record.field_value(field.name))
                    .unwrap_or_default(),
            })
            .collect()
    }
}

/// 화면 공통 리소스 정보
#[derive(Debug, Serialize)]
pub struct ResourceMeta {
    pub label: &'static str,
    pub collection: &'static str,
    pub path: String,
    pub new_path: String,
    pub columns: Vec<&'static str>,
}

impl ResourceMeta {
    pub fn of<R: Resource>() -> Self {
        Self {
            label: R::LABEL,
            collection: R::COLLECTION,
            path: R::collection_path(),
            new_path: format!("{}/new", R::collection_path()),
            columns: R::FIELDS.iter().map(|field| field.label).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Game;
    use crate::domain::models::{CurrentUser, FlashMessages, RequestLocals};
    use mongodb::bson::oid::ObjectId;

    fn chess() -> Game {
        let mut game = Game::new(
            "Chess".to_string(),
            "X".to_string(),
            "Strategy".to_string(),
            10.0,
            "a.png".to_string(),
        );
        game.id = Some(ObjectId::new());
        game
    }

    #[test]
    fn test_all_templates_register() {
        let views = Views::new().unwrap();

        assert_eq!(views.template_count(), TEMPLATES.len());
    }

    #[test]
    fn test_record_view_paths() {
        let game = chess();
        let id = game.id.unwrap().to_hex();
        let view = RecordView::from_record(&game);

        assert_eq!(view.show_path, format!("/games/{}", id));
        assert_eq!(view.edit_path, format!("/games/{}/edit", id));
        assert_eq!(view.delete_path, format!("/games/{}/delete?_method=DELETE", id));
        assert!(view.cells.iter().any(|cell| cell.is_image && cell.value == "a.png"));
    }

    #[test]
    fn test_layout_shows_login_state_and_flashes() {
        let views = Views::new().unwrap();
        let mut flashes = FlashMessages::new();
        flashes.insert("success".to_string(), vec!["Logged in!".to_string()]);
        let locals = RequestLocals::new(
            Some(CurrentUser {
                id: "1".to_string(),
                username: "jon_snow".to_string(),
                email: "jon@wall.org".to_string(),
            }),
            flashes,
        );
        let ctx = ResponseContext::from_locals(&locals);

        let html = views.render(&View::new("home", "home", "Home"), &ctx).unwrap();

        assert!(html.contains("Logged in as jon_snow"));
        assert!(html.contains("Logged in!"));
        assert!(html.contains("flash-success"));
    }

    #[test]
    fn test_anonymous_layout_links_to_login() {
        let views = Views::new().unwrap();
        let ctx = ResponseContext::from_locals(&RequestLocals::default());

        let html = views.render(&View::new("about", "about", "About"), &ctx).unwrap();

        assert!(html.contains("/users/login"));
        assert!(!html.contains("Logged in as"));
    }

    #[test]
    fn test_form_fields_prefill_from_record() {
        let game = chess();
        let fields = FormFieldView::for_fields(Game::FIELDS, Some(&game));

        assert_eq!(fields[0].value, "Chess");
        assert_eq!(fields[3].input_type, "number");
        assert_eq!(FormFieldView::for_fields::<Game>(Game::FIELDS, None)[0].value, "");
    }
}

//! 정적 페이지 (홈, 소개, 교통편)

use async_trait::async_trait;

use crate::core::chain::{ChainRequest, Flow, Handler, ResponseContext, View};
use crate::core::errors::AppResult;

/// 데이터 없이 템플릿 하나를 레이아웃 안에 렌더링하는 단계
#[derive(Debug, Clone, Copy)]
pub struct StaticPage {
    pub template: &'static str,
    pub page: &'static str,
    pub title: &'static str,
}

impl StaticPage {
    pub const HOME: StaticPage = StaticPage::new("home", "home", "Home");
    pub const ABOUT: StaticPage = StaticPage::new("about", "about", "About");
    pub const TRANSPORTATION: StaticPage = StaticPage::new("transportation", "transportation", "Transportation");

    pub const fn new(template: &'static str, page: &'static str, title: &'static str) -> Self {
        Self { template, page, title }
    }
}

#[async_trait(?Send)]
impl Handler for StaticPage {
    fn name(&self) -> &'static str {
        self.page
    }

    async fn handle(&self, _req: &ChainRequest, _ctx: &mut ResponseContext) -> AppResult<Flow> {
        Ok(Flow::Render(View::new(self.template, self.page, self.title)))
    }
}

//! TourControllerBuilder - コントローラの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 任意の依存（driver, notifier）と必須の依存の区別

use std::sync::Arc;

use super::completion_store::CompletionStore;
use super::controller::TourController;
use super::step_builder::StepBuilder;
use super::welcome::WelcomePrompt;
use crate::config::TourConfig;
use crate::domain::{TourState, WelcomeContent};
use crate::ports::{
    Alerter, Clock, DocumentQuery, HostPage, IdGenerator, KeyValueStorage, Notifier,
    OverlayHost, PresentationDriver, SystemClock, UlidGenerator,
};

/// TourControllerBuilder はコントローラを構築
///
/// # 使用例
/// ```ignore
/// let controller = TourControllerBuilder::new(TourConfig::default())
///     .storage(storage)
///     .page(page)
///     .document(document)
///     .overlay_host(overlay)
///     .alerter(alerter)
///     .driver(driver)       // 任意: 無ければ start_tour() が DriverUnavailable
///     .notifier(notifier)   // 任意: 無ければ alert で代替
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - 必須の依存が欠けていれば build() が BuildError を返す
/// - ドライバの欠落は build() では検出しない（ツアー開始時のエラー）
pub struct TourControllerBuilder {
    config: TourConfig,
    storage: Option<Arc<dyn KeyValueStorage>>,
    page: Option<Arc<dyn HostPage>>,
    document: Option<Arc<dyn DocumentQuery>>,
    overlay_host: Option<Arc<dyn OverlayHost>>,
    alerter: Option<Arc<dyn Alerter>>,
    driver: Option<Arc<dyn PresentationDriver>>,
    notifier: Option<Arc<dyn Notifier>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    steps: StepBuilder,
    welcome: WelcomeContent,
}

/// BuildError はコントローラ構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing collaborators: {0:?}. These must be provided before build().")]
    MissingCollaborators(Vec<&'static str>),
}

impl TourControllerBuilder {
    pub fn new(config: TourConfig) -> Self {
        Self {
            config,
            storage: None,
            page: None,
            document: None,
            overlay_host: None,
            alerter: None,
            driver: None,
            notifier: None,
            clock: None,
            ids: None,
            steps: StepBuilder::default(),
            welcome: WelcomeContent::default(),
        }
    }

    pub fn storage(mut self, storage: Arc<dyn KeyValueStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn page(mut self, page: Arc<dyn HostPage>) -> Self {
        self.page = Some(page);
        self
    }

    pub fn document(mut self, document: Arc<dyn DocumentQuery>) -> Self {
        self.document = Some(document);
        self
    }

    pub fn overlay_host(mut self, host: Arc<dyn OverlayHost>) -> Self {
        self.overlay_host = Some(host);
        self
    }

    pub fn alerter(mut self, alerter: Arc<dyn Alerter>) -> Self {
        self.alerter = Some(alerter);
        self
    }

    pub fn driver(mut self, driver: Arc<dyn PresentationDriver>) -> Self {
        self.driver = Some(driver);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Clock behind the default id generator; session start times come from it.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Replace the default CV Generator step table.
    pub fn steps(mut self, steps: StepBuilder) -> Self {
        self.steps = steps;
        self
    }

    pub fn welcome_content(mut self, content: WelcomeContent) -> Self {
        self.welcome = content;
        self
    }

    /// 必須の依存がすべて揃っているか検証してコントローラを生成
    pub fn build(self) -> Result<TourController, BuildError> {
        let mut missing = Vec::new();
        if self.storage.is_none() {
            missing.push("storage");
        }
        if self.page.is_none() {
            missing.push("page");
        }
        if self.document.is_none() {
            missing.push("document");
        }
        if self.overlay_host.is_none() {
            missing.push("overlay_host");
        }
        if self.alerter.is_none() {
            missing.push("alerter");
        }

        let (Some(storage), Some(page), Some(document), Some(overlay_host), Some(alerter)) = (
            self.storage,
            self.page,
            self.document,
            self.overlay_host,
            self.alerter,
        ) else {
            return Err(BuildError::MissingCollaborators(missing));
        };

        let ids = match self.ids {
            Some(ids) => ids,
            None => {
                let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
                Arc::new(UlidGenerator::new(clock))
            }
        };

        Ok(TourController {
            store: CompletionStore::new(storage, self.config.storage_key.clone()),
            steps: self.steps,
            page,
            document,
            prompt: WelcomePrompt::new(overlay_host, self.welcome),
            driver: self.driver,
            notifier: self.notifier,
            alerter,
            ids,
            state: TourState::Idle,
            running: None,
            finished: None,
            config: self.config,
        })
    }
}

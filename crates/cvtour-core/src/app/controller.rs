//! TourController - ツアーセッションのオーケストレーション
//!
//! # フロー
//! 1. `init()`: ドキュメントの読み込み完了を待ってから `decide()`
//! 2. `decide()`: ホームページかつ完了マーカーが absent なら、少し待って
//!    ウェルカムプロンプトを表示
//! 3. 「開始」→ `start_tour()`: ステップを組み立ててドライバを起動
//! 4. ドライバの complete / exit イベント → マーカー更新・完了通知
//!
//! `restart()` はヘルプボタンなどから呼ばれる手動トリガーです。

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::completion_store::CompletionStore;
use super::step_builder::StepBuilder;
use super::welcome::WelcomePrompt;
use crate::config::{StoragePolicy, TourConfig};
use crate::domain::{
    CompletionMarker, DriverEvent, PromptChoice, Termination, TourError, TourSession, TourState,
};
use crate::ports::{
    Alerter, DocumentQuery, HostPage, IdGenerator, Notifier, PresentationDriver, ReadyState,
    Severity, TourInstance,
};

/// Shown once when the driver reports a full traversal.
pub const COMPLETION_MESSAGE: &str = "¡Tour completado! Ya puedes empezar a crear tu CV 🎉";

/// What a page-load check ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The current path is not a home entry point.
    NotHomePage,
    /// The user already completed or skipped the tour.
    AlreadySeen(CompletionMarker),
    /// The marker could not be read and the policy is to stay quiet.
    StorageUnavailable,
    /// Prompt accepted; the tour is running.
    Started,
    /// Prompt declined.
    Declined { dont_show_again: bool },
}

/// Outcome of a manual restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restart {
    /// Marker cleared and the tour started on this page.
    Started,
    /// Marker cleared and the browser sent to the home page.
    Navigated,
}

pub(super) struct RunningTour {
    session: TourSession,
    instance: Box<dyn TourInstance>,
    events: mpsc::UnboundedReceiver<DriverEvent>,
}

/// Owns one page's tour lifecycle. Build with `TourControllerBuilder`.
pub struct TourController {
    pub(super) config: TourConfig,
    pub(super) store: CompletionStore,
    pub(super) steps: StepBuilder,
    pub(super) page: Arc<dyn HostPage>,
    pub(super) document: Arc<dyn DocumentQuery>,
    pub(super) prompt: WelcomePrompt,
    pub(super) driver: Option<Arc<dyn PresentationDriver>>,
    pub(super) notifier: Option<Arc<dyn Notifier>>,
    pub(super) alerter: Arc<dyn Alerter>,
    pub(super) ids: Arc<dyn IdGenerator>,
    pub(super) state: TourState,
    pub(super) running: Option<RunningTour>,
    pub(super) finished: Option<TourSession>,
}

impl TourController {
    pub fn state(&self) -> TourState {
        self.state
    }

    /// The running session, if a tour is on screen.
    pub fn session(&self) -> Option<&TourSession> {
        self.running.as_ref().map(|r| &r.session)
    }

    /// The most recent session that ended, with its termination and last step.
    pub fn last_session(&self) -> Option<&TourSession> {
        self.finished.as_ref()
    }

    pub fn marker(&self) -> Result<CompletionMarker, TourError> {
        Ok(self.store.get()?)
    }

    pub fn is_home_page(&self) -> bool {
        self.config.is_home(&self.page.path())
    }

    /// Page-load entry point: wait for the document, then `decide()`.
    pub async fn init(&mut self) -> Result<Decision, TourError> {
        if self.page.ready_state() == ReadyState::Loading {
            debug!("document still loading; deferring tour check");
            self.page.ready().await;
        }
        self.decide().await
    }

    /// Offer the tour if this is a first visit to the home page.
    pub async fn decide(&mut self) -> Result<Decision, TourError> {
        let path = self.page.path();
        if !self.config.is_home(&path) {
            debug!(%path, "not a home entry point; tour not offered");
            return Ok(Decision::NotHomePage);
        }

        let marker = match self.store.get() {
            Ok(marker) => marker,
            Err(e) => match self.config.storage_policy {
                StoragePolicy::Suppress => {
                    warn!(error = %e, "completion marker unreadable; tour not offered");
                    return Ok(Decision::StorageUnavailable);
                }
                StoragePolicy::TreatAsAbsent => {
                    warn!(error = %e, "completion marker unreadable; treating as absent");
                    CompletionMarker::Absent
                }
            },
        };
        if !marker.is_absent() {
            debug!(%marker, "tour already handled");
            return Ok(Decision::AlreadySeen(marker));
        }

        if !self.state.can_transition_to(TourState::AwaitingPromptChoice) {
            return Err(TourError::InvalidTransition {
                from: self.state,
                to: TourState::AwaitingPromptChoice,
            });
        }
        tokio::time::sleep(self.config.settle_delay).await;
        self.transition(TourState::AwaitingPromptChoice)?;

        let choice = match self.prompt.show().await {
            Ok(choice) => choice,
            Err(e) => {
                warn!(error = %e, "welcome prompt failed");
                self.state = TourState::Terminated(Termination::Exited);
                return Err(e.into());
            }
        };

        match choice {
            PromptChoice::Start => {
                if let Err(e) = self.start_tour() {
                    self.state = TourState::Terminated(Termination::Exited);
                    return Err(e);
                }
                Ok(Decision::Started)
            }
            PromptChoice::Skip { dont_show_again } => {
                if dont_show_again {
                    self.record(CompletionMarker::Skipped);
                }
                info!(dont_show_again, "welcome prompt declined");
                self.transition(TourState::Terminated(Termination::Exited))?;
                Ok(Decision::Declined { dont_show_again })
            }
        }
    }

    /// Build the steps and hand them to the driver. Nothing is written to
    /// storage until the driver reports a terminal event.
    pub fn start_tour(&mut self) -> Result<(), TourError> {
        if self.state == TourState::Running {
            return Err(TourError::AlreadyRunning);
        }
        if !self.state.can_transition_to(TourState::Running) {
            return Err(TourError::InvalidTransition {
                from: self.state,
                to: TourState::Running,
            });
        }
        let Some(driver) = self.driver.as_ref() else {
            error!("presentation driver is not available; cannot start the tour");
            return Err(TourError::DriverUnavailable);
        };

        let steps = self.steps.build(self.document.as_ref());
        let mut instance = driver.configure(&self.config.driver, &steps)?;
        let events = instance.subscribe();
        instance.start()?;

        let session = TourSession::new(self.ids.next_session_id(), steps.len());
        info!(session = %session.id, steps = steps.len(), "tour started");

        self.running = Some(RunningTour {
            session,
            instance,
            events,
        });
        self.state = TourState::Running;
        Ok(())
    }

    /// Apply one driver event. Returns the termination when it ends the tour.
    pub fn handle_event(&mut self, event: DriverEvent) -> Option<Termination> {
        let Some(running) = self.running.as_mut() else {
            debug!(?event, "no running tour; ignoring driver event");
            return None;
        };

        match event {
            DriverEvent::StepChanged(index) => {
                running.session.advance_to(index);
                debug!(session = %running.session.id, step = index, "tour step changed");
                None
            }
            DriverEvent::Complete => Some(self.finish(Termination::Completed)),
            DriverEvent::Exit => {
                let at = running.instance.current_step();
                running.session.advance_to(at);
                let total = running.session.total_steps;
                if running.session.is_before_final(at) {
                    info!(
                        session = %running.session.id,
                        step = at + 1,
                        total,
                        "tour cancelled at step {} of {}",
                        at + 1,
                        total
                    );
                } else {
                    debug!(session = %running.session.id, "tour exited on its final step");
                }
                Some(self.finish(Termination::Exited))
            }
        }
    }

    /// Pump driver events until the running tour terminates.
    ///
    /// Returns `None` when no tour is running.
    pub async fn run_until_terminated(&mut self) -> Option<Termination> {
        loop {
            let event = {
                let running = self.running.as_mut()?;
                running.events.recv().await
            };
            match event {
                Some(event) => {
                    if let Some(termination) = self.handle_event(event) {
                        return Some(termination);
                    }
                }
                None => {
                    warn!("driver closed its event stream; treating as exit");
                    return Some(self.finish(Termination::Exited));
                }
            }
        }
    }

    /// Clear the marker and show the tour again, from the home page.
    pub fn restart(&mut self) -> Result<Restart, TourError> {
        if self.state == TourState::Running {
            return Err(TourError::AlreadyRunning);
        }
        self.store.clear()?;

        let path = self.page.path();
        if !self.config.is_home(&path) {
            info!(from = %path, to = %self.config.home_redirect, "restarting tour from the home page");
            self.page.navigate(&self.config.home_redirect);
            return Ok(Restart::Navigated);
        }

        self.start_tour()?;
        Ok(Restart::Started)
    }

    fn finish(&mut self, reason: Termination) -> Termination {
        if let Some(mut running) = self.running.take() {
            running.session.terminate(reason);
            info!(session = %running.session.id, ?reason, "tour ended");
            self.finished = Some(running.session);
        }
        if reason == Termination::Completed {
            self.record(CompletionMarker::Completed);
            self.show_completion_notice();
        }
        self.state = TourState::Terminated(reason);
        reason
    }

    fn record(&self, marker: CompletionMarker) {
        if let Err(e) = self.store.set(marker) {
            warn!(key = %self.store.key(), %marker, error = %e, "failed to persist completion marker");
        }
    }

    fn show_completion_notice(&self) {
        match &self.notifier {
            Some(notifier) => {
                notifier.notify(COMPLETION_MESSAGE, Severity::Success, self.config.notice_duration)
            }
            None => self.alerter.alert(COMPLETION_MESSAGE),
        }
    }

    fn transition(&mut self, to: TourState) -> Result<(), TourError> {
        if !self.state.can_transition_to(to) {
            return Err(TourError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        debug!(from = %self.state, %to, "tour state transition");
        self.state = to;
        Ok(())
    }
}

//! Recording fakes for every port, shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::app::builder::TourControllerBuilder;
use crate::app::controller::TourController;
use crate::config::TourConfig;
use crate::domain::{
    DriverError, DriverEvent, OverlayError, OverlayId, PromptChoice, StepDescriptor, StorageError,
    WelcomeContent,
};
use crate::impls::{InMemoryStorage, StaticDocument};
use crate::ports::{
    Alerter, DriverOptions, HostPage, KeyValueStorage, Notifier, OverlayHost, PresentationDriver,
    ReadyState, Severity, TourInstance,
};

pub const KEY: &str = "cvgenerator_tour_completed";

// ---------------------------------------------------------------------------
// storage
// ---------------------------------------------------------------------------

/// In-memory storage that records every write and can be made to fail.
#[derive(Default)]
pub struct RecordingStorage {
    inner: InMemoryStorage,
    writes: Mutex<Vec<(String, Option<String>)>>,
    failing: bool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Put a value in place without recording it as a write.
    pub fn seed(&self, key: &str, value: &str) {
        self.inner.set(key, value).unwrap();
    }

    pub fn writes(&self) -> Vec<(String, Option<String>)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("access denied".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStorage for RecordingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), Some(value.to_string())));
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.writes.lock().unwrap().push((key.to_string(), None));
        self.inner.remove(key)
    }
}

// ---------------------------------------------------------------------------
// page
// ---------------------------------------------------------------------------

pub struct FakePage {
    path: String,
    ready_state: ReadyState,
    ready_waits: AtomicUsize,
    navigations: Mutex<Vec<String>>,
}

impl FakePage {
    pub fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ready_state: ReadyState::Complete,
            ready_waits: AtomicUsize::new(0),
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn loading(path: &str) -> Self {
        Self {
            ready_state: ReadyState::Loading,
            ..Self::at(path)
        }
    }

    pub fn ready_waits(&self) -> usize {
        self.ready_waits.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostPage for FakePage {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    async fn ready(&self) {
        self.ready_waits.fetch_add(1, Ordering::SeqCst);
    }

    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
    }
}

// ---------------------------------------------------------------------------
// overlay
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Script {
    Answer(PromptChoice),
    Dismissed,
    Pending,
    FailMount,
    BrokenInput,
}

/// Overlay host that answers with a scripted choice.
pub struct ScriptedOverlay {
    script: Script,
    mounted: Mutex<Vec<OverlayId>>,
    unmounted: Mutex<Vec<OverlayId>>,
}

impl ScriptedOverlay {
    fn with(script: Script) -> Self {
        Self {
            script,
            mounted: Mutex::new(Vec::new()),
            unmounted: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(choice: PromptChoice) -> Self {
        Self::with(Script::Answer(choice))
    }

    pub fn dismissed() -> Self {
        Self::with(Script::Dismissed)
    }

    pub fn pending() -> Self {
        Self::with(Script::Pending)
    }

    pub fn failing_mount() -> Self {
        Self::with(Script::FailMount)
    }

    /// Mounts, then fails to read the user's choice.
    pub fn broken_input() -> Self {
        Self::with(Script::BrokenInput)
    }

    pub fn mounted(&self) -> Vec<OverlayId> {
        self.mounted.lock().unwrap().clone()
    }

    pub fn unmounted(&self) -> Vec<OverlayId> {
        self.unmounted.lock().unwrap().clone()
    }

    /// Overlays mounted and not yet removed.
    pub fn live(&self) -> Vec<OverlayId> {
        let unmounted = self.unmounted();
        self.mounted()
            .into_iter()
            .filter(|id| !unmounted.contains(id))
            .collect()
    }
}

#[async_trait]
impl OverlayHost for ScriptedOverlay {
    fn mount(&self, id: OverlayId, _content: &WelcomeContent) -> Result<(), OverlayError> {
        if let Script::FailMount = self.script {
            return Err(OverlayError::Mount("no document body".to_string()));
        }
        self.mounted.lock().unwrap().push(id);
        Ok(())
    }

    async fn choice(&self, _id: OverlayId) -> Result<PromptChoice, OverlayError> {
        match self.script {
            Script::Answer(choice) => Ok(choice),
            Script::Dismissed | Script::FailMount => Err(OverlayError::Dismissed),
            Script::BrokenInput => Err(OverlayError::Input("stream closed".to_string())),
            Script::Pending => std::future::pending().await,
        }
    }

    fn unmount(&self, id: OverlayId) {
        self.unmounted.lock().unwrap().push(id);
    }
}

// ---------------------------------------------------------------------------
// driver
// ---------------------------------------------------------------------------

#[derive(Default)]
struct DriverShared {
    configured: Mutex<Vec<(DriverOptions, Vec<StepDescriptor>)>>,
    started: AtomicUsize,
    current: AtomicUsize,
    sender: Mutex<Option<mpsc::UnboundedSender<DriverEvent>>>,
    fail_start: bool,
}

/// Driver whose events are pushed by the test.
#[derive(Clone, Default)]
pub struct FakeDriver {
    shared: Arc<DriverShared>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_start() -> Self {
        Self {
            shared: Arc::new(DriverShared {
                fail_start: true,
                ..DriverShared::default()
            }),
        }
    }

    /// Deliver an event the way a real driver would. `StepChanged` also moves
    /// the instance's current step.
    pub fn emit(&self, event: DriverEvent) {
        if let DriverEvent::StepChanged(i) = event {
            self.set_current_step(i);
        }
        if let Some(tx) = self.shared.sender.lock().unwrap().as_ref() {
            let _ = tx.send(event);
        }
    }

    /// Drop the sending side, as a driver torn down without notice would.
    pub fn close(&self) {
        self.shared.sender.lock().unwrap().take();
    }

    pub fn set_current_step(&self, index: usize) {
        self.shared.current.store(index, Ordering::SeqCst);
    }

    pub fn starts(&self) -> usize {
        self.shared.started.load(Ordering::SeqCst)
    }

    pub fn configured_steps(&self) -> Vec<Vec<StepDescriptor>> {
        self.shared
            .configured
            .lock()
            .unwrap()
            .iter()
            .map(|(_, steps)| steps.clone())
            .collect()
    }

    pub fn configured_options(&self) -> Vec<DriverOptions> {
        self.shared
            .configured
            .lock()
            .unwrap()
            .iter()
            .map(|(options, _)| options.clone())
            .collect()
    }
}

struct FakeInstance {
    shared: Arc<DriverShared>,
}

impl PresentationDriver for FakeDriver {
    fn configure(
        &self,
        options: &DriverOptions,
        steps: &[StepDescriptor],
    ) -> Result<Box<dyn TourInstance>, DriverError> {
        self.shared
            .configured
            .lock()
            .unwrap()
            .push((options.clone(), steps.to_vec()));
        self.shared.current.store(0, Ordering::SeqCst);
        Ok(Box::new(FakeInstance {
            shared: self.shared.clone(),
        }))
    }
}

impl TourInstance for FakeInstance {
    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<DriverEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.shared.sender.lock().unwrap() = Some(tx);
        rx
    }

    fn start(&mut self) -> Result<(), DriverError> {
        if self.shared.fail_start {
            return Err(DriverError::Start("no overlay layer".to_string()));
        }
        self.shared.started.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn current_step(&self) -> usize {
        self.shared.current.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// notices
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, Severity, Duration)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(String, Severity, Duration)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity, duration: Duration) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity, duration));
    }
}

#[derive(Default)]
pub struct RecordingAlerter {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlerter {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Alerter for RecordingAlerter {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// harness
// ---------------------------------------------------------------------------

/// All fakes wired together. Tweak the public fields before `controller()`.
pub struct Harness {
    pub config: TourConfig,
    pub storage: Arc<RecordingStorage>,
    pub page: Arc<FakePage>,
    pub document: Arc<StaticDocument>,
    pub overlay: Arc<ScriptedOverlay>,
    pub driver: FakeDriver,
    pub notifier: Arc<RecordingNotifier>,
    pub alerter: Arc<RecordingAlerter>,
}

impl Harness {
    pub fn new(path: &str, overlay: ScriptedOverlay) -> Self {
        Self {
            config: TourConfig::default(),
            storage: Arc::new(RecordingStorage::new()),
            page: Arc::new(FakePage::at(path)),
            document: Arc::new(StaticDocument::new()),
            overlay: Arc::new(overlay),
            driver: FakeDriver::new(),
            notifier: Arc::new(RecordingNotifier::default()),
            alerter: Arc::new(RecordingAlerter::default()),
        }
    }

    /// Everything wired, including the driver and the notifier.
    pub fn builder(&self) -> TourControllerBuilder {
        self.bare_builder()
            .driver(Arc::new(self.driver.clone()))
            .notifier(self.notifier.clone())
    }

    /// Required collaborators only: no driver, no notifier.
    pub fn bare_builder(&self) -> TourControllerBuilder {
        TourControllerBuilder::new(self.config.clone())
            .storage(self.storage.clone())
            .page(self.page.clone())
            .document(self.document.clone())
            .overlay_host(self.overlay.clone())
            .alerter(self.alerter.clone())
    }

    pub fn controller(&self) -> TourController {
        self.builder().build().unwrap()
    }
}

//! Terminal implementations of the interactive ports.
//!
//! The welcome overlay and the tour driver share one line reader on stdin.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

use cvtour_core::domain::{
    DriverError, DriverEvent, OverlayError, OverlayId, PromptChoice, StepDescriptor,
    WelcomeContent,
};
use cvtour_core::ports::{
    Alerter, DriverOptions, Notifier, OverlayHost, PresentationDriver, Severity, TourInstance,
};

/// Shared line reader over stdin.
#[derive(Clone)]
pub struct Console {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl Console {
    pub fn stdin() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }

    /// Next trimmed, lowercased line. `None` at end of input.
    pub async fn read_key(&self) -> io::Result<Option<String>> {
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?.map(|l| l.trim().to_lowercase()))
    }
}

// ---------------------------------------------------------------------------
// welcome overlay
// ---------------------------------------------------------------------------

pub struct TerminalOverlay {
    console: Console,
}

impl TerminalOverlay {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

#[async_trait]
impl OverlayHost for TerminalOverlay {
    fn mount(&self, id: OverlayId, content: &WelcomeContent) -> Result<(), OverlayError> {
        debug!(overlay = %id, "drawing welcome box");
        println!();
        println!("  {}  {}", content.icon, content.title);
        println!("  {}", content.lead);
        println!();
        println!("  {}", content.question);
        println!(
            "  [s] {}   [n] {}   [x] {} + {}",
            content.start_label, content.skip_label, content.skip_label, content.dont_show_again_label
        );
        Ok(())
    }

    async fn choice(&self, _id: OverlayId) -> Result<PromptChoice, OverlayError> {
        loop {
            if let Some(choice) = read_choice(self.console.read_key().await) {
                return choice;
            }
        }
    }

    fn unmount(&self, id: OverlayId) {
        debug!(overlay = %id, "welcome box closed");
        println!();
    }
}

/// Map one console read to a prompt choice. `None` asks for another line.
fn read_choice(key: io::Result<Option<String>>) -> Option<Result<PromptChoice, OverlayError>> {
    let key = match key {
        Ok(key) => key,
        Err(e) => return Some(Err(OverlayError::Input(e.to_string()))),
    };
    match key.as_deref() {
        Some("s") | Some("y") => Some(Ok(PromptChoice::Start)),
        Some("n") => Some(Ok(PromptChoice::Skip {
            dont_show_again: false,
        })),
        Some("x") => Some(Ok(PromptChoice::Skip {
            dont_show_again: true,
        })),
        Some(other) => {
            println!("  ? unknown choice {other:?} (s / n / x)");
            None
        }
        None => Some(Err(OverlayError::Dismissed)),
    }
}

// ---------------------------------------------------------------------------
// tour driver
// ---------------------------------------------------------------------------

/// Renders one step per screen and reads `n` / `p` / `q` from the console.
pub struct TerminalDriver {
    console: Console,
}

impl TerminalDriver {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

impl PresentationDriver for TerminalDriver {
    fn configure(
        &self,
        options: &DriverOptions,
        steps: &[StepDescriptor],
    ) -> Result<Box<dyn TourInstance>, DriverError> {
        if steps.is_empty() {
            return Err(DriverError::Configure("a tour needs at least one step".to_string()));
        }
        Ok(Box::new(TerminalTour {
            console: self.console.clone(),
            options: options.clone(),
            steps: steps.to_vec(),
            current: Arc::new(AtomicUsize::new(0)),
            events: None,
        }))
    }
}

struct TerminalTour {
    console: Console,
    options: DriverOptions,
    steps: Vec<StepDescriptor>,
    current: Arc<AtomicUsize>,
    events: Option<mpsc::UnboundedSender<DriverEvent>>,
}

impl TourInstance for TerminalTour {
    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<DriverEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    fn start(&mut self) -> Result<(), DriverError> {
        let events = self
            .events
            .take()
            .ok_or_else(|| DriverError::Start("no subscriber for tour events".to_string()))?;
        tokio::spawn(present(
            self.console.clone(),
            self.options.clone(),
            self.steps.clone(),
            self.current.clone(),
            events,
        ));
        Ok(())
    }

    fn current_step(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }
}

async fn present(
    console: Console,
    options: DriverOptions,
    steps: Vec<StepDescriptor>,
    current: Arc<AtomicUsize>,
    events: mpsc::UnboundedSender<DriverEvent>,
) {
    let total = steps.len();
    let mut index = 0;
    let mut shown = None;
    loop {
        if shown != Some(index) {
            current.store(index, Ordering::SeqCst);
            let _ = events.send(DriverEvent::StepChanged(index));
            render(&steps[index], index, total, &options);
            shown = Some(index);
        }

        let key = match console.read_key().await {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "console read failed; closing the tour");
                None
            }
        };
        match key.as_deref() {
            Some("n") | Some("") if index + 1 == total => {
                let _ = events.send(DriverEvent::Complete);
                // The closing button also dismisses the layer.
                let _ = events.send(DriverEvent::Exit);
                return;
            }
            Some("n") | Some("") => index += 1,
            Some("p") => index = index.saturating_sub(1),
            Some("q") | None => {
                let _ = events.send(DriverEvent::Exit);
                return;
            }
            Some(other) => println!("  ? unknown key {other:?} (n / p / q)"),
        }
    }
}

fn render(step: &StepDescriptor, index: usize, total: usize, options: &DriverOptions) {
    println!("------------------------------------------------------------");
    if options.show_progress {
        println!("  {}/{}", index + 1, total);
    }
    if let Some(anchor) = &step.anchor {
        match step.placement {
            Some(placement) => println!("  -> {anchor} ({placement:?})"),
            None => println!("  -> {anchor}"),
        }
    }
    for line in plain_text(&step.body).lines() {
        println!("  {line}");
    }
    if options.show_bullets {
        let bullets: String = (0..total).map(|i| if i == index { '●' } else { '○' }).collect();
        println!("  {bullets}");
    }
    let next = if index + 1 == total {
        &options.done_label
    } else {
        &options.next_label
    };
    if index == 0 {
        println!("  [n] {next}   [q] {}", options.skip_label);
    } else {
        println!("  [n] {next}   [p] {}   [q] {}", options.prev_label, options.skip_label);
    }
}

/// Drop markup tags and blank lines from a step body.
fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// notices
// ---------------------------------------------------------------------------

/// Prints notices to stderr instead of a timed toast.
pub struct TerminalToast;

impl Notifier for TerminalToast {
    fn notify(&self, message: &str, severity: Severity, duration: Duration) {
        let tag = match severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Warning => "warn",
            Severity::Error => "error",
        };
        debug!(?duration, "toast shown");
        eprintln!("[{tag}] {message}");
    }
}

pub struct TerminalAlerter;

impl Alerter for TerminalAlerter {
    fn alert(&self, message: &str) {
        println!();
        println!("  !! {message}");
        println!();
    }
}

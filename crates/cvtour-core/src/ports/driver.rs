//! PresentationDriver port - ステップを描画する外部エンジン
//!
//! ドライバは不透明な外部コラボレータです。コントローラが使うのは
//! configure → subscribe → start と、現在ステップの参照だけです。

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::domain::{DriverError, DriverEvent, StepDescriptor};

/// Display options handed to the driver together with the steps.
///
/// Serialized with the driver's own option names (camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverOptions {
    pub next_label: String,
    pub prev_label: String,
    pub skip_label: String,
    pub done_label: String,
    pub show_progress: bool,
    pub show_bullets: bool,
    pub exit_on_overlay_click: bool,
    pub disable_interaction: bool,
    pub scroll_to_element: bool,
    pub scroll_padding: u32,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            next_label: "Siguiente".to_string(),
            prev_label: "Anterior".to_string(),
            skip_label: "Saltar".to_string(),
            done_label: "Finalizar".to_string(),
            show_progress: true,
            show_bullets: true,
            exit_on_overlay_click: false,
            disable_interaction: true,
            scroll_to_element: true,
            scroll_padding: 30,
        }
    }
}

/// Factory for tour instances.
pub trait PresentationDriver: Send + Sync {
    fn configure(
        &self,
        options: &DriverOptions,
        steps: &[StepDescriptor],
    ) -> Result<Box<dyn TourInstance>, DriverError>;
}

/// One configured tour.
pub trait TourInstance: Send {
    /// Event stream for this instance. Call before `start`.
    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<DriverEvent>;

    fn start(&mut self) -> Result<(), DriverError>;

    /// Zero-based index of the step currently shown.
    fn current_step(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_driver_option_names() {
        let v = serde_json::to_value(DriverOptions::default()).unwrap();
        assert_eq!(v["nextLabel"], "Siguiente");
        assert_eq!(v["doneLabel"], "Finalizar");
        assert_eq!(v["exitOnOverlayClick"], false);
        assert_eq!(v["disableInteraction"], true);
        assert_eq!(v["scrollToElement"], true);
        assert_eq!(v["scrollPadding"], 30);
    }

    #[test]
    fn partial_options_fill_in_defaults() {
        let opts: DriverOptions = serde_json::from_str(r#"{"nextLabel":"Next"}"#).unwrap();
        assert_eq!(opts.next_label, "Next");
        assert_eq!(opts.prev_label, "Anterior");
        assert!(opts.show_progress);
    }
}

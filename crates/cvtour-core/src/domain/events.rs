//! Events - 外部コラボレータからコントローラへ届くイベント
//!
//! - PromptChoice: ウェルカムプロンプトでのユーザーの選択
//! - DriverEvent: プレゼンテーションドライバの進行・終了通知

/// What the user picked on the welcome prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// "Start": run the tour now.
    Start,
    /// "Not now", with the state of the "don't show again" checkbox.
    Skip { dont_show_again: bool },
}

/// Notifications emitted by a running presentation driver.
///
/// The driver may fire `Exit` right after `Complete`; the controller ignores
/// anything that arrives once the session has terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    /// The user moved to another step (next / prev / bullet).
    StepChanged(usize),
    /// The user pressed "done" on the final step.
    Complete,
    /// The user closed the tour ("skip", close button, escape).
    Exit,
}

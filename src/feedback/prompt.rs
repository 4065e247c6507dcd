//! # Feedback Prompt
//!
//! Everything the feedback UI can do becomes a [`PromptAction`]. The
//! [`PromptMachine::update`] reducer applies it and returns an [`Effect`]
//! describing the I/O the caller must perform (start a timer, send a record).
//! No timers or network calls happen in here.
//!
//! ```text
//!             ScreenShown                 Timer(AutoDismiss) | DismissPrompt
//!   Hidden ───────────────► AutoShown ─────────────────────────────► Dismissed
//!     │  ▲                     │ ActivatePrompt                          │
//!     │  │                     ▼                                         │
//!     │  └──── CloseForm ── FormOpen ◄──────── OpenForm ─────────────────┘
//!     │ OpenForm              │  ▲
//!     └──────────────────────►│  │ TransportError / NotAttempted
//!                       Submit│  │
//!                             ▼  │
//!                     SubmissionPending ── SentUnconfirmed ──► SubmissionResolved
//!                                                                    │ Timer(Reset)
//!                                                                    ▼
//!                                                                  Hidden
//! ```
//!
//! Every state change bumps an epoch. Timers and submission results carry the
//! epoch they were issued at and are ignored once it has moved on, so a late
//! result for a form the user already closed is dropped silently.

use std::time::Duration;

use log::debug;

use crate::feedback::record::{FeedbackDraft, FeedbackRecord};
use crate::feedback::submitter::SubmitOutcome;

/// Shown after a transport failure.
pub const RETRY_MESSAGE: &str = "Something went wrong. Please try again.";
/// Shown when nothing could be sent at all.
pub const UNAVAILABLE_MESSAGE: &str = "Feedback is not available right now.";

pub const DEFAULT_AUTO_SHOW_DELAY: Duration = Duration::ZERO;
pub const DEFAULT_AUTO_DISMISS: Duration = Duration::from_secs(3);
pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Hidden,
    AutoShown,
    Dismissed,
    FormOpen,
    SubmissionPending,
    SubmissionResolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    AutoShow,
    AutoDismiss,
    /// Ends the success display.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    /// The hosting screen became visible.
    ScreenShown,
    TimerElapsed { timer: Timer, epoch: u64 },
    /// Close control on the auto prompt.
    DismissPrompt,
    /// The user activated the auto prompt itself.
    ActivatePrompt,
    /// The persistent call-to-action.
    OpenForm,
    EditName(String),
    EditMessage(String),
    Submit,
    SubmitFinished { epoch: u64, outcome: SubmitOutcome },
    CloseForm,
}

impl PromptAction {
    /// Variant name for logging; never includes field contents.
    pub fn kind(&self) -> &'static str {
        match self {
            PromptAction::ScreenShown => "ScreenShown",
            PromptAction::TimerElapsed { .. } => "TimerElapsed",
            PromptAction::DismissPrompt => "DismissPrompt",
            PromptAction::ActivatePrompt => "ActivatePrompt",
            PromptAction::OpenForm => "OpenForm",
            PromptAction::EditName(_) => "EditName",
            PromptAction::EditMessage(_) => "EditMessage",
            PromptAction::Submit => "Submit",
            PromptAction::SubmitFinished { .. } => "SubmitFinished",
            PromptAction::CloseForm => "CloseForm",
        }
    }
}

/// I/O requested by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Feed `TimerElapsed { timer, epoch }` back after `after`.
    StartTimer { timer: Timer, after: Duration, epoch: u64 },
    /// Send `record`, then feed `SubmitFinished { epoch, outcome }` back.
    Submit { record: FeedbackRecord, epoch: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptConfig {
    /// Whether the prompt appears on its own when the screen is shown.
    pub auto_show: bool,
    pub auto_show_delay: Duration,
    pub auto_dismiss_after: Duration,
    pub success_display: Duration,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            auto_show: true,
            auto_show_delay: DEFAULT_AUTO_SHOW_DELAY,
            auto_dismiss_after: DEFAULT_AUTO_DISMISS,
            success_display: DEFAULT_SUCCESS_DISPLAY,
        }
    }
}

/// One per screen. Not shared across screens; a remount starts fresh.
#[derive(Debug, Clone)]
pub struct PromptMachine {
    config: PromptConfig,
    state: PromptState,
    epoch: u64,
    auto_prompt_used: bool,
    draft: FeedbackDraft,
    error: Option<String>,
    last_outcome: Option<SubmitOutcome>,
}

impl PromptMachine {
    pub fn new(config: PromptConfig) -> Self {
        Self {
            config,
            state: PromptState::Hidden,
            epoch: 0,
            auto_prompt_used: false,
            draft: FeedbackDraft::default(),
            error: None,
            last_outcome: None,
        }
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn draft(&self) -> &FeedbackDraft {
        &self.draft
    }

    /// User-visible error for the open form, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Outcome of the most recent submission that was not discarded.
    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    /// Submit control is enabled only with both fields filled in an open form.
    pub fn can_submit(&self) -> bool {
        self.state == PromptState::FormOpen && self.draft.is_submittable()
    }

    pub fn update(&mut self, action: PromptAction) -> Effect {
        use PromptAction as A;
        use PromptState as S;

        match (self.state, action) {
            (S::Hidden, A::ScreenShown) if self.config.auto_show && !self.auto_prompt_used => {
                self.auto_prompt_used = true;
                if self.config.auto_show_delay.is_zero() {
                    self.show_prompt()
                } else {
                    Effect::StartTimer {
                        timer: Timer::AutoShow,
                        after: self.config.auto_show_delay,
                        epoch: self.epoch,
                    }
                }
            }

            (S::Hidden, A::TimerElapsed { timer: Timer::AutoShow, epoch }) if epoch == self.epoch => {
                self.show_prompt()
            }

            (S::AutoShown, A::TimerElapsed { timer: Timer::AutoDismiss, epoch })
                if epoch == self.epoch =>
            {
                self.transition(S::Dismissed);
                Effect::None
            }

            (S::AutoShown, A::DismissPrompt) => {
                self.transition(S::Dismissed);
                Effect::None
            }

            (S::AutoShown, A::ActivatePrompt) | (S::Hidden | S::Dismissed | S::AutoShown, A::OpenForm) => {
                self.transition(S::FormOpen);
                Effect::None
            }

            (S::FormOpen, A::EditName(name)) => {
                self.draft.name = name;
                self.error = None;
                Effect::None
            }

            (S::FormOpen, A::EditMessage(message)) => {
                self.draft.message = message;
                self.error = None;
                Effect::None
            }

            (S::FormOpen, A::Submit) => match self.draft.validate() {
                Ok(record) => {
                    self.error = None;
                    self.transition(S::SubmissionPending);
                    Effect::Submit {
                        record,
                        epoch: self.epoch,
                    }
                }
                Err(e) => {
                    debug!("prompt: submit rejected: {}", e);
                    Effect::None
                }
            },

            (S::SubmissionPending, A::SubmitFinished { epoch, outcome }) if epoch == self.epoch => {
                self.finish_submission(outcome)
            }

            (S::SubmissionResolved, A::TimerElapsed { timer: Timer::Reset, epoch })
                if epoch == self.epoch =>
            {
                self.transition(S::Hidden);
                Effect::None
            }

            (S::FormOpen | S::SubmissionPending | S::SubmissionResolved, A::CloseForm) => {
                self.draft.clear();
                self.error = None;
                self.transition(S::Hidden);
                Effect::None
            }

            (state, action) => {
                debug!("prompt: ignoring {} in {:?}", action.kind(), state);
                Effect::None
            }
        }
    }

    fn show_prompt(&mut self) -> Effect {
        self.transition(PromptState::AutoShown);
        Effect::StartTimer {
            timer: Timer::AutoDismiss,
            after: self.config.auto_dismiss_after,
            epoch: self.epoch,
        }
    }

    fn finish_submission(&mut self, outcome: SubmitOutcome) -> Effect {
        let effect = match &outcome {
            SubmitOutcome::SentUnconfirmed { .. } => {
                self.draft.clear();
                self.transition(PromptState::SubmissionResolved);
                Effect::StartTimer {
                    timer: Timer::Reset,
                    after: self.config.success_display,
                    epoch: self.epoch,
                }
            }
            SubmitOutcome::TransportError(_) => {
                self.error = Some(RETRY_MESSAGE.to_string());
                self.transition(PromptState::FormOpen);
                Effect::None
            }
            SubmitOutcome::NotAttempted(_) => {
                self.error = Some(UNAVAILABLE_MESSAGE.to_string());
                self.transition(PromptState::FormOpen);
                Effect::None
            }
        };
        self.last_outcome = Some(outcome);
        effect
    }

    fn transition(&mut self, next: PromptState) {
        debug!("prompt: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.epoch += 1;
    }
}

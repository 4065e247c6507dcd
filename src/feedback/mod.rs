//! # Feedback
//!
//! Collects free-text feedback and posts it to an external endpoint.
//!
//! ```text
//! user input ──► PromptMachine (prompt.rs) ──Effect::Submit──► FeedbackSubmitter (submitter.rs)
//!                      ▲                                              │
//!                      └────────── SubmitFinished(SubmitOutcome) ─────┘
//!                              (wired together by FeedbackFlow)
//! ```
//!
//! ## Modules
//!
//! - [`record`]: `FeedbackDraft` and its validated form, `FeedbackRecord`
//! - [`submitter`]: the `FeedbackSubmitter` trait and `HttpSubmitter`
//! - [`prompt`]: the prompt/form state machine
//! - [`flow`]: runs the state machine with tokio timers and a submitter

pub mod flow;
pub mod prompt;
pub mod record;
pub mod submitter;

pub use flow::FeedbackFlow;
pub use prompt::{Effect, PromptAction, PromptConfig, PromptMachine, PromptState, Timer};
pub use record::{FeedbackDraft, FeedbackRecord, ValidationError};
pub use submitter::{FeedbackSubmitter, FormEncoding, HttpSubmitter, SubmitOutcome, SubmitterConfig};

//! Runs a [`PromptMachine`] against real timers and a real submitter.
//!
//! `dispatch` applies an action and spawns whatever the returned effect asks
//! for. Timers and submissions report back through a channel; `next_event`
//! drains one of those reports into the machine.
//!
//! A submission is never aborted. If the form is closed while it is in
//! flight, the request still completes and its outcome is dropped by the
//! machine's epoch check.

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

use crate::feedback::prompt::{Effect, PromptAction, PromptConfig, PromptMachine, PromptState};
use crate::feedback::submitter::FeedbackSubmitter;

pub struct FeedbackFlow {
    machine: PromptMachine,
    submitter: Arc<dyn FeedbackSubmitter>,
    tx: mpsc::UnboundedSender<PromptAction>,
    rx: mpsc::UnboundedReceiver<PromptAction>,
}

impl FeedbackFlow {
    /// Must be called inside a tokio runtime.
    pub fn new(config: PromptConfig, submitter: Arc<dyn FeedbackSubmitter>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            machine: PromptMachine::new(config),
            submitter,
            tx,
            rx,
        }
    }

    /// Creates the flow and reports the hosting screen as visible.
    pub fn mount(config: PromptConfig, submitter: Arc<dyn FeedbackSubmitter>) -> Self {
        let mut flow = Self::new(config, submitter);
        flow.dispatch(PromptAction::ScreenShown);
        flow
    }

    pub fn machine(&self) -> &PromptMachine {
        &self.machine
    }

    pub fn state(&self) -> PromptState {
        self.machine.state()
    }

    pub fn dispatch(&mut self, action: PromptAction) {
        let effect = self.machine.update(action);
        self.run(effect);
    }

    /// Waits for the next timer or submission report and applies it.
    pub async fn next_event(&mut self) -> PromptState {
        // `self` holds a sender, so the channel never closes.
        if let Some(action) = self.rx.recv().await {
            self.dispatch(action);
        }
        self.machine.state()
    }

    /// Processes reports until no submission is pending or being displayed.
    pub async fn settle(&mut self) -> PromptState {
        while matches!(
            self.machine.state(),
            PromptState::SubmissionPending | PromptState::SubmissionResolved
        ) {
            self.next_event().await;
        }
        self.machine.state()
    }

    fn run(&self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::StartTimer { timer, after, epoch } => {
                debug!("flow: starting {:?} timer ({:?})", timer, after);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(PromptAction::TimerElapsed { timer, epoch });
                });
            }
            Effect::Submit { record, epoch } => {
                debug!("flow: submitting via {}", self.submitter.name());
                let tx = self.tx.clone();
                let submitter = Arc::clone(&self.submitter);
                tokio::spawn(async move {
                    let outcome = submitter.submit(&record).await;
                    let _ = tx.send(PromptAction::SubmitFinished { epoch, outcome });
                });
            }
        }
    }
}

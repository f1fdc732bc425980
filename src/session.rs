use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::refusal::ProposalOutcome;
use crate::core::scene::{Effect, RenderSink, Scene, SceneController};
use crate::core::store::NameSlot;
use crate::core::timer::{TimerRequest, TimerToken};
use crate::feedback::{Cue, FeedbackSink};
use crate::input::{self, Input};
use crate::share::{self, ClipboardSink, CommandClipboard, NoNativeShare, SharePayload, ShareSink};

/// What a finished session looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub scene: Scene,
    pub outcome: Option<ProposalOutcome>,
    pub answers: usize,
}

struct ShareTargets {
    native: Box<dyn ShareSink>,
    clipboard: Box<dyn ClipboardSink>,
    export_path: PathBuf,
}

/// Drives a [`SceneController`] from lines of input and fired timers,
/// carrying out its effects on the given sinks.
pub struct Session<R, F, N> {
    controller: SceneController,
    renderer: R,
    feedback: F,
    names: N,
    share: ShareTargets,
    transition: Duration,
}

/// Read the stored name; an unreadable slot is treated as empty.
pub fn saved_name<N: NameSlot>(names: &N) -> Option<String> {
    match names.load() {
        Ok(name) => name,
        Err(e) => {
            warn!(error = %e, "stored name unreadable, starting without one");
            None
        }
    }
}

impl<R: RenderSink, F: FeedbackSink, N: NameSlot> Session<R, F, N> {
    pub fn new(controller: SceneController, renderer: R, feedback: F, names: N) -> Self {
        Session {
            controller,
            renderer,
            feedback,
            names,
            share: ShareTargets {
                native: Box::new(NoNativeShare),
                clipboard: Box::new(CommandClipboard::default()),
                export_path: std::env::temp_dir().join("hearts-share.txt"),
            },
            transition: Duration::ZERO,
        }
    }

    /// Pause before rendering each newly entered scene.
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    pub fn with_share(
        mut self,
        native: Box<dyn ShareSink>,
        clipboard: Box<dyn ClipboardSink>,
        export_path: PathBuf,
    ) -> Self {
        self.share = ShareTargets {
            native,
            clipboard,
            export_path,
        };
        self
    }

    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn names(&self) -> &N {
        &self.names
    }

    /// Run until `quit` or end of input.
    pub async fn run<L>(&mut self, input: L) -> Result<SessionSummary>
    where
        L: AsyncBufRead + Unpin,
    {
        let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<TimerToken>();
        let mut lines = input.lines();

        let effects = self.controller.start();
        self.apply(effects, &timer_tx).await;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line? {
                        Some(line) => {
                            if !self.on_line(&line, &timer_tx).await {
                                break;
                            }
                        }
                        None => {
                            debug!("input closed");
                            break;
                        }
                    }
                }
                Some(token) = timer_rx.recv() => {
                    let effects = self.controller.on_timer(token);
                    self.apply(effects, &timer_tx).await;
                }
            }
        }

        let state = self.controller.state();
        let summary = SessionSummary {
            session_id: state.session_id,
            scene: self.controller.scene(),
            outcome: state.proposal_outcome,
            answers: state.answers.len(),
        };
        info!(
            session = %summary.session_id,
            scene = %summary.scene,
            outcome = ?summary.outcome,
            "session ended"
        );
        Ok(summary)
    }

    /// Returns `false` when the session should end.
    async fn on_line(&mut self, line: &str, timers: &mpsc::UnboundedSender<TimerToken>) -> bool {
        match input::parse(self.controller.scene(), line) {
            Input::Quit => return false,
            Input::Share => self.share(),
            Input::Unknown(text) => {
                debug!(input = %text, scene = %self.controller.scene(), "unrecognised input");
                self.feedback.cue(Cue::Error);
                self.renderer.notify(&format!("🤔 \"{}\" doesn't mean anything here", text));
            }
            Input::Command(command) => match self.controller.handle(command) {
                Ok(effects) => self.apply(effects, timers).await,
                Err(e) => {
                    debug!(error = %e, "command rejected");
                    self.feedback.cue(Cue::Error);
                    self.renderer.notify(&format!("💔 {}", e));
                }
            },
        }
        true
    }

    fn share(&mut self) {
        let result = share::share_or_copy(
            &SharePayload::default(),
            self.share.native.as_mut(),
            self.share.clipboard.as_mut(),
            &self.share.export_path,
        );
        self.feedback.cue(Cue::Click);
        self.renderer.notify(&result.message());
    }

    async fn apply(&mut self, effects: Vec<Effect>, timers: &mpsc::UnboundedSender<TimerToken>) {
        for effect in effects {
            match effect {
                Effect::Cue(cue) => self.feedback.cue(cue),
                Effect::Enter(scene) => {
                    if scene != Scene::Loading && !self.transition.is_zero() {
                        tokio::time::sleep(self.transition).await;
                    }
                    self.renderer.render(&self.controller.view());
                }
                Effect::Refresh => self.renderer.render(&self.controller.view()),
                Effect::Schedule(request) => schedule(request, timers.clone()),
                Effect::PersistName(name) => {
                    if let Err(e) = self.names.save(&name) {
                        warn!(error = %e, "could not persist name");
                    }
                }
            }
        }
    }
}

fn schedule(request: TimerRequest, timers: mpsc::UnboundedSender<TimerToken>) {
    tokio::spawn(async move {
        if !request.delay.is_zero() {
            tokio::time::sleep(request.delay).await;
        }
        // The session may already be gone.
        let _ = timers.send(request.token);
    });
}

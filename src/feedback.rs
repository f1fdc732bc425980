use serde::Serialize;
use std::io::Write;
use tracing::debug;

/// Discrete feedback cues the engine asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Click,
    Heart,
    Success,
    Transition,
    Error,
    Skip,
    Accept,
}

impl Cue {
    pub fn as_str(self) -> &'static str {
        match self {
            Cue::Click => "click",
            Cue::Heart => "heart",
            Cue::Success => "success",
            Cue::Transition => "transition",
            Cue::Error => "error",
            Cue::Skip => "skip",
            Cue::Accept => "accept",
        }
    }

    /// Whether a terminal bell suits this cue.
    fn rings(self) -> bool {
        matches!(self, Cue::Error | Cue::Success | Cue::Accept)
    }
}

/// Fire-and-forget feedback; the engine never observes a result.
pub trait FeedbackSink {
    fn cue(&mut self, cue: Cue);
}

/// Rings the terminal bell for the louder cues when sound is enabled.
pub struct TerminalFeedback {
    sound: bool,
}

impl TerminalFeedback {
    pub fn new(sound: bool) -> Self {
        Self { sound }
    }
}

impl FeedbackSink for TerminalFeedback {
    fn cue(&mut self, cue: Cue) {
        debug!(cue = cue.as_str(), "feedback");
        if self.sound && cue.rings() {
            let mut stdout = std::io::stdout();
            // A failed bell is not worth surfacing.
            let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        }
    }
}

/// Keeps every cue it receives.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub cues: Vec<Cue>,
}

impl FeedbackSink for RecordingFeedback {
    fn cue(&mut self, cue: Cue) {
        self.cues.push(cue);
    }
}

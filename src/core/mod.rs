pub mod content;
pub mod emotion;
pub mod error;
pub mod quiz;
pub mod refusal;
pub mod scene;
pub mod store;
pub mod timer;
pub mod vault;

pub use content::{Content, LetterTemplate, Question, QuizOption};
pub use emotion::{EmotionDelta, EmotionKind, EmotionProfile};
pub use error::{GameError, Result};
pub use quiz::{AdvanceOutcome, AnswerLog, AnswerRecord, QuizEngine};
pub use refusal::{ProposalOutcome, RefusalEscalation, RefusalSignal, RefusalState};
pub use scene::{Command, Effect, Pacing, RenderSink, Scene, SceneController, SceneView, SessionState};
pub use store::{FileNameSlot, MemoryNameSlot, NameSlot};
pub use timer::{TimerEpoch, TimerKind, TimerRequest, TimerToken};
pub use vault::{UnlockProgress, VaultId, VaultUnlockTracker};

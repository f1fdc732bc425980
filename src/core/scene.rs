//! Top-level scene state machine.
//!
//! The controller owns all session state and only ever moves forward through
//! [`Scene`] order, except for `restart` which returns to loading. Commands
//! that make no sense in the current scene are ignored. Side effects are not
//! performed here; they are returned as [`Effect`]s for the driver to carry
//! out (render, feedback cue, timer, persistence).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use super::content::{Content, Question};
use super::emotion::{EmotionKind, EmotionProfile};
use super::error::Result;
use super::quiz::{AdvanceOutcome, AnswerLog, QuizEngine};
use super::refusal::{
    EscalationVisual, ProposalOutcome, RefusalEscalation, RefusalSignal, RefusalState,
};
use super::timer::{TimerEpoch, TimerKind, TimerRequest, TimerToken};
use super::vault::{VaultId, VaultUnlockTracker};
use crate::feedback::Cue;
use crate::letters::{self, FinalLetter, LetterCard, VaultPanel};

/// Name used in letters before one has been entered.
const ANONYMOUS: &str = "friend";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scene {
    Loading,
    NameEntry,
    Disclaimer,
    Questions,
    Results,
    LetterSelect,
    Proposal,
    Vault,
    Final,
}

impl Scene {
    pub fn as_str(self) -> &'static str {
        match self {
            Scene::Loading => "loading",
            Scene::NameEntry => "name-entry",
            Scene::Disclaimer => "disclaimer",
            Scene::Questions => "questions",
            Scene::Results => "results",
            Scene::LetterSelect => "letter-select",
            Scene::Proposal => "proposal",
            Scene::Vault => "vault",
            Scene::Final => "final",
        }
    }

    /// The single scene reachable by moving forward.
    pub fn next(self) -> Option<Scene> {
        match self {
            Scene::Loading => Some(Scene::NameEntry),
            Scene::NameEntry => Some(Scene::Disclaimer),
            Scene::Disclaimer => Some(Scene::Questions),
            Scene::Questions => Some(Scene::Results),
            Scene::Results => Some(Scene::LetterSelect),
            Scene::LetterSelect => Some(Scene::Proposal),
            Scene::Proposal => Some(Scene::Vault),
            Scene::Vault => Some(Scene::Final),
            Scene::Final => None,
        }
    }

    pub fn can_transition_to(self, target: Scene) -> bool {
        target == Scene::Loading || self.next() == Some(target)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-originated input, already mapped from raw events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SkipLoading,
    SubmitName(String),
    AcceptDisclaimer,
    SelectAnswer(usize),
    Advance,
    ContinueToLetters,
    ChooseLetter(EmotionKind),
    Accept,
    Reject,
    OpenVault(VaultId),
    Restart,
}

/// Work the driver must carry out, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Cue(Cue),
    /// A new scene became active; render it.
    Enter(Scene),
    /// The active scene's view changed; re-render it.
    Refresh,
    Schedule(TimerRequest),
    PersistName(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub quote_interval: Duration,
    pub skip_reveal: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            quote_interval: Duration::from_millis(2000),
            skip_reveal: Duration::from_millis(5000),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingProgress {
    pub presented: usize,
    pub skip_available: bool,
    pub skipped: bool,
}

/// Everything that belongs to one playthrough.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: Uuid,
    pub display_name: Option<String>,
    pub profile: EmotionProfile,
    pub answers: AnswerLog,
    pub quiz: QuizEngine,
    pub refusal: RefusalEscalation,
    pub vault: VaultUnlockTracker,
    pub selected_letter: Option<EmotionKind>,
    pub proposal_outcome: Option<ProposalOutcome>,
    pub loading: LoadingProgress,
    pub last_opened: Option<VaultId>,
    /// Index into `answers` quoted by the final letter.
    pub remembered_answer: Option<usize>,
}

impl SessionState {
    pub fn new(display_name: Option<String>) -> Self {
        SessionState {
            session_id: Uuid::new_v4(),
            display_name,
            profile: EmotionProfile::new(),
            answers: AnswerLog::new(),
            quiz: QuizEngine::new(),
            refusal: RefusalEscalation::new(),
            vault: VaultUnlockTracker::new(),
            selected_letter: None,
            proposal_outcome: None,
            loading: LoadingProgress::default(),
            last_opened: None,
            remembered_answer: None,
        }
    }

    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(ANONYMOUS)
    }
}

/// Snapshot of what the active scene should show.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneView {
    Loading {
        quote: Option<String>,
        presented: usize,
        total: usize,
        skip_available: bool,
    },
    NameEntry {
        saved_name: Option<String>,
    },
    Disclaimer {
        name: String,
    },
    Question {
        number: usize,
        total: usize,
        question: Question,
        pending: Option<usize>,
    },
    Results {
        name: String,
        profile: EmotionProfile,
        dominant: EmotionKind,
    },
    LetterSelect {
        name: String,
        cards: Vec<LetterCard>,
    },
    Proposal {
        name: String,
        state: RefusalState,
        taunt: Option<&'static str>,
        visual: EscalationVisual,
    },
    Vault {
        unlocked: Vec<VaultId>,
        opened: Option<(VaultId, VaultPanel)>,
    },
    Final {
        letter: FinalLetter,
    },
}

impl SceneView {
    pub fn scene(&self) -> Scene {
        match self {
            SceneView::Loading { .. } => Scene::Loading,
            SceneView::NameEntry { .. } => Scene::NameEntry,
            SceneView::Disclaimer { .. } => Scene::Disclaimer,
            SceneView::Question { .. } => Scene::Questions,
            SceneView::Results { .. } => Scene::Results,
            SceneView::LetterSelect { .. } => Scene::LetterSelect,
            SceneView::Proposal { .. } => Scene::Proposal,
            SceneView::Vault { .. } => Scene::Vault,
            SceneView::Final { .. } => Scene::Final,
        }
    }
}

/// Produces a visual representation of a scene view.
pub trait RenderSink {
    fn render(&mut self, view: &SceneView);

    /// One-line message outside any scene view.
    fn notify(&mut self, _message: &str) {}
}

pub struct SceneController {
    content: Content,
    pacing: Pacing,
    scene: Scene,
    state: SessionState,
    epoch: TimerEpoch,
    rng: StdRng,
}

impl SceneController {
    pub fn new(content: Content, pacing: Pacing, saved_name: Option<String>) -> Self {
        SceneController {
            content,
            pacing,
            scene: Scene::Loading,
            state: SessionState::new(saved_name),
            epoch: TimerEpoch::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Fix the RNG used to pick the remembered answer.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Begin the loading sequence.
    pub fn start(&mut self) -> Vec<Effect> {
        self.enter_loading()
    }

    pub fn handle(&mut self, command: Command) -> Result<Vec<Effect>> {
        let effects = match (self.scene, command) {
            (_, Command::Restart) => self.restart(),
            (Scene::Loading, Command::SkipLoading) => self.skip_loading(),
            (Scene::NameEntry, Command::SubmitName(raw)) => self.submit_name(&raw),
            (Scene::Disclaimer, Command::AcceptDisclaimer) => {
                let mut effects = vec![Effect::Cue(Cue::Click)];
                effects.extend(self.transition(Scene::Questions));
                effects
            }
            (Scene::Questions, Command::SelectAnswer(index)) => {
                self.state.quiz.select_answer(self.content.questions(), index)?;
                vec![Effect::Cue(Cue::Heart), Effect::Refresh]
            }
            (Scene::Questions, Command::Advance) => self.advance_question()?,
            (Scene::Results, Command::ContinueToLetters) => {
                let mut effects = vec![Effect::Cue(Cue::Click)];
                effects.extend(self.transition(Scene::LetterSelect));
                effects
            }
            (Scene::LetterSelect, Command::ChooseLetter(kind)) => {
                self.state.selected_letter = Some(kind);
                let mut effects = vec![Effect::Cue(Cue::Heart), Effect::Cue(Cue::Success)];
                effects.extend(self.transition(Scene::Proposal));
                effects
            }
            (Scene::Proposal, Command::Reject) => self.reject(),
            (Scene::Proposal, Command::Accept) => self.accept(),
            (Scene::Vault, Command::OpenVault(id)) => self.open_vault(id),
            (scene, command) => {
                debug!(scene = %scene, ?command, "command ignored in this scene");
                Vec::new()
            }
        };
        Ok(effects)
    }

    /// Deliver a fired timer. Tokens from an older epoch are discarded.
    pub fn on_timer(&mut self, token: TimerToken) -> Vec<Effect> {
        if !self.epoch.is_current(&token) || self.scene != Scene::Loading {
            debug!(
                kind = ?token.kind,
                token_epoch = token.epoch(),
                current_epoch = self.epoch.current(),
                "stale timer discarded"
            );
            return Vec::new();
        }

        match token.kind {
            TimerKind::RevealSkip => {
                self.state.loading.skip_available = true;
                vec![Effect::Cue(Cue::Heart), Effect::Refresh]
            }
            TimerKind::NextQuote => {
                if self.state.loading.presented < self.content.quotes().len() {
                    self.state.loading.presented += 1;
                    vec![
                        Effect::Refresh,
                        Effect::Schedule(
                            self.epoch
                                .schedule(TimerKind::NextQuote, self.pacing.quote_interval),
                        ),
                    ]
                } else {
                    self.complete_loading()
                }
            }
        }
    }

    pub fn view(&self) -> SceneView {
        let name = self.state.name().to_string();
        match self.scene {
            Scene::Loading => {
                let presented = self.state.loading.presented;
                SceneView::Loading {
                    quote: presented
                        .checked_sub(1)
                        .and_then(|i| self.content.quotes().get(i))
                        .cloned(),
                    presented,
                    total: self.content.quotes().len(),
                    skip_available: self.state.loading.skip_available,
                }
            }
            Scene::NameEntry => SceneView::NameEntry {
                saved_name: self.state.display_name.clone(),
            },
            Scene::Disclaimer => SceneView::Disclaimer { name },
            Scene::Questions => {
                let questions = self.content.questions();
                let index = self.state.quiz.index().min(questions.len().saturating_sub(1));
                SceneView::Question {
                    number: index + 1,
                    total: questions.len(),
                    question: questions[index].clone(),
                    pending: self.state.quiz.pending(),
                }
            }
            Scene::Results => SceneView::Results {
                name,
                profile: self.state.profile.clone(),
                dominant: self.state.profile.dominant(),
            },
            Scene::LetterSelect => SceneView::LetterSelect {
                name,
                cards: letters::letter_cards(&self.content, &self.state),
            },
            Scene::Proposal => {
                let state = self.state.refusal.state();
                let visual = match state {
                    RefusalState::Idle | RefusalState::Accepted => EscalationVisual::for_intensity(0),
                    RefusalState::Escalating(n) => EscalationVisual::for_intensity(n),
                    RefusalState::Forced => EscalationVisual::forced(),
                };
                SceneView::Proposal {
                    name,
                    state,
                    taunt: self.state.refusal.current_taunt(),
                    visual,
                }
            }
            Scene::Vault => SceneView::Vault {
                unlocked: self.state.vault.unlocked().collect(),
                opened: self
                    .state
                    .last_opened
                    .map(|id| (id, letters::vault_panel(id, &self.content, &self.state))),
            },
            Scene::Final => SceneView::Final {
                letter: letters::final_letter(&self.state),
            },
        }
    }

    fn transition(&mut self, target: Scene) -> Vec<Effect> {
        if !self.scene.can_transition_to(target) {
            debug!(from = %self.scene, to = %target, "unreachable transition ignored");
            return Vec::new();
        }
        if self.scene == Scene::Loading {
            self.epoch.bump();
        }

        info!(session = %self.state.session_id, from = %self.scene, to = %target, "scene transition");
        self.scene = target;
        vec![Effect::Cue(Cue::Transition), Effect::Enter(target)]
    }

    fn enter_loading(&mut self) -> Vec<Effect> {
        self.epoch.bump();
        self.scene = Scene::Loading;
        self.state.loading = LoadingProgress {
            presented: 1,
            skip_available: self.pacing.skip_reveal.is_zero(),
            skipped: false,
        };
        info!(session = %self.state.session_id, "loading sequence started");

        let mut effects = vec![
            Effect::Enter(Scene::Loading),
            Effect::Schedule(
                self.epoch
                    .schedule(TimerKind::NextQuote, self.pacing.quote_interval),
            ),
        ];
        if !self.state.loading.skip_available {
            effects.push(Effect::Schedule(
                self.epoch.schedule(TimerKind::RevealSkip, self.pacing.skip_reveal),
            ));
        }
        effects
    }

    fn complete_loading(&mut self) -> Vec<Effect> {
        let mut effects = vec![Effect::Cue(Cue::Success)];
        effects.extend(self.transition(Scene::NameEntry));
        effects
    }

    fn skip_loading(&mut self) -> Vec<Effect> {
        let loading = &mut self.state.loading;
        if !loading.skip_available || loading.skipped {
            debug!("skip not available yet");
            return Vec::new();
        }
        loading.skipped = true;
        loading.presented = self.content.quotes().len();

        let mut effects = vec![Effect::Cue(Cue::Skip)];
        effects.extend(self.complete_loading());
        effects
    }

    fn submit_name(&mut self, raw: &str) -> Vec<Effect> {
        let trimmed = raw.trim();
        let name = if trimmed.is_empty() {
            self.state.display_name.clone()
        } else {
            Some(trimmed.to_string())
        };

        let Some(name) = name else {
            return vec![Effect::Cue(Cue::Error)];
        };

        self.state.display_name = Some(name.clone());
        let mut effects = vec![Effect::Cue(Cue::Accept), Effect::PersistName(name)];
        effects.extend(self.transition(Scene::Disclaimer));
        effects
    }

    fn advance_question(&mut self) -> Result<Vec<Effect>> {
        let outcome = self.state.quiz.advance(
            self.content.questions(),
            &mut self.state.profile,
            &mut self.state.answers,
        )?;

        if let AdvanceOutcome::NextQuestion { index, .. } = outcome {
            debug!(index, "next question");
            return Ok(vec![Effect::Cue(Cue::Transition), Effect::Refresh]);
        }

        info!(
            session = %self.state.session_id,
            total = self.state.profile.total(),
            dominant = %self.state.profile.dominant(),
            "quiz complete"
        );
        let mut effects = vec![Effect::Cue(Cue::Success)];
        effects.extend(self.transition(Scene::Results));
        Ok(effects)
    }

    fn reject(&mut self) -> Vec<Effect> {
        match self.state.refusal.reject_once() {
            RefusalSignal::Escalate { intensity, .. } => {
                debug!(intensity, "refusal escalated");
                vec![Effect::Cue(Cue::Error), Effect::Refresh]
            }
            RefusalSignal::ForceAccept { .. } => {
                self.state.proposal_outcome = Some(ProposalOutcome::Forced);
                info!(session = %self.state.session_id, "refusals exhausted, acceptance forced");
                vec![Effect::Cue(Cue::Error), Effect::Refresh]
            }
            RefusalSignal::AlreadyForced | RefusalSignal::AlreadyAccepted => Vec::new(),
        }
    }

    fn accept(&mut self) -> Vec<Effect> {
        let outcome = self.state.refusal.accept_once();
        self.state.proposal_outcome = Some(outcome);
        info!(
            session = %self.state.session_id,
            forced = outcome.is_forced(),
            refusals = self.state.refusal.count(),
            "proposal accepted"
        );

        let mut effects = vec![Effect::Cue(Cue::Heart), Effect::Cue(Cue::Success)];
        effects.extend(self.transition(Scene::Vault));
        effects
    }

    fn open_vault(&mut self, id: VaultId) -> Vec<Effect> {
        let progress = self.state.vault.unlock(id);
        self.state.last_opened = Some(id);

        if !progress.newly_unlocked {
            return vec![Effect::Cue(Cue::Click), Effect::Refresh];
        }
        if !progress.all_complete {
            return vec![Effect::Cue(Cue::Success), Effect::Refresh];
        }

        let answered = self.state.answers.len();
        self.state.remembered_answer = (answered > 0).then(|| self.rng.gen_range(0..answered));
        info!(session = %self.state.session_id, "vault complete");

        let mut effects = vec![Effect::Cue(Cue::Success)];
        effects.extend(self.transition(Scene::Final));
        effects
    }

    fn restart(&mut self) -> Vec<Effect> {
        let state = &mut self.state;
        state.session_id = Uuid::new_v4();
        state.profile.reset();
        state.answers.clear();
        state.quiz.reset();
        state.refusal.reset();
        state.vault.reset();
        state.selected_letter = None;
        state.proposal_outcome = None;
        state.last_opened = None;
        state.remembered_answer = None;
        info!(session = %self.state.session_id, "session restarted");

        let mut effects = vec![Effect::Cue(Cue::Click)];
        effects.extend(self.enter_loading());
        effects
    }
}

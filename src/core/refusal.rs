use serde::Serialize;

/// Taunts revealed one per refusal, in order. The last one is shown as the
/// refusal sequence is forcibly converted into acceptance.
pub const TAUNTS: [&str; 10] = [
    "Try again.",
    "That one hurt.",
    "Emotionally damaged.",
    "You monster.",
    "Heartbreaker!",
    "Cruel human!",
    "Mean! 😭",
    "Please stop...",
    "I'm fragile!",
    "Okay fine!",
];

/// Number of refusals before acceptance is forced.
pub const MAX_REFUSALS: usize = TAUNTS.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "count", rename_all = "snake_case")]
pub enum RefusalState {
    Idle,
    Escalating(usize),
    /// Refusals exhausted; acceptance is synthetic from here on.
    Forced,
    /// The user said yes on their own.
    Accepted,
}

impl RefusalState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RefusalState::Forced | RefusalState::Accepted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalSignal {
    Escalate {
        message: &'static str,
        intensity: usize,
    },
    ForceAccept {
        last_words: &'static str,
    },
    AlreadyForced,
    AlreadyAccepted,
}

/// How the proposal was ultimately accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalOutcome {
    Accepted,
    Forced,
}

impl ProposalOutcome {
    pub fn is_forced(self) -> bool {
        matches!(self, ProposalOutcome::Forced)
    }
}

pub const FORCED_YES_SCALE: f32 = 1.5;

/// Relative button sizes for a given escalation intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscalationVisual {
    pub yes_scale: f32,
    pub no_scale: f32,
}

impl EscalationVisual {
    pub fn for_intensity(intensity: usize) -> Self {
        let n = intensity as f32;
        EscalationVisual {
            yes_scale: 1.0 + n * 0.15,
            no_scale: (1.0 - n * 0.1).max(0.5),
        }
    }

    /// Fixed look once acceptance is forced; the no button is gone.
    pub fn forced() -> Self {
        EscalationVisual {
            yes_scale: FORCED_YES_SCALE,
            no_scale: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RefusalEscalation {
    count: usize,
    terminal: Option<ProposalOutcome>,
}

impl RefusalEscalation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn state(&self) -> RefusalState {
        match (self.terminal, self.count) {
            (Some(ProposalOutcome::Forced), _) => RefusalState::Forced,
            (Some(ProposalOutcome::Accepted), _) => RefusalState::Accepted,
            (None, 0) => RefusalState::Idle,
            (None, n) => RefusalState::Escalating(n),
        }
    }

    /// Taunt revealed by the most recent refusal, if any.
    pub fn current_taunt(&self) -> Option<&'static str> {
        self.count.checked_sub(1).map(|i| TAUNTS[i])
    }

    pub fn reject_once(&mut self) -> RefusalSignal {
        match self.terminal {
            Some(ProposalOutcome::Forced) => return RefusalSignal::AlreadyForced,
            Some(ProposalOutcome::Accepted) => return RefusalSignal::AlreadyAccepted,
            None => {}
        }

        self.count += 1;
        if self.count >= MAX_REFUSALS {
            self.terminal = Some(ProposalOutcome::Forced);
            RefusalSignal::ForceAccept {
                last_words: TAUNTS[MAX_REFUSALS - 1],
            }
        } else {
            RefusalSignal::Escalate {
                message: TAUNTS[self.count - 1],
                intensity: self.count,
            }
        }
    }

    /// Say yes. From a forced state the acceptance stays flagged as forced.
    pub fn accept_once(&mut self) -> ProposalOutcome {
        *self.terminal.get_or_insert(ProposalOutcome::Accepted)
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.terminal = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalation_reveals_taunts_in_order() {
        let mut refusal = RefusalEscalation::new();
        assert_eq!(refusal.state(), RefusalState::Idle);
        assert_eq!(refusal.current_taunt(), None);

        for n in 1..MAX_REFUSALS {
            match refusal.reject_once() {
                RefusalSignal::Escalate { message, intensity } => {
                    assert_eq!(message, TAUNTS[n - 1]);
                    assert_eq!(intensity, n);
                }
                other => panic!("refusal {} should escalate, got {:?}", n, other),
            }
            assert_eq!(refusal.state(), RefusalState::Escalating(n));
        }
    }

    #[test]
    fn test_tenth_refusal_forces_acceptance() {
        let mut refusal = RefusalEscalation::new();
        for _ in 1..MAX_REFUSALS {
            refusal.reject_once();
            assert_ne!(refusal.state(), RefusalState::Forced);
        }

        assert_eq!(
            refusal.reject_once(),
            RefusalSignal::ForceAccept { last_words: "Okay fine!" }
        );
        assert_eq!(refusal.state(), RefusalState::Forced);

        for _ in 0..3 {
            assert_eq!(refusal.reject_once(), RefusalSignal::AlreadyForced);
        }
        assert_eq!(refusal.count(), MAX_REFUSALS);
    }

    #[test]
    fn test_accept_after_force_is_flagged_forced() {
        let mut refusal = RefusalEscalation::new();
        for _ in 0..MAX_REFUSALS {
            refusal.reject_once();
        }
        assert_eq!(refusal.accept_once(), ProposalOutcome::Forced);
        assert_eq!(refusal.state(), RefusalState::Forced);
    }

    #[test]
    fn test_user_acceptance_is_terminal() {
        let mut refusal = RefusalEscalation::new();
        refusal.reject_once();
        refusal.reject_once();

        assert_eq!(refusal.accept_once(), ProposalOutcome::Accepted);
        assert_eq!(refusal.state(), RefusalState::Accepted);
        assert_eq!(refusal.reject_once(), RefusalSignal::AlreadyAccepted);
        assert_eq!(refusal.count(), 2);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut refusal = RefusalEscalation::new();
        for _ in 0..MAX_REFUSALS {
            refusal.reject_once();
        }
        refusal.reset();
        assert_eq!(refusal.state(), RefusalState::Idle);
        assert!(matches!(refusal.reject_once(), RefusalSignal::Escalate { intensity: 1, .. }));
    }

    #[test]
    fn test_visual_scales() {
        let calm = EscalationVisual::for_intensity(0);
        assert_eq!(calm.yes_scale, 1.0);
        assert_eq!(calm.no_scale, 1.0);

        let late = EscalationVisual::for_intensity(8);
        assert!((late.yes_scale - 2.2).abs() < 1e-5);
        assert_eq!(late.no_scale, 0.5);

        let forced = EscalationVisual::forced();
        assert_eq!(forced.yes_scale, FORCED_YES_SCALE);
        assert_eq!(forced.no_scale, 0.0);
    }
}

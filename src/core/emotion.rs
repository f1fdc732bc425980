use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{GameError, Result};

/// One of the five fixed emotion categories answers are scored against.
///
/// Declaration order is significant: it is the tie-break order used by
/// [`EmotionProfile::dominant`] and the order letters are presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionKind {
    Romantic,
    Playful,
    Teasing,
    Emotional,
    Fantasy,
}

impl EmotionKind {
    pub const ALL: [EmotionKind; 5] = [
        EmotionKind::Romantic,
        EmotionKind::Playful,
        EmotionKind::Teasing,
        EmotionKind::Emotional,
        EmotionKind::Fantasy,
    ];

    pub fn index(self) -> usize {
        match self {
            EmotionKind::Romantic => 0,
            EmotionKind::Playful => 1,
            EmotionKind::Teasing => 2,
            EmotionKind::Emotional => 3,
            EmotionKind::Fantasy => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionKind::Romantic => "romantic",
            EmotionKind::Playful => "playful",
            EmotionKind::Teasing => "teasing",
            EmotionKind::Emotional => "emotional",
            EmotionKind::Fantasy => "fantasy",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            EmotionKind::Romantic => "💕",
            EmotionKind::Playful => "😉",
            EmotionKind::Teasing => "😏",
            EmotionKind::Emotional => "🥺",
            EmotionKind::Fantasy => "✨",
        }
    }

    /// Capitalised label used in score breakdowns.
    pub fn label(self) -> &'static str {
        match self {
            EmotionKind::Romantic => "Romantic",
            EmotionKind::Playful => "Playful",
            EmotionKind::Teasing => "Teasing",
            EmotionKind::Emotional => "Emotional",
            EmotionKind::Fantasy => "Fantasy",
        }
    }

    /// How the surprise panel describes someone dominated by this kind.
    pub fn description(self) -> &'static str {
        match self {
            EmotionKind::Romantic => "a hopeless romantic 💕",
            EmotionKind::Playful => "a playful spirit 😄",
            EmotionKind::Teasing => "a charming teaser 😏",
            EmotionKind::Emotional => "an emotional soul 🥺",
            EmotionKind::Fantasy => "a dreamer ✨",
        }
    }
}

impl fmt::Display for EmotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "romantic" => Ok(EmotionKind::Romantic),
            "playful" => Ok(EmotionKind::Playful),
            "teasing" => Ok(EmotionKind::Teasing),
            "emotional" => Ok(EmotionKind::Emotional),
            "fantasy" => Ok(EmotionKind::Fantasy),
            _ => Err(GameError::InvalidEmotionKind(s.to_string())),
        }
    }
}

/// Largest weight a content document may give a single delta.
pub const MAX_WEIGHT: u32 = 100;

/// A single weighted contribution an option makes to the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionDelta {
    pub kind: EmotionKind,
    pub weight: u32,
}

impl EmotionDelta {
    pub fn new(kind: EmotionKind, weight: u32) -> Self {
        EmotionDelta { kind, weight }
    }
}

/// Accumulated score per emotion kind (the score accumulator).
///
/// Scores only ever grow during a playthrough; [`EmotionProfile::reset`] is
/// reserved for session restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionProfile {
    scores: [u32; 5],
}

impl EmotionProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: EmotionKind) -> u32 {
        self.scores[kind.index()]
    }

    /// Add every delta to its kind. Returns the total weight applied.
    pub fn apply_deltas(&mut self, deltas: &[EmotionDelta]) -> u32 {
        let mut applied: u32 = 0;
        for delta in deltas {
            let score = &mut self.scores[delta.kind.index()];
            *score = score.saturating_add(delta.weight);
            applied = applied.saturating_add(delta.weight);
        }
        applied
    }

    /// String-keyed variant of [`apply_deltas`](Self::apply_deltas).
    ///
    /// All keys are validated before anything is applied, so an unknown kind
    /// leaves the profile untouched.
    pub fn apply_named(&mut self, deltas: &[(&str, u32)]) -> Result<u32> {
        let parsed = deltas
            .iter()
            .map(|(name, weight)| Ok(EmotionDelta::new(name.parse()?, *weight)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.apply_deltas(&parsed))
    }

    /// Kind with the highest score; ties go to the kind declared first.
    pub fn dominant(&self) -> EmotionKind {
        let mut best = EmotionKind::Romantic;
        for kind in EmotionKind::ALL {
            if self.get(kind) > self.get(best) {
                best = kind;
            }
        }
        best
    }

    pub fn total(&self) -> u32 {
        self.scores.iter().fold(0u32, |acc, score| acc.saturating_add(*score))
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmotionKind, u32)> + '_ {
        EmotionKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn reset(&mut self) {
        self.scores = [0; 5];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_profile_is_zero() {
        let profile = EmotionProfile::new();
        assert_eq!(profile.total(), 0);
        for kind in EmotionKind::ALL {
            assert_eq!(profile.get(kind), 0);
        }
    }

    #[test]
    fn test_apply_deltas_accumulates() {
        let mut profile = EmotionProfile::new();
        let applied = profile.apply_deltas(&[
            EmotionDelta::new(EmotionKind::Romantic, 4),
            EmotionDelta::new(EmotionKind::Playful, 2),
        ]);
        assert_eq!(applied, 6);
        profile.apply_deltas(&[EmotionDelta::new(EmotionKind::Romantic, 1)]);

        assert_eq!(profile.get(EmotionKind::Romantic), 5);
        assert_eq!(profile.get(EmotionKind::Playful), 2);
        assert_eq!(profile.total(), 7);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let mut profile = EmotionProfile::new();
        let applied = profile.apply_deltas(&[
            EmotionDelta::new(EmotionKind::Romantic, 3_000_000_000),
            EmotionDelta::new(EmotionKind::Romantic, 3_000_000_000),
            EmotionDelta::new(EmotionKind::Playful, 3_000_000_000),
        ]);
        assert_eq!(applied, u32::MAX);
        assert_eq!(profile.get(EmotionKind::Romantic), u32::MAX);
        assert_eq!(profile.total(), u32::MAX);
        assert_eq!(profile.dominant(), EmotionKind::Romantic);
    }

    #[test]
    fn test_apply_named_rejects_unknown_kind_atomically() {
        let mut profile = EmotionProfile::new();
        let err = profile
            .apply_named(&[("romantic", 3), ("spicy", 1)])
            .unwrap_err();

        assert!(matches!(err, GameError::InvalidEmotionKind(ref k) if k == "spicy"));
        assert_eq!(profile.total(), 0);
    }

    #[test]
    fn test_dominant_tie_prefers_enumeration_order() {
        let mut profile = EmotionProfile::new();
        profile.apply_deltas(&[
            EmotionDelta::new(EmotionKind::Romantic, 3),
            EmotionDelta::new(EmotionKind::Playful, 3),
        ]);
        assert_eq!(profile.dominant(), EmotionKind::Romantic);

        let mut profile = EmotionProfile::new();
        profile.apply_deltas(&[
            EmotionDelta::new(EmotionKind::Fantasy, 2),
            EmotionDelta::new(EmotionKind::Teasing, 2),
        ]);
        assert_eq!(profile.dominant(), EmotionKind::Teasing);
    }

    #[test]
    fn test_dominant_of_empty_profile_is_romantic() {
        assert_eq!(EmotionProfile::new().dominant(), EmotionKind::Romantic);
    }

    #[test]
    fn test_dominant_picks_strict_maximum() {
        let mut profile = EmotionProfile::new();
        profile.apply_deltas(&[
            EmotionDelta::new(EmotionKind::Romantic, 2),
            EmotionDelta::new(EmotionKind::Emotional, 5),
        ]);
        assert_eq!(profile.dominant(), EmotionKind::Emotional);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Fantasy".parse::<EmotionKind>().unwrap(), EmotionKind::Fantasy);
        assert!("".parse::<EmotionKind>().is_err());
    }
}

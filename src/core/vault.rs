use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultId {
    Gallery,
    Memories,
    Letters,
    Surprise,
}

impl VaultId {
    pub const ALL: [VaultId; 4] = [
        VaultId::Gallery,
        VaultId::Memories,
        VaultId::Letters,
        VaultId::Surprise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VaultId::Gallery => "gallery",
            VaultId::Memories => "memories",
            VaultId::Letters => "letters",
            VaultId::Surprise => "surprise",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            VaultId::Gallery => "Gallery",
            VaultId::Memories => "Memories",
            VaultId::Letters => "Letters",
            VaultId::Surprise => "Surprise",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            VaultId::Gallery => "🖼️",
            VaultId::Memories => "🧠",
            VaultId::Letters => "✉️",
            VaultId::Surprise => "🎁",
        }
    }
}

impl fmt::Display for VaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VaultId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gallery" => Ok(VaultId::Gallery),
            "memories" => Ok(VaultId::Memories),
            "letters" => Ok(VaultId::Letters),
            "surprise" => Ok(VaultId::Surprise),
            _ => Err(GameError::InvalidVaultId(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockProgress {
    pub count: usize,
    pub newly_unlocked: bool,
    pub all_complete: bool,
}

/// Grow-only set of opened vault panels.
#[derive(Debug, Clone, Default)]
pub struct VaultUnlockTracker {
    unlocked: BTreeSet<VaultId>,
}

impl VaultUnlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unlock(&mut self, id: VaultId) -> UnlockProgress {
        let newly_unlocked = self.unlocked.insert(id);
        UnlockProgress {
            count: self.unlocked.len(),
            newly_unlocked,
            all_complete: self.is_complete(),
        }
    }

    pub fn unlock_named(&mut self, id: &str) -> Result<UnlockProgress> {
        Ok(self.unlock(id.parse()?))
    }

    pub fn is_unlocked(&self, id: VaultId) -> bool {
        self.unlocked.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_complete(&self) -> bool {
        self.unlocked.len() == VaultId::ALL.len()
    }

    pub fn unlocked(&self) -> impl Iterator<Item = VaultId> + '_ {
        self.unlocked.iter().copied()
    }

    pub fn reset(&mut self) {
        self.unlocked.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_is_idempotent() {
        let mut vault = VaultUnlockTracker::new();
        let first = vault.unlock(VaultId::Gallery);
        let second = vault.unlock(VaultId::Gallery);

        assert_eq!(first.count, 1);
        assert!(first.newly_unlocked);
        assert_eq!(second.count, 1);
        assert!(!second.newly_unlocked);
    }

    #[test]
    fn test_complete_only_after_fourth_distinct() {
        let mut vault = VaultUnlockTracker::new();
        let order = [
            VaultId::Surprise,
            VaultId::Gallery,
            VaultId::Surprise,
            VaultId::Letters,
            VaultId::Gallery,
            VaultId::Memories,
        ];

        let mut progress = Vec::new();
        for id in order {
            progress.push(vault.unlock(id));
        }

        assert!(progress[..5].iter().all(|p| !p.all_complete));
        assert!(progress[5].all_complete);
        assert_eq!(progress[5].count, 4);
    }

    #[test]
    fn test_unknown_id_rejected() {
        let mut vault = VaultUnlockTracker::new();
        assert!(matches!(
            vault.unlock_named("attic"),
            Err(GameError::InvalidVaultId(ref id)) if id == "attic"
        ));
        assert_eq!(vault.count(), 0);

        let progress = vault.unlock_named("Memories").unwrap();
        assert_eq!(progress.count, 1);
        assert!(vault.is_unlocked(VaultId::Memories));
    }
}

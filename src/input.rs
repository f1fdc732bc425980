use crate::core::emotion::EmotionKind;
use crate::core::scene::{Command, Scene};
use crate::core::vault::VaultId;

/// A typed terminal line, interpreted for the active scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Share,
    Quit,
    Unknown(String),
}

/// Map one line of input to what it means in `scene`.
///
/// On name entry every line is a name, so the global commands there need a
/// leading slash (`/quit`, `/restart`).
pub fn parse(scene: Scene, line: &str) -> Input {
    let trimmed = line.trim();
    let word = trimmed.to_ascii_lowercase();

    match word.as_str() {
        "/quit" | "/exit" => return Input::Quit,
        "/restart" => return Input::Command(Command::Restart),
        _ => {}
    }

    if scene == Scene::NameEntry {
        return Input::Command(Command::SubmitName(line.to_string()));
    }

    match word.as_str() {
        "q" | "quit" | "exit" => return Input::Quit,
        "r" | "restart" => return Input::Command(Command::Restart),
        _ => {}
    }

    let command = match (scene, word.as_str()) {
        (Scene::Loading, "s" | "skip") => Command::SkipLoading,
        (Scene::Disclaimer, "" | "y" | "yes" | "ok") => Command::AcceptDisclaimer,
        (Scene::Questions, "n" | "next" | "") => Command::Advance,
        (Scene::Questions, w) => match ordinal(w) {
            Some(index) => Command::SelectAnswer(index),
            None => return Input::Unknown(trimmed.to_string()),
        },
        (Scene::Results, "" | "c" | "continue") => Command::ContinueToLetters,
        (Scene::LetterSelect, w) => {
            let kind = ordinal(w)
                .and_then(|i| EmotionKind::ALL.get(i).copied())
                .or_else(|| w.parse().ok());
            match kind {
                Some(kind) => Command::ChooseLetter(kind),
                None => return Input::Unknown(trimmed.to_string()),
            }
        }
        (Scene::Proposal, "y" | "yes") => Command::Accept,
        (Scene::Proposal, "n" | "no") => Command::Reject,
        (Scene::Vault, w) => {
            let id = ordinal(w)
                .and_then(|i| VaultId::ALL.get(i).copied())
                .or_else(|| w.parse().ok());
            match id {
                Some(id) => Command::OpenVault(id),
                None => return Input::Unknown(trimmed.to_string()),
            }
        }
        (Scene::Final, "s" | "share") => return Input::Share,
        _ => return Input::Unknown(trimmed.to_string()),
    };
    Input::Command(command)
}

/// "1" is the first entry. Zero and non-numbers yield `None`.
fn ordinal(word: &str) -> Option<usize> {
    word.parse::<usize>().ok()?.checked_sub(1)
}

use serde::Serialize;

use crate::core::content::Content;
use crate::core::emotion::EmotionKind;
use crate::core::scene::SessionState;
use crate::core::vault::VaultId;

pub const SIGNATURE: &str = "Your Secret Admirer";

/// Card offered on the letter-select scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterCard {
    pub kind: EmotionKind,
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub preview: String,
    pub highlighted: bool,
}

/// Content revealed by opening one vault panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VaultPanel {
    Gallery {
        tiles: [&'static str; 4],
        caption: String,
    },
    Memories {
        entries: Vec<(String, String)>,
        caption: String,
    },
    Letter {
        title: String,
        body: String,
        closing: &'static str,
        signature: &'static str,
    },
    Surprise {
        headline: String,
        description: &'static str,
        love_score: u32,
        breakdown: Vec<(EmotionKind, u32)>,
        blessing: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalLetter {
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub closing: &'static str,
    pub signature: String,
}

pub fn letter_preview(kind: EmotionKind, name: &str) -> String {
    match kind {
        EmotionKind::Romantic => format!(
            "My dear {}, every moment without you feels like a page unturned...",
            name
        ),
        EmotionKind::Playful => format!("Hey {}! Ready for some trouble? 😉", name),
        EmotionKind::Teasing => format!(
            "Oh {}, you really thought you could get away that easily?",
            name
        ),
        EmotionKind::Emotional => format!("{}, there's something I've been meaning to tell you...", name),
        EmotionKind::Fantasy => format!("In a realm of starlight and magic, I found you, {}...", name),
    }
}

pub fn full_letter(kind: EmotionKind, name: &str) -> String {
    match kind {
        EmotionKind::Romantic => format!(
            "My dearest {}, from the moment we began this journey, I knew there was something \
             special about you. Your heart speaks in whispers that echo through my thoughts, and \
             every answer you gave only confirmed what I felt - that you are someone worth cherishing.",
            name
        ),
        EmotionKind::Playful => format!(
            "Hey {}! So here's the thing - you're amazing. Like, seriously. Your playful spirit and \
             quick wit have made this whole experience unforgettable. I hope we can keep this energy \
             going beyond these digital walls!",
            name
        ),
        EmotionKind::Teasing => format!(
            "Alright {}, I have to admit - you've been driving me crazy (in the best way). Your \
             clever answers and that subtle confidence? Absolutely lethal. Consider yourself \
             officially the highlight of my Valentine's season.",
            name
        ),
        EmotionKind::Emotional => format!(
            "{}, there are moments that stay with you, and every interaction we've had is now etched \
             in my memory. Your sincerity and depth have touched me more than you could know. Thank \
             you for being you.",
            name
        ),
        EmotionKind::Fantasy => format!(
            "In a world of ordinary moments, you appeared like a constellation of possibilities, {}. \
             Our digital dance has been a story I'll replay in my mind, wondering what magic the \
             future might hold.",
            name
        ),
    }
}

/// One card per emotion kind, highlighting the player's dominant one.
pub fn letter_cards(content: &Content, state: &SessionState) -> Vec<LetterCard> {
    let dominant = state.profile.dominant();
    content
        .letters()
        .iter()
        .map(|template| LetterCard {
            kind: template.kind,
            title: template.title.clone(),
            description: template.description.clone(),
            emoji: template.emoji.clone(),
            preview: letter_preview(template.kind, state.name()),
            highlighted: template.kind == dominant,
        })
        .collect()
}

pub fn vault_panel(id: VaultId, content: &Content, state: &SessionState) -> VaultPanel {
    let name = state.name();
    match id {
        VaultId::Gallery => VaultPanel::Gallery {
            tiles: ["💕", "🌟", "✨", "🎁"],
            caption: format!("Every moment with you is a memory worth keeping, {}.", name),
        },
        VaultId::Memories => VaultPanel::Memories {
            entries: state
                .answers
                .latest(3)
                .iter()
                .map(|record| (record.question.clone(), record.answer.clone()))
                .collect(),
            caption: format!("These moments made this journey special, {}.", name),
        },
        VaultId::Letters => {
            let kind = state.selected_letter.unwrap_or(EmotionKind::Romantic);
            VaultPanel::Letter {
                title: content.letter(kind).title.clone(),
                body: full_letter(kind, name),
                closing: "Yours truly,",
                signature: SIGNATURE,
            }
        }
        VaultId::Surprise => VaultPanel::Surprise {
            headline: format!("You've unlocked the secret ending, {}!", name),
            description: state.profile.dominant().description(),
            love_score: state.profile.total(),
            breakdown: state.profile.iter().collect(),
            blessing: "This Valentine's, may you find someone who appreciates every part of you.",
        },
    }
}

/// The closing letter. Quotes the answer at `state.remembered_answer`.
pub fn final_letter(state: &SessionState) -> FinalLetter {
    let name = state.name();
    let dominant = state.profile.dominant();
    let remembered = state
        .remembered_answer
        .and_then(|i| state.answers.records().get(i))
        .map(|record| record.answer.as_str())
        .unwrap_or("something amazing");

    let paragraphs = vec![
        format!(
            "From the moment you entered this little adventure, I knew there was something special \
             about you, {}. The way you answered each question, with that unique {} energy... it's \
             been lighting up this digital space like stardust.",
            name, dominant
        ),
        format!(
            "Remember when you said \"{}\"? That's when I realized you weren't just playing a game - \
             you were sharing pieces of yourself, and each piece has been more wonderful than the last.",
            remembered
        ),
        "This Valentine's Day, I don't just want to give you flowers or chocolates (though you \
         definitely deserve both). I want to give you moments that make your heart do that funny \
         little skip, memories that linger like your favorite song, and the certainty that you are \
         absolutely worth celebrating."
            .to_string(),
        "So here's my confession: If you were a library book, I'd never return you because you're \
         the only story I want to keep reading."
            .to_string(),
        "No matter where life takes you, know that today, in this corner of the internet, you made \
         someone believe in magic again. You reminded me that connections can spark anywhere - even \
         in lines of code and carefully crafted questions."
            .to_string(),
        format!(
            "Thank you, {}, for being the wonderful person you are. May your days be filled with the \
             same joy and warmth you've brought to this experience.",
            name
        ),
    ];

    FinalLetter {
        heading: format!("For You, {}...", name),
        paragraphs,
        closing: "With all my heart,",
        signature: format!("{} 💖", SIGNATURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emotion::EmotionDelta;

    fn state_named(name: &str) -> SessionState {
        SessionState::new(Some(name.to_string()))
    }

    #[test]
    fn test_previews_are_personalised() {
        for kind in EmotionKind::ALL {
            assert!(letter_preview(kind, "Alex").contains("Alex"));
            assert!(full_letter(kind, "Alex").contains("Alex"));
        }
    }

    #[test]
    fn test_cards_highlight_dominant() {
        let content = Content::fallback();
        let mut state = state_named("Alex");
        state
            .profile
            .apply_deltas(&[EmotionDelta::new(EmotionKind::Teasing, 3)]);

        let cards = letter_cards(&content, &state);
        assert_eq!(cards.len(), 5);
        assert_eq!(
            cards.iter().map(|c| c.kind).collect::<Vec<_>>(),
            EmotionKind::ALL.to_vec()
        );
        let highlighted: Vec<_> = cards.iter().filter(|c| c.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].kind, EmotionKind::Teasing);
        assert_eq!(highlighted[0].title, "Gentle Teasing");
    }

    #[test]
    fn test_letter_panel_defaults_to_romantic() {
        let content = Content::fallback();
        let state = state_named("Alex");
        match vault_panel(VaultId::Letters, &content, &state) {
            VaultPanel::Letter { title, body, .. } => {
                assert_eq!(title, "Soft Romantic");
                assert!(body.starts_with("My dearest Alex"));
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_surprise_panel_reports_scores() {
        let content = Content::fallback();
        let mut state = state_named("Alex");
        state.profile.apply_deltas(&[
            EmotionDelta::new(EmotionKind::Fantasy, 4),
            EmotionDelta::new(EmotionKind::Playful, 1),
        ]);

        match vault_panel(VaultId::Surprise, &content, &state) {
            VaultPanel::Surprise {
                description,
                love_score,
                breakdown,
                ..
            } => {
                assert_eq!(description, "a dreamer ✨");
                assert_eq!(love_score, 5);
                assert_eq!(breakdown.len(), 5);
                assert_eq!(breakdown[4], (EmotionKind::Fantasy, 4));
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_memories_panel_empty_without_answers() {
        let content = Content::fallback();
        let state = state_named("Alex");
        match vault_panel(VaultId::Memories, &content, &state) {
            VaultPanel::Memories { entries, caption } => {
                assert!(entries.is_empty());
                assert!(caption.ends_with("Alex."));
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_final_letter_without_answers() {
        let letter = final_letter(&state_named("Alex"));
        assert_eq!(letter.heading, "For You, Alex...");
        assert_eq!(letter.paragraphs.len(), 6);
        assert!(letter.paragraphs[0].contains("romantic energy"));
        assert!(letter.paragraphs[1].contains("\"something amazing\""));
    }
}

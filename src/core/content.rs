use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use super::emotion::{EmotionDelta, EmotionKind, MAX_WEIGHT};
use super::error::{GameError, Result};

/// Glyph used when a question carries no `imageEmoji`.
pub const DEFAULT_QUESTION_GLYPH: &str = "💭";
/// Glyph used when an option carries no `emoji`.
pub const DEFAULT_OPTION_GLYPH: &str = "💖";

/// The full content document shipped with the binary.
pub const BUNDLED_DOCUMENT: &str = include_str!("../../data/data.json");

// ---------------------------------------------------------------------------
// Wire document (the JSON content source, unvalidated)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDocument {
    pub loading: LoadingSection,
    pub questions: Vec<QuestionDoc>,
    pub results: ResultsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingSection {
    pub quotes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDoc {
    pub question: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flirty_quote: Option<String>,
    pub options: Vec<OptionDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDoc {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    pub reaction: String,
    #[serde(default)]
    pub emojis: Vec<String>,
    pub emotions: Vec<EmotionDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionDoc {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsSection {
    pub letters: Vec<LetterDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterDoc {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub emoji: String,
}

// ---------------------------------------------------------------------------
// Validated content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: String,
    pub category: String,
    pub glyph: String,
    pub flirty_quote: Option<String>,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub label: String,
    pub glyph: String,
    pub reaction: String,
    pub reaction_glyphs: Vec<String>,
    pub emotions: Vec<EmotionDelta>,
}

impl QuizOption {
    pub fn total_weight(&self) -> u32 {
        self.emotions.iter().map(|delta| delta.weight).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterTemplate {
    pub kind: EmotionKind,
    pub title: String,
    pub description: String,
    pub emoji: String,
}

/// A validated content document: quotes, questions and one letter per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    quotes: Vec<String>,
    questions: Vec<Question>,
    letters: Vec<LetterTemplate>,
}

impl Content {
    pub fn from_json(json: &str) -> Result<Self> {
        let document: ContentDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| GameError::ContentLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Load `path` if given, substituting the built-in document on any failure.
    pub fn load_or_fallback(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("no content path configured, using built-in content");
            return Self::fallback();
        };

        match Self::from_path(path) {
            Ok(content) => {
                debug!(
                    path = %path.display(),
                    questions = content.questions.len(),
                    "content loaded"
                );
                content
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "content unavailable, using built-in content");
                Self::fallback()
            }
        }
    }

    /// The shipped document, or the built-in fallback if it fails validation.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_DOCUMENT).unwrap_or_else(|e| {
            warn!(error = %e, "bundled content invalid, using built-in content");
            Self::fallback()
        })
    }

    /// Validate a wire document into typed content.
    pub fn from_document(document: ContentDocument) -> Result<Self> {
        if document.loading.quotes.is_empty() {
            return Err(GameError::InvalidContent("loading.quotes is empty".to_string()));
        }
        if document.questions.is_empty() {
            return Err(GameError::InvalidContent("questions is empty".to_string()));
        }

        let questions = document
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| validate_question(i, q))
            .collect::<Result<Vec<_>>>()?;

        let mut letters: Vec<Option<LetterTemplate>> = vec![None; EmotionKind::ALL.len()];
        for letter in document.results.letters {
            let kind: EmotionKind = letter.kind.parse()?;
            let slot = &mut letters[kind.index()];
            if slot.is_some() {
                return Err(GameError::InvalidContent(format!("duplicate letter for {}", kind)));
            }
            *slot = Some(LetterTemplate {
                kind,
                title: letter.title,
                description: letter.description,
                emoji: letter.emoji,
            });
        }
        let letters = letters
            .into_iter()
            .zip(EmotionKind::ALL)
            .map(|(letter, kind)| {
                letter.ok_or_else(|| GameError::InvalidContent(format!("missing letter for {}", kind)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Content {
            quotes: document.loading.quotes,
            questions,
            letters,
        })
    }

    pub fn to_document(&self) -> ContentDocument {
        ContentDocument {
            loading: LoadingSection { quotes: self.quotes.clone() },
            questions: self
                .questions
                .iter()
                .map(|q| QuestionDoc {
                    question: q.prompt.clone(),
                    category: q.category.clone(),
                    image_emoji: Some(q.glyph.clone()),
                    flirty_quote: q.flirty_quote.clone(),
                    options: q
                        .options
                        .iter()
                        .map(|o| OptionDoc {
                            text: o.label.clone(),
                            emoji: Some(o.glyph.clone()),
                            reaction: o.reaction.clone(),
                            emojis: o.reaction_glyphs.clone(),
                            emotions: o
                                .emotions
                                .iter()
                                .map(|d| EmotionDoc {
                                    kind: d.kind.to_string(),
                                    value: i64::from(d.weight),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
            results: ResultsSection {
                letters: self
                    .letters
                    .iter()
                    .map(|l| LetterDoc {
                        kind: l.kind.to_string(),
                        title: l.title.clone(),
                        description: l.description.clone(),
                        emoji: l.emoji.clone(),
                    })
                    .collect(),
            },
        }
    }

    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Letter templates in enumeration order.
    pub fn letters(&self) -> &[LetterTemplate] {
        &self.letters
    }

    pub fn letter(&self, kind: EmotionKind) -> &LetterTemplate {
        &self.letters[kind.index()]
    }

    /// The built-in document used when no content source is usable.
    pub fn fallback() -> Self {
        let quotes = [
            "Convincing Kagura to share her magic...",
            "Negotiating with Kadita for emotional backup...",
            "Borrowing stardust from Novaria's galaxy...",
            "Loading romantic courage... please don't unplug me.",
            "Preparing premium-grade pick-up lines...",
            "Charging heart emojis to maximum capacity...",
            "Warming up the blushing algorithms...",
            "Downloading moonlight for romantic ambiance...",
            "Calibrating cuteness overload protection...",
            "Training butterflies for your stomach...",
            "Buffering shy glances and nervous smiles...",
            "Installing vulnerability.exe...",
            "Loading heartfelt confessions...",
            "Synchronizing heartbeats...",
            "Preparing emotional defenses... just in case.",
            "Loading stolen glances and secret smiles...",
            "Charging romantic tension to 100%...",
            "Preparing the perfect moment...",
            "Loading inside jokes that aren't inside yet...",
            "Finalizing the ability to make you smile...",
        ];

        let hoodie = Question {
            prompt: "If I accidentally stole your hoodie, what would you do?".to_string(),
            category: "Cute Scenarios".to_string(),
            glyph: "👕".to_string(),
            flirty_quote: Some(
                "Asking for a friend... who might want your scent nearby.".to_string(),
            ),
            options: vec![
                option(
                    "Steal something of mine back",
                    "😏",
                    "Ooh, competitive! I like that energy.",
                    &["😏", "⚔️", "💫"],
                    &[(EmotionKind::Playful, 3), (EmotionKind::Teasing, 2)],
                ),
                option(
                    "Pretend you didn't notice",
                    "😌",
                    "Smooth operator, huh? Noted.",
                    &["😌", "🎭", "✨"],
                    &[(EmotionKind::Romantic, 2), (EmotionKind::Emotional, 1)],
                ),
                option(
                    "Ask for it back politely",
                    "🥺",
                    "So respectful! But what if I want to keep it?",
                    &["🥺", "🙏", "💖"],
                    &[(EmotionKind::Emotional, 3), (EmotionKind::Romantic, 1)],
                ),
                option(
                    "Say you look cute in it",
                    "💘",
                    "DIRECT HIT! My heart wasn't ready for that.",
                    &["💘", "🎯", "🌟"],
                    &[(EmotionKind::Romantic, 4), (EmotionKind::Playful, 2)],
                ),
            ],
        };

        let letters = vec![
            letter(
                EmotionKind::Romantic,
                "Soft Romantic",
                "Gentle, heartfelt confessions that come straight from the heart",
                "💕",
            ),
            letter(
                EmotionKind::Playful,
                "Playful Flirty",
                "Lighthearted fun with just the right amount of charm",
                "😉",
            ),
            letter(
                EmotionKind::Teasing,
                "Gentle Teasing",
                "Witty banter with a side of affectionate roasting",
                "😏",
            ),
            letter(
                EmotionKind::Emotional,
                "Deep Emotional",
                "Raw, sincere feelings laid bare",
                "🥺",
            ),
            letter(
                EmotionKind::Fantasy,
                "Poetic Fantasy",
                "Dreamy, imaginative confessions from another realm",
                "✨",
            ),
        ];

        Content {
            quotes: quotes.iter().map(|q| q.to_string()).collect(),
            questions: vec![hoodie],
            letters,
        }
    }
}

fn validate_question(index: usize, doc: QuestionDoc) -> Result<Question> {
    if doc.options.is_empty() {
        return Err(GameError::InvalidContent(format!(
            "question {} has no options",
            index + 1
        )));
    }

    let options = doc
        .options
        .into_iter()
        .map(|o| {
            let emotions = o
                .emotions
                .iter()
                .map(|e| {
                    let kind: EmotionKind = e.kind.parse()?;
                    let weight = u32::try_from(e.value)
                        .ok()
                        .filter(|w| *w <= MAX_WEIGHT)
                        .ok_or_else(|| GameError::InvalidWeight {
                            kind: e.kind.clone(),
                            weight: e.value,
                        })?;
                    Ok(EmotionDelta::new(kind, weight))
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(QuizOption {
                label: o.text,
                glyph: o.emoji.unwrap_or_else(|| DEFAULT_OPTION_GLYPH.to_string()),
                reaction: o.reaction,
                reaction_glyphs: o.emojis,
                emotions,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Question {
        prompt: doc.question,
        category: doc.category,
        glyph: doc.image_emoji.unwrap_or_else(|| DEFAULT_QUESTION_GLYPH.to_string()),
        flirty_quote: doc.flirty_quote,
        options,
    })
}

fn option(
    label: &str,
    glyph: &str,
    reaction: &str,
    reaction_glyphs: &[&str],
    emotions: &[(EmotionKind, u32)],
) -> QuizOption {
    QuizOption {
        label: label.to_string(),
        glyph: glyph.to_string(),
        reaction: reaction.to_string(),
        reaction_glyphs: reaction_glyphs.iter().map(|g| g.to_string()).collect(),
        emotions: emotions
            .iter()
            .map(|(kind, weight)| EmotionDelta::new(*kind, *weight))
            .collect(),
    }
}

fn letter(kind: EmotionKind, title: &str, description: &str, emoji: &str) -> LetterTemplate {
    LetterTemplate {
        kind,
        title: title.to_string(),
        description: description.to_string(),
        emoji: emoji.to_string(),
    }
}

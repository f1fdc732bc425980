use colored::*;
use std::io::Write;

use crate::core::content::Question;
use crate::core::emotion::{EmotionKind, EmotionProfile};
use crate::core::refusal::{EscalationVisual, RefusalState, MAX_REFUSALS};
use crate::core::scene::{RenderSink, SceneView};
use crate::core::vault::VaultId;
use crate::letters::{FinalLetter, LetterCard, VaultPanel};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const FORCED_YES: &str = "YOU HAVE NO CHOICE! Just Say Yes";

/// Game-style text for every scene.
pub struct GameFormatter;

impl GameFormatter {
    pub fn format_view(view: &SceneView) -> String {
        match view {
            SceneView::Loading {
                quote,
                presented,
                total,
                skip_available,
            } => Self::format_loading(quote.as_deref(), *presented, *total, *skip_available),
            SceneView::NameEntry { saved_name } => Self::format_name_entry(saved_name.as_deref()),
            SceneView::Disclaimer { name } => Self::format_disclaimer(name),
            SceneView::Question {
                number,
                total,
                question,
                pending,
            } => Self::format_question(*number, *total, question, *pending),
            SceneView::Results {
                name,
                profile,
                dominant,
            } => Self::format_results(name, profile, *dominant),
            SceneView::LetterSelect { name, cards } => Self::format_letter_select(name, cards),
            SceneView::Proposal {
                name,
                state,
                taunt,
                visual,
            } => Self::format_proposal(name, *state, *taunt, *visual),
            SceneView::Vault { unlocked, opened } => Self::format_vault(unlocked, opened.as_ref()),
            SceneView::Final { letter } => Self::format_final(letter),
        }
    }

    pub fn format_loading(
        quote: Option<&str>,
        presented: usize,
        total: usize,
        skip_available: bool,
    ) -> String {
        let progress = if total == 0 { 100 } else { presented * 100 / total };
        let skip = if skip_available {
            "\n⏩ [s] skip the intro"
        } else {
            ""
        };

        format!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║                    💖 HEARTS.EXE LOADING 💖                  ║
╚══════════════════════════════════════════════════════════════╝

   {}

{} {}/{}{}
"#,
            quote.unwrap_or("..."),
            Self::format_bar(progress as u32, 100),
            presented,
            total,
            skip,
        )
    }

    pub fn format_name_entry(saved_name: Option<&str>) -> String {
        let hint = match saved_name {
            Some(name) => format!("(press enter to keep \"{}\")", name),
            None => "(type your name and press enter)".to_string(),
        };

        format!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║                  ✍️  WHAT SHOULD I CALL YOU?                  ║
╚══════════════════════════════════════════════════════════════╝

{}
"#,
            hint
        )
    }

    pub fn format_disclaimer(name: &str) -> String {
        format!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║                       ⚠️  DISCLAIMER ⚠️                        ║
╚══════════════════════════════════════════════════════════════╝

Hi {}! What follows is a playful little Valentine story.
Answer honestly, blush freely, and do not take anything too seriously.

💌 [y] I understand, let's go
"#,
            name.bold()
        )
    }

    pub fn format_question(
        number: usize,
        total: usize,
        question: &Question,
        pending: Option<usize>,
    ) -> String {
        let mut result = format!(
            "\n{} Question {}/{} · {}\n{}\n\n{}\n",
            question.glyph,
            number,
            total,
            question.category.magenta(),
            RULE,
            question.prompt.bold(),
        );

        if let Some(quote) = &question.flirty_quote {
            result.push_str(&format!("   \"{}\"\n", quote.italic()));
        }
        result.push('\n');

        for (i, option) in question.options.iter().enumerate() {
            let marker = if pending == Some(i) { "▶" } else { " " };
            result.push_str(&format!("{} [{}] {} {}\n", marker, i + 1, option.glyph, option.label));
        }

        if let Some(option) = pending.and_then(|i| question.options.get(i)) {
            result.push_str(&format!(
                "\n{}  {}\n\n➡️  [n] next\n",
                option.reaction_glyphs.join(" "),
                option.reaction.cyan()
            ));
        }

        result.push_str(RULE);
        result.push('\n');
        result
    }

    pub fn format_results(name: &str, profile: &EmotionProfile, dominant: EmotionKind) -> String {
        let max = profile.iter().map(|(_, score)| score).max().unwrap_or(0).max(1);
        let mut breakdown = String::new();
        for (kind, score) in profile.iter() {
            breakdown.push_str(&format!(
                "{} {:<10} {}\n",
                kind.emoji(),
                kind.label(),
                Self::format_bar(score, max)
            ));
        }

        format!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║                    💘 YOUR HEART PROFILE                     ║
╚══════════════════════════════════════════════════════════════╝

{}, you are {}

{}
{}{}

➡️  [c] continue
"#,
            name,
            dominant.description(),
            RULE,
            breakdown,
            RULE,
        )
    }

    pub fn format_letter_select(name: &str, cards: &[LetterCard]) -> String {
        let mut result = format!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║                    💌 CHOOSE YOUR LETTER                     ║
╚══════════════════════════════════════════════════════════════╝

{}, which letter would you like to open?

"#,
            name
        );

        for (i, card) in cards.iter().enumerate() {
            let title = if card.highlighted {
                format!("{} ⭐", card.title).yellow().bold().to_string()
            } else {
                card.title.clone()
            };
            result.push_str(&format!(
                "[{}] {} {}\n    {}\n    {}\n\n",
                i + 1,
                card.emoji,
                title,
                card.description,
                Self::truncate(&card.preview, 60).dimmed()
            ));
        }

        result.push_str(RULE);
        result.push('\n');
        result
    }

    pub fn format_proposal(
        name: &str,
        state: RefusalState,
        taunt: Option<&str>,
        visual: EscalationVisual,
    ) -> String {
        let forced = state == RefusalState::Forced;
        let mut result = format!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║                 🌹 WILL YOU BE MY VALENTINE? 🌹               ║
╚══════════════════════════════════════════════════════════════╝

{}, I have one question left...
"#,
            name
        );

        if forced {
            result.push_str(&format!(
                "\n{}\n{}\n{}\n",
                "💀 SYSTEM OVERRIDE INITIATED 💀".red().bold(),
                "You thought you could say NO? Now you don't have a choice!".red(),
                "User choice has been overridden. Proceeding with YES selection...".dimmed(),
            ));
        }
        if let Some(taunt) = taunt {
            result.push_str(&format!("\n😈 {}\n", taunt.red()));
        }

        let yes = if forced { FORCED_YES } else { "YES" };
        result.push_str(&format!("\n💖 [y] {}  (×{:.2})\n", yes.green().bold(), visual.yes_scale));
        if !forced {
            result.push_str(&format!("💔 [n] no   (×{:.2})\n", visual.no_scale));
        }

        if let RefusalState::Escalating(n) = state {
            result.push_str(&format!("\n{}\n", Self::format_bar((n * 10) as u32, (MAX_REFUSALS * 10) as u32)));
        }
        result
    }

    pub fn format_vault(unlocked: &[VaultId], opened: Option<&(VaultId, VaultPanel)>) -> String {
        let mut result = format!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║                    🔐 THE MEMORY VAULT                       ║
╚══════════════════════════════════════════════════════════════╝

Unlocked {}/{}

"#,
            unlocked.len(),
            VaultId::ALL.len()
        );

        for (i, id) in VaultId::ALL.iter().enumerate() {
            let lock = if unlocked.contains(id) { "🔓" } else { "🔒" };
            result.push_str(&format!("{} [{}] {} {}\n", lock, i + 1, id.emoji(), id.title()));
        }

        if let Some((id, panel)) = opened {
            result.push_str(&format!("\n{}\n{} {}\n{}\n", RULE, id.emoji(), id.title().bold(), RULE));
            result.push_str(&Self::format_panel(panel));
        }
        result
    }

    pub fn format_panel(panel: &VaultPanel) -> String {
        match panel {
            VaultPanel::Gallery { tiles, caption } => {
                format!("{}\n\n{}\n", tiles.join("  "), caption)
            }
            VaultPanel::Memories { entries, caption } => {
                let mut result = String::new();
                if entries.is_empty() {
                    result.push_str("(no memories yet)\n");
                }
                for (question, answer) in entries {
                    result.push_str(&format!("❓ {}\n💬 {}\n\n", question, answer.cyan()));
                }
                result.push_str(caption);
                result.push('\n');
                result
            }
            VaultPanel::Letter {
                title,
                body,
                closing,
                signature,
            } => format!("{}\n\n{}\n\n{}\n{}\n", title.bold(), body, closing, signature),
            VaultPanel::Surprise {
                headline,
                description,
                love_score,
                breakdown,
                blessing,
            } => {
                let mut result = format!(
                    "🎉 {}\n\nYou are {}\n💯 Love score: {}/100\n\n",
                    headline, description, love_score
                );
                for (kind, score) in breakdown {
                    result.push_str(&format!("{} {}: {}\n", kind.emoji(), kind.label(), score));
                }
                result.push_str(&format!("\n✨ {}\n", blessing));
                result
            }
        }
    }

    pub fn format_final(letter: &FinalLetter) -> String {
        let mut result = format!(
            r#"
╔══════════════════════════════════════════════════════════════╗
║                        💝 FINAL LETTER                       ║
╚══════════════════════════════════════════════════════════════╝

{}

"#,
            letter.heading.bold()
        );
        for paragraph in &letter.paragraphs {
            result.push_str(paragraph);
            result.push_str("\n\n");
        }
        result.push_str(&format!(
            "{}\n{}\n\n{}\n📤 [s] share   🔁 [r] restart   🚪 [q] quit\n",
            letter.closing, letter.signature, RULE
        ));
        result
    }

    fn format_bar(value: u32, max: u32) -> String {
        let percentage = if max == 0 {
            0
        } else {
            (u64::from(value) * 100 / u64::from(max)).min(100) as u32
        };
        let filled = (percentage / 10) as usize;
        let empty = 10 - filled;

        format!("[{}{}] {}%", "█".repeat(filled), "░".repeat(empty), percentage)
    }

    fn truncate(s: &str, max_len: usize) -> String {
        if s.chars().count() <= max_len {
            s.to_string()
        } else {
            let truncated: String = s.chars().take(max_len).collect();
            format!("{}...", truncated)
        }
    }
}

/// Prints every view to stdout.
pub struct TerminalRenderer {
    clear_screen: bool,
}

impl TerminalRenderer {
    pub fn new(clear_screen: bool) -> Self {
        Self { clear_screen }
    }
}

impl RenderSink for TerminalRenderer {
    fn render(&mut self, view: &SceneView) {
        let mut stdout = std::io::stdout().lock();
        if self.clear_screen {
            let _ = write!(stdout, "\x1b[2J\x1b[H");
        }
        let _ = writeln!(stdout, "{}", GameFormatter::format_view(view));
        let _ = stdout.flush();
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message.yellow());
    }
}

/// Keeps rendered text and notices, newest last.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<String>,
    pub notices: Vec<String>,
}

impl RenderSink for RecordingRenderer {
    fn render(&mut self, view: &SceneView) {
        self.frames.push(GameFormatter::format_view(view));
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

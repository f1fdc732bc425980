use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

use hearts::config::Config;
use hearts::core::content::Content;
use hearts::core::scene::SceneController;
use hearts::core::store::{FileNameSlot, NameSlot};
use hearts::feedback::TerminalFeedback;
use hearts::game_formatter::TerminalRenderer;
use hearts::session::{self, Session};
use hearts::share::{CommandClipboard, NoNativeShare};

pub use commands::{Args, Commands, NameCommands};

mod commands;

pub async fn handle_play(
    data_dir: Option<PathBuf>,
    content: Option<PathBuf>,
    fast: bool,
    no_clear: bool,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = Config::new(data_dir)?;
    config.apply_play_flags(fast, no_clear);

    let content = match content.or_else(|| config.content_source()) {
        Some(path) => Content::load_or_fallback(Some(&path)),
        None => Content::bundled(),
    };

    let names = FileNameSlot::new(config.profile_file());
    let mut controller = SceneController::new(
        content,
        config.pacing.scene_pacing(),
        session::saved_name(&names),
    );
    if let Some(seed) = seed {
        controller = controller.with_seed(seed);
    }

    let mut session = Session::new(
        controller,
        TerminalRenderer::new(config.clear_screen),
        TerminalFeedback::new(config.sound),
        names,
    )
    .with_transition(config.pacing.transition())
    .with_share(
        Box::new(NoNativeShare),
        Box::new(CommandClipboard::default()),
        config.share_file(),
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let summary = session.run(stdin).await?;

    println!("{}", "💖 Thanks for playing Hearts.exe".magenta().bold());
    tracing::debug!(?summary, "session summary");
    Ok(())
}

pub async fn handle_validate(path: &Path) -> Result<()> {
    let content = Content::from_path(path)
        .with_context(|| format!("Invalid content document: {}", path.display()))?;

    println!("{} {}", "✅ Valid content document:".green(), path.display());
    println!("   💬 quotes:    {}", content.quotes().len());
    println!("   ❓ questions: {}", content.questions().len());
    println!(
        "   🔘 options:   {}",
        content.questions().iter().map(|q| q.options.len()).sum::<usize>()
    );
    println!("   💌 letters:   {}", content.letters().len());
    Ok(())
}

pub async fn handle_content(fallback: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let content = if fallback {
        Content::fallback()
    } else {
        let config = Config::new(data_dir)?;
        match config.content_source() {
            Some(path) => Content::load_or_fallback(Some(&path)),
            None => Content::bundled(),
        }
    };

    let json = serde_json::to_string_pretty(&content.to_document())
        .context("Failed to serialize content")?;
    println!("{}", json);
    Ok(())
}

pub async fn handle_name(command: NameCommands, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut names = FileNameSlot::new(config.profile_file());

    match command {
        NameCommands::Show => match names.load()? {
            Some(name) => println!("💖 Stored name: {}", name.bold()),
            None => println!("No name stored yet."),
        },
        NameCommands::Clear => {
            names.clear()?;
            println!("🧹 Stored name cleared.");
        }
    }
    Ok(())
}

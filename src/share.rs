use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::core::error::Result;

pub const SHARE_TITLE: &str = "Hearts.exe - A Playful Valentine Story";
pub const SHARE_TEXT: &str =
    "Just experienced the most adorable Valentine's game! 💖 Try Hearts.exe and see if it makes you blush!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

impl Default for SharePayload {
    fn default() -> Self {
        SharePayload {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
        }
    }
}

impl SharePayload {
    pub fn to_plain_text(&self) -> String {
        format!("{}\n{}", self.title, self.text)
    }
}

/// A platform share target. `Ok(false)` means the target is not available.
pub trait ShareSink {
    fn share(&mut self, payload: &SharePayload) -> Result<bool>;
}

pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<bool>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareResult {
    Shared,
    Copied,
    Exported(PathBuf),
    Failed(String),
}

impl ShareResult {
    pub fn message(&self) -> String {
        match self {
            ShareResult::Shared => "💖 Shared!".to_string(),
            ShareResult::Copied => "📋 Copied to clipboard!".to_string(),
            ShareResult::Exported(path) => format!("📄 Saved to {}", path.display()),
            ShareResult::Failed(reason) => format!("❌ Could not share: {}", reason),
        }
    }
}

/// No native share on a terminal.
#[derive(Debug, Default)]
pub struct NoNativeShare;

impl ShareSink for NoNativeShare {
    fn share(&mut self, _payload: &SharePayload) -> Result<bool> {
        Ok(false)
    }
}

/// Pipes text into the first system clipboard tool that runs successfully.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    candidates: Vec<(String, Vec<String>)>,
}

impl Default for CommandClipboard {
    fn default() -> Self {
        let candidates = if cfg!(target_os = "macos") {
            vec![candidate("pbcopy", &[])]
        } else if cfg!(target_os = "windows") {
            vec![candidate("clip", &[])]
        } else {
            vec![
                candidate("wl-copy", &[]),
                candidate("xclip", &["-selection", "clipboard"]),
                candidate("xsel", &["--clipboard", "--input"]),
            ]
        };
        CommandClipboard { candidates }
    }
}

fn candidate(program: &str, args: &[&str]) -> (String, Vec<String>) {
    (program.to_string(), args.iter().map(|a| a.to_string()).collect())
}

impl CommandClipboard {
    pub fn with_candidates(candidates: Vec<(String, Vec<String>)>) -> Self {
        CommandClipboard { candidates }
    }

    fn try_program(program: &str, args: &[String], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        // Reap the child even when the write failed.
        let status = child.wait()?;
        written?;
        Ok(status.success())
    }
}

impl ClipboardSink for CommandClipboard {
    fn copy(&mut self, text: &str) -> Result<bool> {
        for (program, args) in &self.candidates {
            match Self::try_program(program, args, text) {
                Ok(true) => {
                    debug!(program = %program, "copied to clipboard");
                    return Ok(true);
                }
                Ok(false) => debug!(program = %program, "clipboard tool exited unsuccessfully"),
                Err(e) => debug!(program = %program, error = %e, "clipboard tool unavailable"),
            }
        }
        Ok(false)
    }
}

/// Writes the payload to a file.
pub fn export_to_file(payload: &SharePayload, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, payload.to_plain_text())?;
    Ok(())
}

/// Native share, then clipboard, then file export.
pub fn share_or_copy(
    payload: &SharePayload,
    native: &mut dyn ShareSink,
    clipboard: &mut dyn ClipboardSink,
    export_path: &Path,
) -> ShareResult {
    match native.share(payload) {
        Ok(true) => return ShareResult::Shared,
        Ok(false) => {}
        Err(e) => warn!(error = %e, "native share failed"),
    }

    match clipboard.copy(&payload.to_plain_text()) {
        Ok(true) => return ShareResult::Copied,
        Ok(false) => {}
        Err(e) => warn!(error = %e, "clipboard copy failed"),
    }

    match export_to_file(payload, export_path) {
        Ok(()) => ShareResult::Exported(export_path.to_path_buf()),
        Err(e) => {
            warn!(error = %e, path = %export_path.display(), "share export failed");
            ShareResult::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GameError;

    struct Native(Result<bool>);

    impl ShareSink for Native {
        fn share(&mut self, _payload: &SharePayload) -> Result<bool> {
            match &self.0 {
                Ok(v) => Ok(*v),
                Err(_) => Err(GameError::Config("boom".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct Clipboard {
        available: bool,
        copied: Option<String>,
    }

    impl ClipboardSink for Clipboard {
        fn copy(&mut self, text: &str) -> Result<bool> {
            if self.available {
                self.copied = Some(text.to_string());
            }
            Ok(self.available)
        }
    }

    #[test]
    fn test_native_share_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut clipboard = Clipboard { available: true, ..Default::default() };
        let result = share_or_copy(
            &SharePayload::default(),
            &mut Native(Ok(true)),
            &mut clipboard,
            &dir.path().join("share.txt"),
        );
        assert_eq!(result, ShareResult::Shared);
        assert_eq!(clipboard.copied, None);
    }

    #[test]
    fn test_falls_back_to_clipboard() {
        let dir = tempfile::tempdir().unwrap();
        let mut clipboard = Clipboard { available: true, ..Default::default() };
        let result = share_or_copy(
            &SharePayload::default(),
            &mut Native(Err(GameError::Config("no".to_string()))),
            &mut clipboard,
            &dir.path().join("share.txt"),
        );
        assert_eq!(result, ShareResult::Copied);
        assert!(clipboard.copied.unwrap().contains("Try Hearts.exe"));
    }

    #[test]
    fn test_falls_back_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("share.txt");
        let result = share_or_copy(
            &SharePayload::default(),
            &mut NoNativeShare,
            &mut Clipboard::default(),
            &path,
        );
        assert_eq!(result, ShareResult::Exported(path.clone()));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with(SHARE_TITLE));
    }

    #[test]
    fn test_missing_clipboard_tool_is_not_an_error() {
        let mut clipboard = CommandClipboard::with_candidates(vec![(
            "hearts-no-such-clipboard-tool".to_string(),
            Vec::new(),
        )]);
        assert!(!clipboard.copy("hi").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_that_closes_stdin_is_waited_on() {
        // `true` exits without reading, so a large write hits a closed pipe.
        let text = "💖".repeat(256 * 1024);
        let err = CommandClipboard::try_program("true", &[], &text).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);

        let mut clipboard = CommandClipboard::with_candidates(vec![
            candidate("true", &[]),
            candidate("sh", &["-c", "cat > /dev/null"]),
        ]);
        assert!(clipboard.copy(&text).unwrap());
    }
}

//! System clipboard through the platform's copy command.
//! - macOS: pbcopy
//! - Linux: xclip, falling back to xsel
//! - Windows: clip.exe

use std::io::Write;
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::application::detail::{Clipboard, ClipboardError};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let (name, child) = spawn_copy_command()?;
        debug!(command = name, "copying to clipboard");
        feed(name, child, text)
    }
}

#[cfg(target_os = "macos")]
fn spawn_copy_command() -> Result<(&'static str, Child), ClipboardError> {
    spawn("pbcopy", &[]).map(|child| ("pbcopy", child))
}

#[cfg(target_os = "linux")]
fn spawn_copy_command() -> Result<(&'static str, Child), ClipboardError> {
    match spawn("xclip", &["-selection", "clipboard"]) {
        Ok(child) => Ok(("xclip", child)),
        Err(_) => spawn("xsel", &["--clipboard", "--input"])
            .map(|child| ("xsel", child))
            .map_err(|err| ClipboardError(format!("{}. Install xclip or xsel.", err.0))),
    }
}

#[cfg(target_os = "windows")]
fn spawn_copy_command() -> Result<(&'static str, Child), ClipboardError> {
    spawn("clip", &[]).map(|child| ("clip", child))
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn spawn_copy_command() -> Result<(&'static str, Child), ClipboardError> {
    Err(ClipboardError(
        "clipboard not supported on this platform".to_string(),
    ))
}

#[allow(dead_code)]
fn spawn(program: &str, args: &[&str]) -> Result<Child, ClipboardError> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|err| ClipboardError(format!("failed to spawn {program}: {err}")))
}

fn feed(name: &str, mut child: Child, text: &str) -> Result<(), ClipboardError> {
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|err| ClipboardError(format!("failed to write to {name}: {err}")))?;
    }
    let status = child
        .wait()
        .map_err(|err| ClipboardError(format!("failed to wait for {name}: {err}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError(format!("{name} exited with {status}")))
    }
}

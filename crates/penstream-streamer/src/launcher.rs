//! Streaming session launcher.
//!
//! Starts the external streaming engine in an interactive, user-visible
//! terminal session: `<interpreter> "<script>" "<gcode>" "<port>"` behind
//! a fixed title and banner. The session is fire-and-forget; the core
//! never joins the process or learns how the plot ended. Closing the
//! window is the operator's cancellation mechanism, so the window is left
//! open after the engine exits rather than auto-closing.

use penstream_core::constants::SESSION_TITLE;
use penstream_core::{DeviceHandle, PlotError, Result};
use std::path::Path;
use std::process::Command;

/// Starts the supervised streaming session.
pub trait SessionLauncher {
    /// Start the streaming engine against `artifact` on `device`, showing
    /// `banner` at the top of the session. Success means the session
    /// process started; everything after that belongs to the operator.
    fn launch(
        &self,
        interpreter: &Path,
        script: &Path,
        artifact: &Path,
        device: &DeviceHandle,
        banner: &[&str],
    ) -> Result<()>;
}

/// Launcher that opens a host terminal window.
#[derive(Debug, Default)]
pub struct TerminalSessionLauncher;

impl TerminalSessionLauncher {
    /// Create a launcher.
    pub fn new() -> Self {
        Self
    }
}

impl SessionLauncher for TerminalSessionLauncher {
    fn launch(
        &self,
        interpreter: &Path,
        script: &Path,
        artifact: &Path,
        device: &DeviceHandle,
        banner: &[&str],
    ) -> Result<()> {
        let mut command = session_command(interpreter, script, artifact, device, banner);

        match command.spawn() {
            Ok(child) => {
                // Fire and forget: the child is never awaited.
                tracing::info!(
                    "Streaming session started (pid {}) on {}",
                    child.id(),
                    device.port_name
                );
                Ok(())
            }
            Err(e) => Err(PlotError::Launch {
                reason: e.to_string(),
            }),
        }
    }
}

/// Compose the terminal session for Windows: `cmd.exe /K` keeps the
/// window open after the engine exits.
#[cfg(target_os = "windows")]
fn session_command(
    interpreter: &Path,
    script: &Path,
    artifact: &Path,
    device: &DeviceHandle,
    banner: &[&str],
) -> Command {
    let banner_echo = banner
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                "echo.".to_string()
            } else {
                format!("echo {}", escape_for_cmd(line))
            }
        })
        .collect::<Vec<_>>()
        .join(" && ");

    let engine = format!(
        "{} \"{}\" \"{}\" \"{}\"",
        interpreter.display(),
        script.display(),
        artifact.display(),
        device.port_name
    );

    let mut command = Command::new("cmd.exe");
    command.arg("/K").arg(format!(
        "title {} && {} && {}",
        SESSION_TITLE, banner_echo, engine
    ));
    command
}

/// Compose the terminal session for macOS via Terminal.app, which leaves
/// the window open after the command exits.
#[cfg(target_os = "macos")]
fn session_command(
    interpreter: &Path,
    script: &Path,
    artifact: &Path,
    device: &DeviceHandle,
    banner: &[&str],
) -> Command {
    let session_script = posix_session_script(interpreter, script, artifact, device, banner);

    let mut command = Command::new("osascript");
    command.arg("-e").arg(format!(
        "tell application \"Terminal\" to do script \"{}\"",
        session_script.replace('\\', "\\\\").replace('"', "\\\"")
    ));
    command
}

/// Compose the terminal session for other hosts through the Debian
/// `x-terminal-emulator` alternative; the trailing shell keeps the window
/// open after the engine exits.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn session_command(
    interpreter: &Path,
    script: &Path,
    artifact: &Path,
    device: &DeviceHandle,
    banner: &[&str],
) -> Command {
    let session_script = posix_session_script(interpreter, script, artifact, device, banner);

    let mut command = Command::new("x-terminal-emulator");
    command
        .arg("-T")
        .arg(SESSION_TITLE)
        .arg("-e")
        .arg("sh")
        .arg("-c")
        .arg(format!("{}; exec ${{SHELL:-sh}}", session_script));
    command
}

/// Banner echoes followed by the engine invocation, as one `sh` command
/// line with every operand single-quoted.
#[cfg(not(target_os = "windows"))]
fn posix_session_script(
    interpreter: &Path,
    script: &Path,
    artifact: &Path,
    device: &DeviceHandle,
    banner: &[&str],
) -> String {
    let mut lines: Vec<String> = banner
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                "echo".to_string()
            } else {
                format!("echo {}", shell_quote(line))
            }
        })
        .collect();

    lines.push(format!(
        "{} {} {} {}",
        shell_quote(&interpreter.to_string_lossy()),
        shell_quote(&script.to_string_lossy()),
        shell_quote(&artifact.to_string_lossy()),
        shell_quote(&device.port_name)
    ));

    lines.join(" && ")
}

/// Quote one word for `sh`: redirects, pipes, and command chaining inside
/// the text must all reach the terminal as literal banner characters.
#[cfg(not(target_os = "windows"))]
fn shell_quote(input: &str) -> String {
    format!("'{}'", input.replace('\'', r"'\''"))
}

/// Neutralize cmd.exe metacharacters that would redirect, pipe, or chain
/// inside a banner line.
#[cfg(target_os = "windows")]
fn escape_for_cmd(input: &str) -> String {
    input
        .replace('&', "^&")
        .replace('|', "^|")
        .replace('>', "^>")
        .replace('<', "^<")
}

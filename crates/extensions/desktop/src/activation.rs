//! Window activation through the platform's scripting facility.
//!
//! - Windows: PowerShell `WScript.Shell.AppActivate`
//! - macOS: `osascript` talking to System Events
//! - Linux: `wmctrl -F -a`
//!
//! Other targets report [`ActivationOutcome::Unsupported`].
//!
//! The frontmost window is read with `GetForegroundWindow` (Windows),
//! System Events (macOS) or `xdotool getactivewindow` (Linux).

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use formbridge_protocols::{ActivationError, ActivationOutcome, WindowActivator};

/// A command line that activates one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActivationCommand {
    pub program: &'static str,
    pub args: Vec<String>,
}

/// [`WindowActivator`] that shells out to the OS scripting tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptActivator;

impl ScriptActivator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl WindowActivator for ScriptActivator {
    async fn activate(&self, title: &str) -> Result<ActivationOutcome, ActivationError> {
        let Some(command) = activation_command(title) else {
            return Ok(ActivationOutcome::Unsupported);
        };

        debug!("Activating {:?} via {}", title, command.program);
        let output = Command::new(command.program)
            .args(&command.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ActivationError::CommandFailed(format!("{}: {}", command.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ActivationError::NotActivated(if stderr.is_empty() {
                format!("{} exited with {}", command.program, output.status)
            } else {
                stderr
            }));
        }

        // AppActivate prints False when no window matched.
        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().eq_ignore_ascii_case("false") {
            return Err(ActivationError::NotActivated(format!(
                "no window titled {:?}",
                title
            )));
        }

        Ok(ActivationOutcome::Activated)
    }

    async fn frontmost(&self) -> Result<Option<String>, ActivationError> {
        let Some(command) = frontmost_command() else {
            return Ok(None);
        };

        let output = Command::new(command.program)
            .args(&command.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ActivationError::CommandFailed(format!("{}: {}", command.program, e)))?;

        if !output.status.success() {
            return Err(ActivationError::CommandFailed(format!(
                "{} exited with {}",
                command.program, output.status
            )));
        }
        let title = parse_frontmost(&String::from_utf8_lossy(&output.stdout));
        debug!("Frontmost window: {:?}", title);
        Ok(title)
    }
}

/// Command for the current target, or `None` when activation is unsupported.
pub(crate) fn activation_command(title: &str) -> Option<ActivationCommand> {
    if cfg!(target_os = "windows") {
        Some(powershell_command(title))
    } else if cfg!(target_os = "macos") {
        Some(osascript_command(title))
    } else if cfg!(target_os = "linux") {
        Some(wmctrl_command(title))
    } else {
        None
    }
}

/// Command printing the frontmost window title, or `None` when unsupported.
pub(crate) fn frontmost_command() -> Option<ActivationCommand> {
    if cfg!(target_os = "windows") {
        Some(ActivationCommand {
            program: "powershell",
            args: vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                FOREGROUND_SCRIPT.to_string(),
            ],
        })
    } else if cfg!(target_os = "macos") {
        Some(ActivationCommand {
            program: "osascript",
            args: vec![
                "-e".to_string(),
                r#"tell application "System Events" to get name of front window of (first process whose frontmost is true)"#.to_string(),
            ],
        })
    } else if cfg!(target_os = "linux") {
        Some(ActivationCommand {
            program: "xdotool",
            args: vec!["getactivewindow".to_string(), "getwindowname".to_string()],
        })
    } else {
        None
    }
}

const FOREGROUND_SCRIPT: &str = r#"Add-Type @'
using System;
using System.Runtime.InteropServices;
using System.Text;
public static class Foreground {
    [DllImport("user32.dll")] public static extern IntPtr GetForegroundWindow();
    [DllImport("user32.dll", CharSet = CharSet.Unicode)] public static extern int GetWindowText(IntPtr hWnd, StringBuilder text, int count);
}
'@
$title = New-Object System.Text.StringBuilder 512
[void][Foreground]::GetWindowText([Foreground]::GetForegroundWindow(), $title, 512)
$title.ToString()"#;

/// First non-empty output line, trimmed.
pub(crate) fn parse_frontmost(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

pub(crate) fn powershell_command(title: &str) -> ActivationCommand {
    let script = format!(
        "(New-Object -ComObject WScript.Shell).AppActivate('{}')",
        escape_powershell(title)
    );
    ActivationCommand {
        program: "powershell",
        args: vec![
            "-NoProfile".to_string(),
            "-NonInteractive".to_string(),
            "-Command".to_string(),
            script,
        ],
    }
}

pub(crate) fn osascript_command(title: &str) -> ActivationCommand {
    let title = escape_applescript(title);
    let script = format!(
        r#"tell application "System Events"
    set targetProc to first process whose (exists (first window whose name is "{title}"))
    set frontmost of targetProc to true
    perform action "AXRaise" of (first window of targetProc whose name is "{title}")
end tell"#
    );
    ActivationCommand {
        program: "osascript",
        args: vec!["-e".to_string(), script],
    }
}

pub(crate) fn wmctrl_command(title: &str) -> ActivationCommand {
    ActivationCommand {
        program: "wmctrl",
        args: vec!["-F".to_string(), "-a".to_string(), title.to_string()],
    }
}

/// Single-quoted PowerShell literal: `'` doubles.
pub(crate) fn escape_powershell(title: &str) -> String {
    title.replace('\'', "''")
}

/// AppleScript string literal: escape backslash then double quote.
pub(crate) fn escape_applescript(title: &str) -> String {
    title.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "activation_tests.rs"]
mod tests;

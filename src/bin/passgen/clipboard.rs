use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::Context;

/// Copy `data` to the system clipboard by piping it to the platform's clipboard tool.
pub(crate) fn copy(data: &str) -> anyhow::Result<()> {
    let mut cmd = clipboard_cmd();
    let program = cmd.get_program().to_string_lossy().into_owned();
    let mut child = cmd
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to start `{}`", program))?;
    {
        let mut stdin = child
            .stdin
            .take()
            .with_context(|| format!("`{}` has no stdin", program))?;
        stdin
            .write_all(data.as_bytes())
            .with_context(|| format!("failed to write to `{}`", program))?;
    }
    let exit_status = child
        .wait()
        .with_context(|| format!("failed to wait for `{}` to finish", program))?;
    if exit_status.success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("`{}` exited with {}", program, exit_status))
    }
}

/// Copy, reporting (but otherwise ignoring) failure. Whatever was already printed stays valid.
pub(crate) fn copy_or_warn(data: &str) -> bool {
    match copy(data) {
        Ok(()) => {
            eprintln!("Copied to the clipboard.");
            true
        }
        Err(err) => {
            log::warn!("failed to copy to the clipboard: {:#}", err);
            false
        }
    }
}

#[cfg(target_os = "macos")]
fn clipboard_cmd() -> Command {
    Command::new("pbcopy")
}

#[cfg(not(target_os = "macos"))]
fn clipboard_cmd() -> Command {
    let mut cmd = Command::new("xsel");
    cmd.arg("-b");
    cmd
}

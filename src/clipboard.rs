use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{R50Error, Result};

#[derive(Debug, PartialEq, Eq)]
pub enum CopyStatus {
    Copied,
    /// The clipboard program is not installed.
    Unavailable(String),
}

/// Pipe `text` into the stdin of `command` (program followed by its args).
pub fn copy(command: &[String], text: &str) -> Result<CopyStatus> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| R50Error::Clipboard("no clipboard command configured".to_string()))?;
    debug!("Copying via {program} {args:?}");

    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Ok(CopyStatus::Unavailable(program.clone()))
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if !status.success() {
        return Err(R50Error::Clipboard(format!("{program} exited with {status}")));
    }
    Ok(CopyStatus::Copied)
}

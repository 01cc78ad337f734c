//! Opens links with the platform's URL handler.

use super::Browser;
use crate::error::BrowseError;
use std::process::{Command, Stdio};

#[derive(Debug, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(uri: &str) -> Option<Command> {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", uri]);
            Some(cmd)
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(uri);
            Some(cmd)
        } else if cfg!(unix) {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(uri);
            Some(cmd)
        } else {
            None
        }
    }
}

impl Browser for SystemBrowser {
    fn is_supported(&self) -> bool {
        cfg!(any(target_os = "windows", unix))
    }

    fn browse(&self, uri: &str) -> Result<(), BrowseError> {
        let mut cmd = Self::command(uri).ok_or(BrowseError::Unsupported)?;
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        log::info!("MENU: Opened {}", uri);
        Ok(())
    }
}

//! Best-effort browser launching for SSO login.

use std::io::Write;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::error;

use super::error::LoginError;
use super::transport::Transport;

/// Opens URLs in the user's browser.
pub trait Opener {
    fn open(&self, url: &str) -> Result<()>;
}

impl<T: Opener + ?Sized> Opener for &T {
    fn open(&self, url: &str) -> Result<()> {
        (**self).open(url)
    }
}

/// Spawns the platform's URL opener.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsOpener;

impl Opener for OsOpener {
    fn open(&self, url: &str) -> Result<()> {
        let mut command = platform_command(url);
        command
            .spawn()
            .with_context(|| format!("failed to launch a browser for {url}"))?;
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn platform_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn platform_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

/// Opens the browser at a provider's start flow URL and always prints the
/// link to `errout` so the user can follow it by hand. Neither a failed
/// launch nor a failed print aborts the login.
///
/// Root-relative URLs are resolved against the cluster first. Returns the
/// URL that was opened.
pub fn open_browser(
    transport: &dyn Transport,
    opener: &dyn Opener,
    errout: &mut dyn Write,
    start_flow_url: &str,
) -> Result<String, LoginError> {
    let url = if start_flow_url.starts_with('/') {
        transport.url(start_flow_url)?.to_string()
    } else {
        start_flow_url.to_string()
    };

    if let Err(e) = opener.open(&url) {
        error!("{e:#}");
    }
    if let Err(e) = write!(
        errout,
        "If your browser didn't open, please follow this link:\n\n    {url}\n\n"
    ) {
        error!("failed to print the login link: {e}");
    }
    Ok(url)
}

//! Opens article links in the system browser.
//!
//! The browser is started as a detached child with its stdio sent to null.
//! No handle to it is kept, and nothing it does can reach back into the app.

use std::io;
use std::process::{Command, Stdio};
use std::thread;

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("invalid link: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("refusing to open {0} link")]
    UnsupportedScheme(String),
    #[error("failed to launch browser: {0}")]
    Spawn(#[from] io::Error),
}

/// Only web links are handed to the system opener.
pub fn validate_link(raw: &str) -> Result<Url, OpenError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(OpenError::UnsupportedScheme(other.to_string())),
    }
}

pub fn open_detached(raw: &str) -> Result<(), OpenError> {
    let url = validate_link(raw)?;
    let mut child = opener_command(url.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // Reap in the background so the opener never lingers as a zombie.
    thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("rundll32");
    command.arg("url.dll,FileProtocolHandler").arg(url);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_links_are_accepted() {
        assert!(validate_link("https://news.example.com/a?b=c").is_ok());
        assert!(validate_link("http://news.example.com").is_ok());
    }

    #[test]
    fn other_schemes_are_refused() {
        assert!(matches!(
            validate_link("file:///etc/passwd"),
            Err(OpenError::UnsupportedScheme(scheme)) if scheme == "file"
        ));
        assert!(matches!(
            validate_link("javascript:alert(1)"),
            Err(OpenError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_link("not a link"),
            Err(OpenError::InvalidUrl(_))
        ));
    }
}

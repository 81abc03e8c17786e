use crate::domain::error::StoreError;
use crate::domain::traits::BrowserLauncher;
use std::io;

/// Opens URLs with the platform's default handler (`open`, `xdg-open`, ShellExecute).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowserLauncher;

impl BrowserLauncher for SystemBrowserLauncher {
    fn launch(&self, url: &str) -> Result<(), StoreError> {
        tracing::debug!(%url, "launching browser");
        open::that_detached(url).map_err(|e| launch_error(std::env::consts::OS, url, e))
    }
}

fn launch_error(os: &str, url: &str, err: io::Error) -> StoreError {
    match err.kind() {
        io::ErrorKind::Unsupported => StoreError::UnsupportedPlatform { os: os.to_string() },
        _ => StoreError::io(format!("opening the browser to {url}"), err),
    }
}

//! Seam over the browser automation toolchain
//!
//! The driver only ever talks to [`UiSession`] and [`UiElement`]; the
//! WebDriver-backed implementation lives in [`webdriver`]. Keeping the seam
//! narrow is what lets the retry and completion-poll logic be exercised
//! against a scripted fake in tests.

pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, warn};

use crate::locator::Locator;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("element not found: {0}")]
    NotFound(String),

    #[error("interaction failed: {0}")]
    Interaction(String),

    #[error("script execution failed: {0}")]
    Script(String),

    #[error("webdriver error: {0}")]
    Backend(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// A live browser session attached to the vendor control application.
///
/// Constructed externally and passed in explicitly; the driver never launches
/// or tears down the browser itself.
#[async_trait]
pub trait UiSession: Send + Sync {
    /// Look up an element from the document root. A non-matching locator is
    /// `SessionError::NotFound`, not a transport failure.
    async fn find(&self, locator: &Locator) -> SessionResult<Box<dyn UiElement>>;
}

/// Handle to a resolved element within the session's page
#[async_trait]
pub trait UiElement: Send + Sync {
    /// Direct click, as a user would
    async fn click(&self) -> SessionResult<()>;

    /// Programmatic click via script injection, for when the direct click is
    /// intercepted by an overlay
    async fn click_js(&self) -> SessionResult<()>;

    async fn text(&self) -> SessionResult<String>;

    async fn attr(&self, name: &str) -> SessionResult<Option<String>>;

    async fn is_displayed(&self) -> SessionResult<bool>;

    async fn is_enabled(&self) -> SessionResult<bool>;

    /// Element-relative lookup (supports `.//`-style XPath)
    async fn find(&self, locator: &Locator) -> SessionResult<Box<dyn UiElement>>;

    /// Element-relative lookup of all matches, in document order
    async fn find_all(&self, locator: &Locator) -> SessionResult<Vec<Box<dyn UiElement>>>;

    /// Select the element's current contents (Ctrl+A chord)
    async fn select_all(&self) -> SessionResult<()>;

    async fn type_text(&self, text: &str) -> SessionResult<()>;

    async fn press_enter(&self) -> SessionResult<()>;
}

/// Click with a programmatic fallback.
///
/// Tries the direct click first; if the toolchain reports it intercepted or
/// otherwise failed, retries once via script injection. Both failing is a
/// `false`, never an error.
pub async fn click_robust(element: &dyn UiElement) -> bool {
    match element.click().await {
        Ok(()) => true,
        Err(err) => {
            warn!("Direct click failed, retrying via script: {err}");
            match element.click_js().await {
                Ok(()) => true,
                Err(err) => {
                    error!("Script click failed: {err}");
                    false
                }
            }
        }
    }
}

//! Locators and resolve-with-fallback
//!
//! The vendor UI shifts its DOM between releases, so every lookup in the
//! driver goes through an ordered fallback list of candidate locators.
//! [`resolve_any`] polls the whole list under one shared timeout budget and
//! hands back the first candidate that resolves; first-listed wins when
//! several are simultaneously valid, which keeps behavior deterministic.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::session::{SessionError, UiElement, UiSession};

/// Interval between resolution passes over the fallback list
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Strategy + selector pair identifying one way to find a UI element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(selector: impl Into<String>) -> Self {
        Locator::XPath(selector.into())
    }

    pub fn selector(&self) -> &str {
        match self {
            Locator::Css(s) | Locator::XPath(s) => s,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css:{s}"),
            Locator::XPath(s) => write!(f, "xpath:{s}"),
        }
    }
}

/// Condition an element must satisfy before resolution succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitFor {
    /// Attached to the document
    Present,
    /// Displayed and enabled
    Clickable,
}

/// Resolve the first matching locator from an ordered fallback list.
///
/// Each pass tries the locators strictly in listed order and returns the
/// first element that resolves and satisfies `wait_for`; remaining candidates
/// are skipped. The timeout budget is shared across the whole list, and at
/// least one full pass runs even with a zero budget. Exhausting the budget
/// yields `None` rather than an error.
pub async fn resolve_any(
    session: &dyn UiSession,
    locators: &[Locator],
    wait_for: WaitFor,
    timeout: Duration,
) -> Option<Box<dyn UiElement>> {
    let start = Instant::now();

    loop {
        for locator in locators {
            match session.find(locator).await {
                Ok(element) => {
                    if satisfies(element.as_ref(), wait_for).await {
                        debug!(%locator, "Resolved element");
                        return Some(element);
                    }
                }
                Err(SessionError::NotFound(_)) => {}
                Err(err) => {
                    debug!(%locator, "Lookup failed: {err}");
                }
            }
        }

        if start.elapsed() >= timeout {
            return None;
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

async fn satisfies(element: &dyn UiElement, wait_for: WaitFor) -> bool {
    match wait_for {
        WaitFor::Present => true,
        WaitFor::Clickable => {
            element.is_displayed().await.unwrap_or(false)
                && element.is_enabled().await.unwrap_or(false)
        }
    }
}

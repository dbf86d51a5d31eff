//! WebDriver-backed session implementation
//!
//! Wraps a `fantoccini::Client` attached to the vendor control application.
//! The Desk UI is built from nested custom elements, so lookups need both CSS
//! and XPath (including element-relative `.//` paths), and the numeric fields
//! are contenteditable divs that only commit on an Enter keypress.

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::key::Key;
use fantoccini::{Client, ClientBuilder, Locator as WdLocator};

use crate::locator::Locator;
use crate::session::{SessionError, SessionResult, UiElement, UiSession};

/// Session over a running WebDriver endpoint
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Wrap an already-connected client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect to a WebDriver endpoint (e.g. a local chromedriver) whose
    /// browser is already showing the control application
    pub async fn connect(webdriver_url: &str) -> Result<Self, NewSessionError> {
        let client = ClientBuilder::rustls().connect(webdriver_url).await?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl UiSession for WebDriverSession {
    async fn find(&self, locator: &Locator) -> SessionResult<Box<dyn UiElement>> {
        let element = self
            .client
            .find(to_wd(locator))
            .await
            .map_err(|err| map_find_err(locator, err))?;
        Ok(Box::new(WebDriverElement {
            client: self.client.clone(),
            element,
        }))
    }
}

struct WebDriverElement {
    client: Client,
    element: Element,
}

impl WebDriverElement {
    fn wrap(&self, element: Element) -> Box<dyn UiElement> {
        Box::new(WebDriverElement {
            client: self.client.clone(),
            element,
        })
    }
}

#[async_trait]
impl UiElement for WebDriverElement {
    async fn click(&self) -> SessionResult<()> {
        self.element
            .click()
            .await
            .map_err(|err| SessionError::Interaction(err.to_string()))
    }

    async fn click_js(&self) -> SessionResult<()> {
        let arg = serde_json::to_value(&self.element)
            .map_err(|err| SessionError::Script(err.to_string()))?;
        self.client
            .execute("arguments[0].click();", vec![arg])
            .await
            .map_err(|err| SessionError::Script(err.to_string()))?;
        Ok(())
    }

    async fn text(&self) -> SessionResult<String> {
        self.element
            .text()
            .await
            .map_err(|err| SessionError::Backend(err.to_string()))
    }

    async fn attr(&self, name: &str) -> SessionResult<Option<String>> {
        self.element
            .attr(name)
            .await
            .map_err(|err| SessionError::Backend(err.to_string()))
    }

    async fn is_displayed(&self) -> SessionResult<bool> {
        self.element
            .is_displayed()
            .await
            .map_err(|err| SessionError::Backend(err.to_string()))
    }

    async fn is_enabled(&self) -> SessionResult<bool> {
        self.element
            .is_enabled()
            .await
            .map_err(|err| SessionError::Backend(err.to_string()))
    }

    async fn find(&self, locator: &Locator) -> SessionResult<Box<dyn UiElement>> {
        let element = self
            .element
            .find(to_wd(locator))
            .await
            .map_err(|err| map_find_err(locator, err))?;
        Ok(self.wrap(element))
    }

    async fn find_all(&self, locator: &Locator) -> SessionResult<Vec<Box<dyn UiElement>>> {
        let elements = self
            .element
            .find_all(to_wd(locator))
            .await
            .map_err(|err| map_find_err(locator, err))?;
        Ok(elements.into_iter().map(|e| self.wrap(e)).collect())
    }

    async fn select_all(&self) -> SessionResult<()> {
        // Ctrl+A, then NULL to release the modifier
        let chord: String = [char::from(Key::Control), 'a', char::from(Key::Null)]
            .into_iter()
            .collect();
        self.element
            .send_keys(&chord)
            .await
            .map_err(|err| SessionError::Interaction(err.to_string()))
    }

    async fn type_text(&self, text: &str) -> SessionResult<()> {
        self.element
            .send_keys(text)
            .await
            .map_err(|err| SessionError::Interaction(err.to_string()))
    }

    async fn press_enter(&self) -> SessionResult<()> {
        let enter: String = char::from(Key::Enter).to_string();
        self.element
            .send_keys(&enter)
            .await
            .map_err(|err| SessionError::Interaction(err.to_string()))
    }
}

fn to_wd(locator: &Locator) -> WdLocator<'_> {
    match locator {
        Locator::Css(s) => WdLocator::Css(s),
        Locator::XPath(s) => WdLocator::XPath(s),
    }
}

fn map_find_err(locator: &Locator, err: CmdError) -> SessionError {
    match err {
        CmdError::NoSuchElement(_) => SessionError::NotFound(locator.to_string()),
        other => SessionError::Backend(other.to_string()),
    }
}

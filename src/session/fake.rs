//! Scripted in-memory session for exercising the driver without a browser

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::locator::Locator;
use crate::session::{SessionError, SessionResult, UiElement, UiSession};

/// Fake session: locators are matched by equality against registered entries,
/// and every root lookup is recorded so tests can assert on attempt order.
pub(crate) struct FakeSession {
    entries: Mutex<Vec<(Locator, FakeElement)>>,
    lookups: Mutex<Vec<Locator>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Register an element under a locator; returns a handle kept valid for
    /// later assertions on recorded interactions.
    pub fn register(&self, locator: Locator, element: FakeElement) -> FakeElement {
        self.entries.lock().push((locator, element.clone()));
        element
    }

    /// Every root-level lookup, in the order attempted
    pub fn lookups(&self) -> Vec<Locator> {
        self.lookups.lock().clone()
    }
}

#[async_trait]
impl UiSession for FakeSession {
    async fn find(&self, locator: &Locator) -> SessionResult<Box<dyn UiElement>> {
        self.lookups.lock().push(locator.clone());
        let entries = self.entries.lock();
        match entries.iter().find(|(l, _)| l == locator) {
            Some((_, element)) => Ok(Box::new(element.clone())),
            None => Err(SessionError::NotFound(locator.to_string())),
        }
    }
}

#[derive(Clone)]
pub(crate) struct FakeElement {
    inner: Arc<ElementState>,
}

struct ElementState {
    config: Mutex<ElementConfig>,
    stats: Mutex<ElementStats>,
}

struct ElementConfig {
    text: String,
    attrs: HashMap<String, String>,
    displayed: bool,
    enabled: bool,
    children: Vec<(Locator, FakeElement)>,
    direct_click_failures: usize,
    js_clicks_fail: bool,
}

#[derive(Default)]
struct ElementStats {
    direct_click_attempts: usize,
    js_click_attempts: usize,
    select_alls: usize,
    enters: usize,
    typed: Vec<String>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ElementState {
                config: Mutex::new(ElementConfig {
                    text: String::new(),
                    attrs: HashMap::new(),
                    displayed: true,
                    enabled: true,
                    children: Vec::new(),
                    direct_click_failures: 0,
                    js_clicks_fail: false,
                }),
                stats: Mutex::new(ElementStats::default()),
            }),
        }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.inner.config.lock().text = text.into();
        self
    }

    pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.config.lock().attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_child(self, locator: Locator, child: FakeElement) -> Self {
        self.inner.config.lock().children.push((locator, child));
        self
    }

    pub fn hidden(self) -> Self {
        self.inner.config.lock().displayed = false;
        self
    }

    pub fn disabled(self) -> Self {
        self.inner.config.lock().enabled = false;
        self
    }

    /// The next `count` direct clicks fail as intercepted
    pub fn fail_direct_clicks(self, count: usize) -> Self {
        self.inner.config.lock().direct_click_failures = count;
        self
    }

    pub fn fail_js_clicks(self) -> Self {
        self.inner.config.lock().js_clicks_fail = true;
        self
    }

    pub fn direct_click_attempts(&self) -> usize {
        self.inner.stats.lock().direct_click_attempts
    }

    pub fn js_click_attempts(&self) -> usize {
        self.inner.stats.lock().js_click_attempts
    }

    pub fn clicked(&self) -> bool {
        let stats = self.inner.stats.lock();
        stats.direct_click_attempts > 0 || stats.js_click_attempts > 0
    }

    pub fn typed(&self) -> Vec<String> {
        self.inner.stats.lock().typed.clone()
    }

    pub fn select_alls(&self) -> usize {
        self.inner.stats.lock().select_alls
    }

    pub fn enters(&self) -> usize {
        self.inner.stats.lock().enters
    }
}

#[async_trait]
impl UiElement for FakeElement {
    async fn click(&self) -> SessionResult<()> {
        self.inner.stats.lock().direct_click_attempts += 1;
        let mut config = self.inner.config.lock();
        if config.direct_click_failures > 0 {
            config.direct_click_failures -= 1;
            return Err(SessionError::Interaction("click intercepted".into()));
        }
        Ok(())
    }

    async fn click_js(&self) -> SessionResult<()> {
        self.inner.stats.lock().js_click_attempts += 1;
        if self.inner.config.lock().js_clicks_fail {
            return Err(SessionError::Script("script click rejected".into()));
        }
        Ok(())
    }

    async fn text(&self) -> SessionResult<String> {
        Ok(self.inner.config.lock().text.clone())
    }

    async fn attr(&self, name: &str) -> SessionResult<Option<String>> {
        Ok(self.inner.config.lock().attrs.get(name).cloned())
    }

    async fn is_displayed(&self) -> SessionResult<bool> {
        Ok(self.inner.config.lock().displayed)
    }

    async fn is_enabled(&self) -> SessionResult<bool> {
        Ok(self.inner.config.lock().enabled)
    }

    async fn find(&self, locator: &Locator) -> SessionResult<Box<dyn UiElement>> {
        let config = self.inner.config.lock();
        match config.children.iter().find(|(l, _)| l == locator) {
            Some((_, child)) => Ok(Box::new(child.clone())),
            None => Err(SessionError::NotFound(locator.to_string())),
        }
    }

    async fn find_all(&self, locator: &Locator) -> SessionResult<Vec<Box<dyn UiElement>>> {
        let config = self.inner.config.lock();
        Ok(config
            .children
            .iter()
            .filter(|(l, _)| l == locator)
            .map(|(_, child)| Box::new(child.clone()) as Box<dyn UiElement>)
            .collect())
    }

    async fn select_all(&self) -> SessionResult<()> {
        self.inner.stats.lock().select_alls += 1;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> SessionResult<()> {
        self.inner.stats.lock().typed.push(text.to_string());
        Ok(())
    }

    async fn press_enter(&self) -> SessionResult<()> {
        self.inner.stats.lock().enters += 1;
        Ok(())
    }
}

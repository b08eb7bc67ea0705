//! Scripted in-memory driver for harness tests
//!
//! Stands in for the automation server: screens are scripted as per-locator
//! text queues, and transient faults (stale references, delayed presence)
//! are injected by counter. Used by the unit tests and the integration
//! tests under `tests/`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::common::{Error, Result};

use super::client::{ElementRef, UiDriver};
use super::locator::Locator;

#[derive(Default)]
struct ElementState {
    exists: bool,
    /// Queued read results; the last entry repeats once the queue drains
    texts: Vec<String>,
    next_text: usize,
    displayed: bool,
    stale_clicks: u32,
    stale_reads: u32,
    stale_displays: u32,
    absent_finds: u32,
    find_all_errors: bool,
    find_calls: u32,
    clicks: u32,
    keys: Vec<String>,
}

#[derive(Default)]
struct MockState {
    elements: HashMap<String, ElementState>,
    click_log: Vec<String>,
    app_events: Vec<String>,
}

/// Scripted driver standing in for a live automation session
#[derive(Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_element<R>(&self, key: &str, f: impl FnOnce(&mut ElementState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        let element = state.elements.entry(key.to_string()).or_default();
        f(element)
    }

    /// Make the locator resolvable with a single fixed text
    pub fn set_text(&self, locator: &Locator, text: &str) {
        self.with_element(&locator.to_string(), |e| {
            e.exists = true;
            e.displayed = true;
            e.texts = vec![text.to_string()];
            e.next_text = 0;
        });
    }

    /// Make the locator resolvable with a sequence of read results; the
    /// last one repeats after the queue drains
    pub fn queue_texts(&self, locator: &Locator, texts: &[&str]) {
        self.with_element(&locator.to_string(), |e| {
            e.exists = true;
            e.displayed = true;
            e.texts = texts.iter().map(|t| t.to_string()).collect();
            e.next_text = 0;
        });
    }

    /// Make the locator resolvable with no text (e.g. an input surface)
    pub fn present(&self, locator: &Locator) {
        self.set_text(locator, "");
    }

    /// Fail the next `n` clicks on the locator with a stale reference
    pub fn fail_stale_clicks(&self, locator: &Locator, n: u32) {
        self.with_element(&locator.to_string(), |e| e.stale_clicks = n);
    }

    /// Fail the next `n` text reads on the locator with a stale reference
    pub fn fail_stale_reads(&self, locator: &Locator, n: u32) {
        self.with_element(&locator.to_string(), |e| e.stale_reads = n);
    }

    /// Fail the next `n` visibility probes on the locator with a stale
    /// reference
    pub fn fail_stale_displays(&self, locator: &Locator, n: u32) {
        self.with_element(&locator.to_string(), |e| e.stale_displays = n);
    }

    /// Report the locator absent for the next `n` lookups
    pub fn absent_for_finds(&self, locator: &Locator, n: u32) {
        self.with_element(&locator.to_string(), |e| e.absent_finds = n);
    }

    /// Answer multi-element lookups for this locator with a
    /// "no such element" error instead of an empty list
    pub fn error_on_find_all(&self, locator: &Locator) {
        self.with_element(&locator.to_string(), |e| e.find_all_errors = true);
    }

    /// Number of lookup attempts made against the locator
    pub fn attempt_count(&self, locator: &Locator) -> u32 {
        self.with_element(&locator.to_string(), |e| e.find_calls)
    }

    /// Number of successful clicks on the locator
    pub fn click_count(&self, locator: &Locator) -> u32 {
        self.with_element(&locator.to_string(), |e| e.clicks)
    }

    /// Ordered log of successfully clicked locators
    pub fn click_log(&self) -> Vec<String> {
        self.state.lock().unwrap().click_log.clone()
    }

    /// Text typed into the locator, in call order
    pub fn typed(&self, locator: &Locator) -> Vec<String> {
        self.with_element(&locator.to_string(), |e| e.keys.clone())
    }

    /// App lifecycle calls (`terminate:<pkg>` / `activate:<pkg>`) in order
    pub fn app_events(&self) -> Vec<String> {
        self.state.lock().unwrap().app_events.clone()
    }
}

#[async_trait]
impl UiDriver for MockDriver {
    async fn find(&self, locator: &Locator) -> Result<ElementRef> {
        let key = locator.to_string();
        self.with_element(&key, |e| {
            e.find_calls += 1;
            if e.absent_finds > 0 {
                e.absent_finds -= 1;
                return Err(Error::NoSuchElement {
                    locator: key.clone(),
                });
            }
            if !e.exists {
                return Err(Error::NoSuchElement {
                    locator: key.clone(),
                });
            }
            Ok(ElementRef(key.clone()))
        })
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
        let key = locator.to_string();
        self.with_element(&key, |e| {
            if e.find_all_errors {
                return Err(Error::NoSuchElement {
                    locator: key.clone(),
                });
            }
            if e.exists && e.absent_finds == 0 {
                Ok(vec![ElementRef(key.clone())])
            } else {
                Ok(Vec::new())
            }
        })
    }

    async fn click(&self, element: &ElementRef) -> Result<()> {
        let key = element.0.clone();
        let result = self.with_element(&key, |e| {
            if e.stale_clicks > 0 {
                e.stale_clicks -= 1;
                return Err(Error::StaleElement {
                    locator: key.clone(),
                });
            }
            e.clicks += 1;
            Ok(())
        });
        if result.is_ok() {
            self.state.lock().unwrap().click_log.push(element.0.clone());
        }
        result
    }

    async fn text(&self, element: &ElementRef) -> Result<String> {
        self.with_element(&element.0, |e| {
            if e.stale_reads > 0 {
                e.stale_reads -= 1;
                return Err(Error::StaleElement {
                    locator: element.0.clone(),
                });
            }
            let text = e
                .texts
                .get(e.next_text)
                .or_else(|| e.texts.last())
                .cloned()
                .unwrap_or_default();
            if e.next_text + 1 < e.texts.len() {
                e.next_text += 1;
            }
            Ok(text)
        })
    }

    async fn displayed(&self, element: &ElementRef) -> Result<bool> {
        self.with_element(&element.0, |e| {
            if e.stale_displays > 0 {
                e.stale_displays -= 1;
                return Err(Error::StaleElement {
                    locator: element.0.clone(),
                });
            }
            Ok(e.displayed)
        })
    }

    async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
        self.with_element(&element.0, |e| {
            e.keys.push(text.to_string());
            Ok(())
        })
    }

    async fn terminate_app(&self, package: &str) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .app_events
            .push(format!("terminate:{}", package));
        Ok(())
    }

    async fn activate_app(&self, package: &str) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .app_events
            .push(format!("activate:{}", package));
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        // Minimal PNG signature so artifacts look like images
        Ok(vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'])
    }
}

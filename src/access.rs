//! Resilient element accessor
//!
//! The UI re-renders asynchronously, so a locator resolved on one snapshot
//! may reference a node that is gone by the time the action executes. That
//! race surfaces as a stale-element fault and is absorbed here by a bounded
//! immediate retry: re-resolve, act again, up to the configured attempt
//! count. Logical failures (wrong text, wrong state) are never retried.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::common::{Error, Result};
use crate::driver::{ElementRef, Locator, UiDriver};

/// Default attempt count for stale-fault recovery
pub const DEFAULT_RETRIES: u32 = 3;

/// Run `op` up to `retries` times, retrying immediately on the transient
/// stale-reference fault class only. The final attempt's fault propagates;
/// every other fault class propagates on the first occurrence.
pub async fn retry_stale<T, F, Fut>(retries: u32, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Err(e) if e.is_transient() && attempt < retries => {
                tracing::debug!(attempt, retries, "stale element reference, retrying");
                continue;
            }
            other => return other,
        }
    }
}

/// Element interactions with transient-fault recovery over a driver session
pub struct Accessor<'a> {
    driver: &'a dyn UiDriver,
    poll_interval: Duration,
}

impl<'a> Accessor<'a> {
    pub fn new(driver: &'a dyn UiDriver) -> Self {
        Self {
            driver,
            poll_interval: Duration::from_millis(250),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn driver(&self) -> &dyn UiDriver {
        self.driver
    }

    /// Resolve and click, retrying on stale reference
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        self.click_with_retries(locator, DEFAULT_RETRIES).await
    }

    pub async fn click_with_retries(&self, locator: &Locator, retries: u32) -> Result<()> {
        retry_stale(retries, || async {
            let element = self.driver.find(locator).await?;
            self.driver.click(&element).await
        })
        .await
    }

    /// Resolve and read text, retrying on stale reference
    pub async fn read_text(&self, locator: &Locator) -> Result<String> {
        self.read_text_with_retries(locator, DEFAULT_RETRIES).await
    }

    pub async fn read_text_with_retries(&self, locator: &Locator, retries: u32) -> Result<String> {
        retry_stale(retries, || async {
            let element = self.driver.find(locator).await?;
            self.driver.text(&element).await
        })
        .await
    }

    /// Resolve and probe visibility, retrying on stale reference
    pub async fn is_displayed(&self, locator: &Locator) -> Result<bool> {
        self.is_displayed_with_retries(locator, DEFAULT_RETRIES).await
    }

    pub async fn is_displayed_with_retries(&self, locator: &Locator, retries: u32) -> Result<bool> {
        retry_stale(retries, || async {
            let element = self.driver.find(locator).await?;
            self.driver.displayed(&element).await
        })
        .await
    }

    /// True when no node matches the locator. A "no such element" lookup
    /// answer is the expected terminal state here, not a fault.
    pub async fn is_absent(&self, locator: &Locator) -> Result<bool> {
        match self.driver.find_all(locator).await {
            Ok(elements) => Ok(elements.is_empty()),
            Err(Error::NoSuchElement { .. }) => Ok(true),
            Err(e) => Err(e),
        }
    }

    /// Resolve and type text, retrying on stale reference
    pub async fn send_keys(&self, locator: &Locator, text: &str) -> Result<()> {
        retry_stale(DEFAULT_RETRIES, || async {
            let element = self.driver.find(locator).await?;
            self.driver.send_keys(&element, text).await
        })
        .await
    }

    /// Poll until the locator resolves, within `timeout`. Absence and
    /// staleness keep the poll going; any other fault aborts it.
    pub async fn wait_present(&self, locator: &Locator, timeout: Duration) -> Result<ElementRef> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.driver.find(locator).await {
                Ok(element) => return Ok(element),
                Err(Error::NoSuchElement { .. }) | Err(Error::StaleElement { .. }) => {}
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Err(Error::wait_timeout(locator.to_string(), timeout));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Poll until the node's text contains `needle`, within `timeout`
    pub async fn wait_text_contains(
        &self,
        locator: &Locator,
        needle: &str,
        timeout: Duration,
    ) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.read_text(locator).await {
                Ok(text) if text.contains(needle) => return Ok(()),
                Ok(_) | Err(Error::NoSuchElement { .. }) | Err(Error::StaleElement { .. }) => {}
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Err(Error::wait_timeout(
                    format!("text '{}' in {}", needle, locator),
                    timeout,
                ));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::mock::MockDriver;

    fn fast_accessor(driver: &MockDriver) -> Accessor<'_> {
        Accessor::new(driver).with_poll_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn click_retries_through_transient_staleness() {
        let driver = MockDriver::new();
        let button = Locator::id("cz.apos:id/yes_button");
        driver.set_text(&button, "ANO");
        driver.fail_stale_clicks(&button, 2);

        let accessor = fast_accessor(&driver);
        accessor.click(&button).await.unwrap();
        assert_eq!(driver.click_count(&button), 1);
        assert_eq!(driver.attempt_count(&button), 3);
    }

    #[tokio::test]
    async fn retry_count_is_exact() {
        let driver = MockDriver::new();
        let button = Locator::id("cz.apos:id/yes_button");
        driver.set_text(&button, "ANO");
        // More scripted failures than attempts: the fault must propagate
        driver.fail_stale_clicks(&button, 10);

        let accessor = fast_accessor(&driver);
        let err = accessor.click_with_retries(&button, 3).await.unwrap_err();
        assert!(err.is_transient());
        // Exactly 3 attempts, zero extra beyond the configured count
        assert_eq!(driver.attempt_count(&button), 3);
    }

    #[tokio::test]
    async fn non_transient_faults_propagate_immediately() {
        let driver = MockDriver::new();
        let missing = Locator::id("cz.apos:id/not_here");

        let accessor = fast_accessor(&driver);
        let err = accessor.read_text(&missing).await.unwrap_err();
        assert!(matches!(err, Error::NoSuchElement { .. }));
        assert_eq!(driver.attempt_count(&missing), 1);
    }

    #[tokio::test]
    async fn read_text_recovers_after_stale() {
        let driver = MockDriver::new();
        let title = Locator::id("cz.apos:id/title");
        driver.set_text(&title, "Prodej");
        driver.fail_stale_reads(&title, 1);

        let accessor = fast_accessor(&driver);
        assert_eq!(accessor.read_text(&title).await.unwrap(), "Prodej");
    }

    #[tokio::test]
    async fn is_displayed_recovers_after_stale() {
        let driver = MockDriver::new();
        let prompt = Locator::id("cz.apos:id/text_view");
        driver.set_text(&prompt, "Přejete si spropitné?");
        driver.fail_stale_displays(&prompt, 2);

        let accessor = fast_accessor(&driver);
        assert!(accessor.is_displayed(&prompt).await.unwrap());
        assert_eq!(driver.attempt_count(&prompt), 3);
    }

    #[tokio::test]
    async fn absence_is_a_result_not_an_error() {
        let driver = MockDriver::new();
        let gone = Locator::id("cz.apos:id/spinner");

        let accessor = fast_accessor(&driver);
        assert!(accessor.is_absent(&gone).await.unwrap());

        driver.set_text(&gone, "spinning");
        assert!(!accessor.is_absent(&gone).await.unwrap());
    }

    #[tokio::test]
    async fn no_such_element_lookup_error_counts_as_absent() {
        let driver = MockDriver::new();
        let gone = Locator::id("cz.apos:id/spinner");
        // Server answers the list lookup with an error instead of []
        driver.error_on_find_all(&gone);

        let accessor = fast_accessor(&driver);
        assert!(accessor.is_absent(&gone).await.unwrap());
    }

    #[tokio::test]
    async fn wait_present_resolves_late_elements() {
        let driver = MockDriver::new();
        let root = Locator::id("cz.apos:id/side_menu");
        driver.set_text(&root, "menu");
        driver.absent_for_finds(&root, 2);

        let accessor = fast_accessor(&driver);
        accessor
            .wait_present(&root, Duration::from_secs(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn wait_present_times_out() {
        let driver = MockDriver::new();
        let root = Locator::id("cz.apos:id/side_menu");

        let accessor = fast_accessor(&driver);
        let err = accessor
            .wait_present(&root, Duration::from_millis(30))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::WaitTimeout { .. }));
    }
}

//! HTTP client for the automation server
//!
//! One `HttpDriver` owns one live session. The element-interaction surface
//! is the `UiDriver` trait so the accessor, flows and profile initializer
//! can be exercised against a scripted driver in tests.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Method;
use serde_json::Value;

use crate::common::{Error, Result};

use super::locator::Locator;
use super::wire::{
    self, Envelope, FindBody, SessionValue, WireError, NO_SUCH_ELEMENT, STALE_ELEMENT_REFERENCE,
};

/// Handle to a resolved UI node, valid only for the snapshot it was
/// resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef(pub String);

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element({})", self.0)
    }
}

/// Element interaction surface of the automation session
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Resolve a locator against the current UI snapshot
    async fn find(&self, locator: &Locator) -> Result<ElementRef>;

    /// Resolve all matching nodes; empty when none match
    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementRef>>;

    /// Click a resolved node
    async fn click(&self, element: &ElementRef) -> Result<()>;

    /// Read the text of a resolved node
    async fn text(&self, element: &ElementRef) -> Result<String>;

    /// Whether a resolved node is displayed
    async fn displayed(&self, element: &ElementRef) -> Result<bool>;

    /// Type text into a resolved node
    async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()>;

    /// Terminate the application process
    async fn terminate_app(&self, package: &str) -> Result<()>;

    /// Activate (launch or foreground) the application
    async fn activate_app(&self, package: &str) -> Result<()>;

    /// Capture a PNG screenshot of the current screen
    async fn screenshot(&self) -> Result<Vec<u8>>;
}

/// Live session against the automation server
pub struct HttpDriver {
    http: reqwest::Client,
    base: String,
    session_id: String,
}

impl HttpDriver {
    /// Create a new session against a running automation server
    pub async fn new_session(base_url: &str, package: &str, activity: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        let caps = wire::session_capabilities(package, activity);
        let resp = http
            .post(format!("{}/session", base_url))
            .json(&caps)
            .send()
            .await
            .map_err(|e| Error::SessionCreateFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::SessionCreateFailed(body));
        }

        let env: Envelope<SessionValue> = resp
            .json()
            .await
            .map_err(|e| Error::SessionCreateFailed(e.to_string()))?;

        tracing::debug!(session = %env.value.session_id, "automation session created");

        Ok(Self {
            http,
            base: base_url.to_string(),
            session_id: env.value.session_id,
        })
    }

    /// Probe the server status endpoint (used while waiting for spawn)
    pub async fn server_ready(base_url: &str) -> bool {
        reqwest::Client::new()
            .get(format!("{}/status", base_url))
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Set the implicit element-lookup wait for this session
    pub async fn set_implicit_wait(&self, wait: Duration) -> Result<()> {
        self.execute(
            Method::POST,
            "timeouts",
            Some(serde_json::json!({ "implicit": wait.as_millis() as u64 })),
            "timeouts",
            "session",
        )
        .await?;
        Ok(())
    }

    /// Delete the session on the server
    pub async fn quit(self) -> Result<()> {
        let url = format!("{}/session/{}", self.base, self.session_id);
        self.http
            .delete(url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        tracing::debug!(session = %self.session_id, "automation session deleted");
        Ok(())
    }

    /// Send a session-scoped request and unwrap the value envelope
    ///
    /// `command` names the operation for error reporting; `context`
    /// identifies the element or locator involved so stale/absent faults
    /// carry something readable.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        command: &str,
        context: &str,
    ) -> Result<Value> {
        let url = format!("{}/session/{}/{}", self.base, self.session_id, path);

        let mut req = self.http.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if status.is_success() {
            let env: Envelope<Value> = serde_json::from_slice(&bytes)?;
            return Ok(env.value);
        }

        // Failed requests carry a WebDriver error object in the envelope
        match serde_json::from_slice::<Envelope<WireError>>(&bytes) {
            Ok(env) => Err(map_wire_error(command, context, env.value)),
            Err(_) => Err(Error::driver_request_failed(
                command,
                &format!("HTTP {}: {}", status, String::from_utf8_lossy(&bytes)),
            )),
        }
    }
}

/// Map a WebDriver error code onto our fault classes
fn map_wire_error(command: &str, context: &str, err: WireError) -> Error {
    match err.error.as_str() {
        STALE_ELEMENT_REFERENCE => Error::StaleElement {
            locator: context.to_string(),
        },
        NO_SUCH_ELEMENT => Error::NoSuchElement {
            locator: context.to_string(),
        },
        _ => Error::driver_request_failed(command, &format!("{}: {}", err.error, err.message)),
    }
}

#[async_trait]
impl UiDriver for HttpDriver {
    async fn find(&self, locator: &Locator) -> Result<ElementRef> {
        let body = serde_json::to_value(FindBody {
            using: locator.strategy.as_wire(),
            value: &locator.selector,
        })?;

        let value = self
            .execute(Method::POST, "element", Some(body), "find", &locator.to_string())
            .await?;

        wire::element_id(&value).map(ElementRef).ok_or_else(|| {
            Error::driver_request_failed("find", "response carried no element id")
        })
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ElementRef>> {
        let body = serde_json::to_value(FindBody {
            using: locator.strategy.as_wire(),
            value: &locator.selector,
        })?;

        let value = self
            .execute(
                Method::POST,
                "elements",
                Some(body),
                "find_all",
                &locator.to_string(),
            )
            .await?;

        let items = value
            .as_array()
            .ok_or_else(|| Error::driver_request_failed("find_all", "response was not a list"))?;

        Ok(items
            .iter()
            .filter_map(wire::element_id)
            .map(ElementRef)
            .collect())
    }

    async fn click(&self, element: &ElementRef) -> Result<()> {
        self.execute(
            Method::POST,
            &format!("element/{}/click", element.0),
            Some(serde_json::json!({})),
            "click",
            &element.to_string(),
        )
        .await?;
        Ok(())
    }

    async fn text(&self, element: &ElementRef) -> Result<String> {
        let value = self
            .execute(
                Method::GET,
                &format!("element/{}/text", element.0),
                None,
                "text",
                &element.to_string(),
            )
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn displayed(&self, element: &ElementRef) -> Result<bool> {
        let value = self
            .execute(
                Method::GET,
                &format!("element/{}/displayed", element.0),
                None,
                "displayed",
                &element.to_string(),
            )
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn send_keys(&self, element: &ElementRef, text: &str) -> Result<()> {
        self.execute(
            Method::POST,
            &format!("element/{}/value", element.0),
            Some(serde_json::json!({ "text": text })),
            "send_keys",
            &element.to_string(),
        )
        .await?;
        Ok(())
    }

    async fn terminate_app(&self, package: &str) -> Result<()> {
        self.execute(
            Method::POST,
            "appium/device/terminate_app",
            Some(serde_json::json!({ "appId": package })),
            "terminate_app",
            package,
        )
        .await?;
        Ok(())
    }

    async fn activate_app(&self, package: &str) -> Result<()> {
        self.execute(
            Method::POST,
            "appium/device/activate_app",
            Some(serde_json::json!({ "appId": package })),
            "activate_app",
            package,
        )
        .await?;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let value = self
            .execute(Method::GET, "screenshot", None, "screenshot", "screen")
            .await?;

        let encoded = value
            .as_str()
            .ok_or_else(|| Error::driver_request_failed("screenshot", "payload was not a string"))?;

        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| Error::driver_request_failed("screenshot", &e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_errors_map_to_fault_classes() {
        let stale = map_wire_error(
            "click",
            "id=btn",
            WireError {
                error: STALE_ELEMENT_REFERENCE.into(),
                message: "node gone".into(),
            },
        );
        assert!(stale.is_transient());

        let absent = map_wire_error(
            "find",
            "id=btn",
            WireError {
                error: NO_SUCH_ELEMENT.into(),
                message: "nothing matched".into(),
            },
        );
        assert!(matches!(absent, Error::NoSuchElement { .. }));

        let other = map_wire_error(
            "click",
            "id=btn",
            WireError {
                error: "invalid session id".into(),
                message: "expired".into(),
            },
        );
        assert!(matches!(other, Error::DriverRequestFailed { .. }));
    }
}

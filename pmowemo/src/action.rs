//! Action invocation
//!
//! An [`Action`] is one remote operation of a device service. It renders the
//! call into a SOAP envelope, posts it to the service control URL and
//! flattens the reply into a tag -> text map. Transport failures are retried
//! a bounded number of times with a reconnection hook between attempts;
//! anything the device actually answers, fault or not, is treated as a
//! response and extracted.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, warn};
use ureq::Agent;

use crate::device::DeviceHandle;
use crate::error::{Error, Result};
use crate::scpd::ActionDescriptor;
use crate::session::SessionRegistry;
use crate::soap;

/// Invocation attempts per call before giving up
pub const MAX_RETRIES: u32 = 3;

/// Timeout for a single attempt, in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// One invokable operation of a device service.
///
/// Construction does not talk to the network; every [`invoke`](Self::invoke)
/// or [`invoke_async`](Self::invoke_async) call does. The two paths share
/// one contract: up to [`MAX_RETRIES`] sequential attempts, a warning and a
/// best-effort device reconnection after each transport failure, and a
/// [`Error::RetriesExceeded`] once all attempts are spent. A reply that
/// arrives but cannot be parsed is returned as [`Error::Soap`] immediately,
/// without another attempt.
#[derive(Clone)]
pub struct Action {
    name: String,
    service_type: String,
    control_url: String,
    args: Vec<String>,
    headers: Vec<(String, String)>,
    device: Arc<dyn DeviceHandle>,
    sessions: Arc<SessionRegistry>,
}

impl Action {
    /// Build an action bound to a service control endpoint.
    ///
    /// `descriptor` carries the action name and its argument names as the
    /// service description listed them. Argument names are kept for
    /// introspection only; invocation sends whatever pairs the caller
    /// passes, in call order.
    pub fn new(
        device: Arc<dyn DeviceHandle>,
        sessions: Arc<SessionRegistry>,
        service_type: &str,
        control_url: &str,
        descriptor: ActionDescriptor,
    ) -> Self {
        let headers = vec![
            ("Content-Type".to_string(), "text/xml".to_string()),
            (
                "SOAPACTION".to_string(),
                format!("\"{}#{}\"", service_type, descriptor.name),
            ),
        ];

        Self {
            name: descriptor.name,
            service_type: service_type.to_string(),
            control_url: control_url.to_string(),
            args: descriptor.arguments,
            headers,
            device,
            sessions,
        }
    }

    /// Action name as the service description spells it.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Service URN this action belongs to.
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// Absolute control URL the call is posted to.
    pub fn control_url(&self) -> &str {
        &self.control_url
    }

    /// Described argument names, in document order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Transport headers sent with every call.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Invoke the action, blocking the current thread.
    ///
    /// Returns the flattened response fields on success.
    pub fn invoke(&self, args: &[(&str, &str)]) -> Result<HashMap<String, String>> {
        let body = soap::build_action_request(&self.service_type, &self.name, args)?;

        for attempt in 1..=MAX_RETRIES {
            match self.post(&body) {
                Ok(raw) => return extract_fields(&raw),
                Err(err) => self.note_failed_attempt(attempt, err),
            }
        }

        Err(self.retries_exceeded())
    }

    /// Invoke the action through the shared asynchronous client.
    ///
    /// Same retry, reconnection and extraction contract as
    /// [`invoke`](Self::invoke); attempts stay strictly sequential.
    pub async fn invoke_async(&self, args: &[(&str, &str)]) -> Result<HashMap<String, String>> {
        let body = soap::build_action_request(&self.service_type, &self.name, args)?;

        for attempt in 1..=MAX_RETRIES {
            match self.post_async(&body).await {
                Ok(raw) => return extract_fields(&raw),
                Err(err) => self.note_failed_attempt(attempt, err),
            }
        }

        Err(self.retries_exceeded())
    }

    /// One blocking POST. Any HTTP status counts as a delivered reply;
    /// only transport-level failures surface as errors here.
    fn post(&self, body: &str) -> std::result::Result<String, ureq::Error> {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .build();

        let agent: Agent = config.into();

        let mut request = agent.post(&self.control_url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let mut response = request.send(body)?;
        response.body_mut().read_to_string()
    }

    /// One POST through the registry's shared client.
    async fn post_async(&self, body: &str) -> std::result::Result<String, reqwest::Error> {
        let mut request = self
            .sessions
            .session()
            .post(&self.control_url)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .body(body.to_string());
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        response.text().await
    }

    fn note_failed_attempt(&self, attempt: u32, err: impl fmt::Display) {
        warn!(
            "Error communicating with {} at {}:{} (attempt {}/{}): {}",
            self.device.name(),
            self.device.host(),
            self.device.port(),
            attempt,
            MAX_RETRIES,
            err
        );

        if self.device.rediscovery_enabled() {
            self.device.reconnect_with_device();
        }
    }

    fn retries_exceeded(&self) -> Error {
        error!(
            "Error communicating with {} after {} attempts. Giving up.",
            self.device.name(),
            MAX_RETRIES
        );

        Error::RetriesExceeded {
            device: self.device.name().to_string(),
            attempts: MAX_RETRIES,
        }
    }
}

fn extract_fields(raw: &str) -> Result<HashMap<String, String>> {
    let envelope = soap::parse_envelope(raw.as_bytes())?;
    Ok(soap::response_fields(&envelope)?)
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Action {}({})>", self.name, self.args.join(", "))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("service_type", &self.service_type)
            .field("control_url", &self.control_url)
            .field("args", &self.args)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceInfo;

    fn test_action(descriptor: ActionDescriptor) -> Action {
        let device = Arc::new(DeviceInfo::new("Test Switch", "192.168.1.42", 49153));
        let sessions = Arc::new(SessionRegistry::new());
        Action::new(
            device,
            sessions,
            "urn:Belkin:service:basicevent:1",
            "http://192.168.1.42:49153/upnp/control/basicevent1",
            descriptor,
        )
    }

    #[test]
    fn test_headers_are_precomputed() {
        let action = test_action(ActionDescriptor {
            name: "GetBinaryState".to_string(),
            arguments: vec!["BinaryState".to_string()],
        });

        let headers = action.headers();
        assert_eq!(headers[0].0, "Content-Type");
        assert_eq!(headers[0].1, "text/xml");
        assert_eq!(headers[1].0, "SOAPACTION");
        assert_eq!(
            headers[1].1,
            "\"urn:Belkin:service:basicevent:1#GetBinaryState\""
        );
    }

    #[test]
    fn test_display_lists_argument_names() {
        let action = test_action(ActionDescriptor {
            name: "SetBinaryState".to_string(),
            arguments: vec!["BinaryState".to_string(), "Duration".to_string()],
        });

        assert_eq!(
            action.to_string(),
            "<Action SetBinaryState(BinaryState, Duration)>"
        );
    }

    #[test]
    fn test_display_without_arguments() {
        let action = test_action(ActionDescriptor {
            name: "ReSetup".to_string(),
            arguments: Vec::new(),
        });

        assert_eq!(action.to_string(), "<Action ReSetup()>");
    }
}

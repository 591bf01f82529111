//! Device services and their discovered actions

use std::fmt;
use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use ureq::Agent;

use crate::action::{Action, REQUEST_TIMEOUT_SECS};
use crate::device::DeviceHandle;
use crate::error::Result;
use crate::scpd;
use crate::session::SessionRegistry;

/// One service entry as a device advertises it.
///
/// The paths are taken verbatim from the device description; [`Service::new`]
/// resolves them against the device base URL.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Service URN (ex: "urn:Belkin:service:basicevent:1")
    pub service_type: String,

    /// Path of the service description document
    pub scpd_url: String,

    /// Path of the control endpoint, possibly already absolute
    pub control_url: String,
}

/// A device service with its set of invokable actions.
///
/// Construction fetches and parses the service description once; the
/// resulting action set is immutable afterwards. A description endpoint
/// that answers with a non-success status yields a service without
/// actions rather than an error, so one broken service does not take the
/// whole device down. Transport failures and malformed descriptions do
/// fail construction.
pub struct Service {
    name: String,
    service_type: String,
    base_url: String,
    control_url: String,
    actions: Vec<Action>,
}

impl Service {
    /// Build a service from its descriptor, fetching the description from
    /// `base_url` (trailing slashes ignored).
    pub fn new(
        device: Arc<dyn DeviceHandle>,
        descriptor: &ServiceDescriptor,
        base_url: &str,
        sessions: Arc<SessionRegistry>,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let name = service_name(&descriptor.service_type).to_string();
        let control_url = resolve_control_url(&base_url, &descriptor.control_url);
        let scpd_url = format!("{}/{}", base_url, descriptor.scpd_url.trim_matches('/'));

        debug!("Fetching service description for {} at {}", name, scpd_url);

        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .build();

        let agent: Agent = config.into();

        let response = agent.get(&scpd_url).call()?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Service description at {} answered HTTP {}, exposing no actions",
                scpd_url, status
            );
            return Ok(Self {
                name,
                service_type: descriptor.service_type.clone(),
                base_url,
                control_url,
                actions: Vec::new(),
            });
        }

        let (_parts, body) = response.into_parts();
        let described = scpd::parse_scpd(BufReader::new(body.into_reader()))?;

        debug!("Service {} describes {} actions", name, described.len());

        let actions = described
            .into_iter()
            .map(|action| {
                Action::new(
                    Arc::clone(&device),
                    Arc::clone(&sessions),
                    &descriptor.service_type,
                    &control_url,
                    action,
                )
            })
            .collect();

        Ok(Self {
            name,
            service_type: descriptor.service_type.clone(),
            base_url,
            control_url,
            actions,
        })
    }

    /// Short service name derived from the service type
    /// ("urn:Belkin:service:basicevent:1" -> "basicevent").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Service URN.
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// Host part of the base URL, for diagnostics.
    pub fn hostname(&self) -> &str {
        self.base_url.rsplit('/').next().unwrap_or_default()
    }

    /// Absolute control URL actions are posted to.
    pub fn control_url(&self) -> &str {
        &self.control_url
    }

    /// All actions, in the order the description listed them.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Look up an action by name.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|action| action.name() == name)
    }

    /// Action names, in document order.
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.iter().map(|action| action.name()).collect()
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Service {}({})>", self.name, self.action_names().join(", "))
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.name)
            .field("service_type", &self.service_type)
            .field("base_url", &self.base_url)
            .field("control_url", &self.control_url)
            .field("actions", &self.action_names())
            .finish()
    }
}

/// Second-to-last colon-delimited token of the service type, the
/// conventional short name of a UPnP service.
fn service_name(service_type: &str) -> &str {
    service_type.rsplit(':').nth(1).unwrap_or(service_type)
}

/// Resolve a possibly relative controlURL against the device base URL.
///
/// Absolute http(s) URLs pass through unchanged.
fn resolve_control_url(base_url: &str, control_url: &str) -> String {
    if control_url.starts_with("http://") || control_url.starts_with("https://") {
        return control_url.to_string();
    }

    format!("{}/{}", base_url, control_url.trim_matches('/'))
}

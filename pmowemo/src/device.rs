//! Device collaborator seam
//!
//! Invocation needs very little from the device that owns a service: a name
//! for logs and errors, the host/port for diagnostics, and an optional
//! reconnection hook used between failed attempts. [`DeviceHandle`] captures
//! exactly that surface so any discovery stack can plug in behind it.

/// The device surface consumed during invocation.
pub trait DeviceHandle: Send + Sync {
    /// Human-readable device name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Device host, for diagnostics.
    fn host(&self) -> &str;

    /// Device port, for diagnostics.
    fn port(&self) -> u16;

    /// Whether the device can be re-resolved after a transport failure.
    fn rediscovery_enabled(&self) -> bool {
        false
    }

    /// Try to re-establish contact with the device.
    ///
    /// Called after each failed invocation attempt when
    /// [`rediscovery_enabled`](Self::rediscovery_enabled) is true.
    /// Best effort: the caller ignores the outcome and retries either way.
    fn reconnect_with_device(&self) {}
}

/// Minimal device handle for callers without a discovery stack.
///
/// Rediscovery is disabled and reconnection is a no-op.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    name: String,
    host: String,
    port: u16,
}

impl DeviceInfo {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }
}

impl DeviceHandle for DeviceInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }
}

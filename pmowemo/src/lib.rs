//! Client library for SOAP-controlled smart-home devices
//!
//! This crate invokes remote actions on devices that expose a UPnP-style
//! control protocol (WeMo switches, plugs and their relatives). A device
//! advertises services; each service describes its actions in an SCPD
//! document; each action is called by posting a SOAP envelope to the
//! service control URL.
//!
//! # Features
//!
//! - **Service discovery from descriptions**: fetch and parse a service
//!   description and expose one [`Action`] per described operation
//! - **Dual invocation paths**: blocking calls with a per-call HTTP agent,
//!   or async calls through a shared pooled client
//! - **Bounded retries with reconnection**: transport failures are retried
//!   up to [`MAX_RETRIES`] times with a best-effort device reconnection
//!   hook between attempts
//! - **Session lifecycle**: [`SessionRegistry`] owns the shared async
//!   client, distinguishing clients it created from clients a caller
//!   supplied
//! - **Fault inspection**: opt-in structured view of SOAP faults via
//!   [`soap::find_fault`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pmowemo::{DeviceInfo, Service, ServiceDescriptor, SessionRegistry};
//!
//! fn main() -> pmowemo::Result<()> {
//!     let device = Arc::new(DeviceInfo::new("Living Room", "192.168.1.42", 49153));
//!     let sessions = Arc::new(SessionRegistry::new());
//!
//!     let descriptor = ServiceDescriptor {
//!         service_type: "urn:Belkin:service:basicevent:1".to_string(),
//!         scpd_url: "/eventservice.xml".to_string(),
//!         control_url: "/upnp/control/basicevent1".to_string(),
//!     };
//!
//!     let service = Service::new(device, &descriptor, "http://192.168.1.42:49153", sessions)?;
//!     println!("{}", service);
//!
//!     if let Some(action) = service.action("GetBinaryState") {
//!         let fields = action.invoke(&[])?;
//!         println!("BinaryState = {:?}", fields.get("BinaryState"));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Device discovery itself (SSDP) is out of scope: callers bring their own
//! [`DeviceHandle`] implementation, or use [`DeviceInfo`] when no discovery
//! stack is involved.

pub mod action;
pub mod device;
pub mod error;
pub mod scpd;
pub mod service;
pub mod session;
pub mod soap;

// Re-exports
pub use action::{Action, MAX_RETRIES, REQUEST_TIMEOUT_SECS};
pub use device::{DeviceHandle, DeviceInfo};
pub use error::{Error, Result};
pub use scpd::{ActionDescriptor, parse_scpd};
pub use service::{Service, ServiceDescriptor};
pub use session::{SessionOwnership, SessionRegistry};
pub use soap::{SoapEnvelope, SoapParseError, UpnpError, UpnpFault};

//! SOAP envelopes for UPnP action invocation
//!
//! This module covers the client side of the control protocol:
//!
//! - [`build_action_request`] : render an action call as a SOAP envelope
//! - [`parse_envelope`] : parse a device reply into a [`SoapEnvelope`]
//! - [`response_fields`] : flatten the reply into a tag -> text map
//! - [`find_fault`] : structured view of a SOAP Fault, when one is present
//!
//! Response extraction is intentionally shallow: the body's first child is
//! taken as the result element and only its immediate children are read.
//! Callers that need to distinguish faults from results inspect the parsed
//! envelope with [`find_fault`].
//!
//! ## Example
//!
//! ```
//! use pmowemo::soap::{build_action_request, parse_envelope, response_fields};
//!
//! let request = build_action_request(
//!     "urn:Belkin:service:basicevent:1",
//!     "SetBinaryState",
//!     &[("BinaryState", "1")],
//! ).unwrap();
//! assert!(request.contains("<BinaryState>1</BinaryState>"));
//!
//! let reply = r#"<?xml version="1.0"?>
//! <s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
//!   <s:Body>
//!     <u:SetBinaryStateResponse xmlns:u="urn:Belkin:service:basicevent:1">
//!       <BinaryState>1</BinaryState>
//!     </u:SetBinaryStateResponse>
//!   </s:Body>
//! </s:Envelope>"#;
//!
//! let envelope = parse_envelope(reply.as_bytes()).unwrap();
//! let fields = response_fields(&envelope).unwrap();
//! assert_eq!(fields.get("BinaryState"), Some(&"1".to_string()));
//! ```

mod fault;
mod request;
mod response;

pub use fault::{UpnpError, UpnpFault, find_fault};
pub use request::build_action_request;
pub use response::{SoapParseError, parse_envelope, response_fields};

use xmltree::Element;

/// SOAP envelope namespace
pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SOAP encoding style
pub const SOAP_ENCODING_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";

/// Parsed SOAP envelope
#[derive(Debug, Clone)]
pub struct SoapEnvelope {
    /// Optional SOAP header
    pub header: Option<SoapHeader>,

    /// SOAP body carrying the action result or fault
    pub body: SoapBody,
}

/// SOAP header
#[derive(Debug, Clone)]
pub struct SoapHeader {
    /// Raw XML content of the header
    pub content: Element,
}

/// SOAP body
#[derive(Debug, Clone)]
pub struct SoapBody {
    /// Raw XML content of the body
    pub content: Element,
}

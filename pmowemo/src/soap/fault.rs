//! SOAP Fault inspection
//!
//! Invocation itself never rejects a reply for carrying a fault; these
//! helpers give callers a structured view when they want one.

use xmltree::{Element, XMLNode};

use super::SoapEnvelope;

/// SOAP Fault found in a reply
#[derive(Debug, Clone)]
pub struct UpnpFault {
    /// Fault code (ex: "s:Client")
    pub fault_code: String,

    /// Fault message (ex: "UPnPError")
    pub fault_string: String,

    /// UPnP error detail, when the fault carries one
    pub error: Option<UpnpError>,
}

/// UPnP error detail carried inside a fault
#[derive(Debug, Clone)]
pub struct UpnpError {
    /// Numeric UPnP error code (ex: 401, 501)
    pub error_code: u32,

    /// Human-readable error description
    pub error_description: String,
}

/// Look for a SOAP Fault in a parsed envelope.
///
/// Returns `None` when the body carries a regular action result.
pub fn find_fault(envelope: &SoapEnvelope) -> Option<UpnpFault> {
    let fault = find_child_with_suffix(&envelope.body.content, "Fault")?;

    let fault_code = child_text(fault, "faultcode").unwrap_or_default();
    let fault_string = child_text(fault, "faultstring").unwrap_or_default();
    let error = parse_upnp_error(fault);

    Some(UpnpFault {
        fault_code,
        fault_string,
        error,
    })
}

fn parse_upnp_error(fault: &Element) -> Option<UpnpError> {
    let detail = find_child_with_suffix(fault, "detail")?;
    let upnp_error = find_child_with_suffix(detail, "UPnPError")?;

    let code_text = child_text(upnp_error, "errorCode")?;
    let error_code = code_text.trim().parse::<u32>().ok()?;

    let error_description = child_text(upnp_error, "errorDescription")
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    Some(UpnpError {
        error_code,
        error_description,
    })
}

fn find_child_with_suffix<'a>(parent: &'a Element, suffix: &str) -> Option<&'a Element> {
    parent.children.iter().find_map(|node| match node {
        XMLNode::Element(elem) if elem.name.ends_with(suffix) => Some(elem),
        _ => None,
    })
}

fn child_text(parent: &Element, suffix: &str) -> Option<String> {
    find_child_with_suffix(parent, suffix)
        .and_then(|elem| elem.get_text())
        .map(|t| t.to_string())
}

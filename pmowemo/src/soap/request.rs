//! SOAP request construction

use xmltree::{Element, EmitterConfig, XMLNode};

use super::{SOAP_ENCODING_NS, SOAP_ENVELOPE_NS};

/// Build the SOAP envelope for an action call.
///
/// # Arguments
///
/// * `service_type` - service URN (ex: "urn:Belkin:service:basicevent:1")
/// * `action` - action name (ex: "SetBinaryState")
/// * `args` - list of (name, value) pairs, rendered in call order
///
/// Argument names are not checked against the service description; the
/// device is the authority on what it accepts.
pub fn build_action_request(
    service_type: &str,
    action: &str,
    args: &[(&str, &str)],
) -> Result<String, xmltree::Error> {
    let action_name = format!("u:{}", action);
    let mut action_elem = Element::new(&action_name);
    action_elem
        .attributes
        .insert("xmlns:u".to_string(), service_type.to_string());

    for (name, value) in args {
        let mut child = Element::new(name);
        child.children.push(XMLNode::Text((*value).to_string()));
        action_elem.children.push(XMLNode::Element(child));
    }

    // Body
    let mut body = Element::new("s:Body");
    body.children.push(XMLNode::Element(action_elem));

    // Envelope
    let mut envelope = Element::new("s:Envelope");
    envelope
        .attributes
        .insert("xmlns:s".to_string(), SOAP_ENVELOPE_NS.to_string());
    envelope
        .attributes
        .insert("s:encodingStyle".to_string(), SOAP_ENCODING_NS.to_string());
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(true)
        .indent_string("  ");
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

//! SOAP response parsing

use std::collections::HashMap;
use std::io::BufReader;

use xmltree::Element;

use super::{SoapBody, SoapEnvelope, SoapHeader};

/// SOAP parse error
#[derive(Debug, thiserror::Error)]
pub enum SoapParseError {
    #[error("XML parse error: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("No response element in SOAP Body")]
    NoResponseElement,
}

/// Parse a complete SOAP envelope from raw bytes.
///
/// Element names are matched by suffix so that any namespace prefix
/// (`s:`, `SOAP-ENV:`, none at all) is accepted.
pub fn parse_envelope(xml: &[u8]) -> Result<SoapEnvelope, SoapParseError> {
    let reader = BufReader::new(xml);
    let root = Element::parse(reader)?;

    if !root.name.ends_with("Envelope") {
        return Err(SoapParseError::MissingEnvelope);
    }

    // Header is optional
    let header = root
        .get_child("Header")
        .or_else(|| root.children.iter().find_map(|n| n.as_element()))
        .filter(|e| e.name.ends_with("Header"))
        .map(|e| SoapHeader { content: e.clone() });

    // Body is mandatory
    let body_elem = root
        .get_child("Body")
        .or_else(|| {
            root.children
                .iter()
                .find_map(|n| n.as_element().filter(|e| e.name.ends_with("Body")))
        })
        .ok_or(SoapParseError::MissingBody)?;

    Ok(SoapEnvelope {
        header,
        body: SoapBody {
            content: body_elem.clone(),
        },
    })
}

/// Flatten an invocation reply into a tag -> text map.
///
/// The body's first child element is taken as the result element
/// (`<u:GetBinaryStateResponse>` and the like) and each of its immediate
/// children becomes one entry. Empty elements map to an empty string.
/// Nested structure below that level is not descended into.
pub fn response_fields(envelope: &SoapEnvelope) -> Result<HashMap<String, String>, SoapParseError> {
    let result_elem = envelope
        .body
        .content
        .children
        .iter()
        .find_map(|n| n.as_element())
        .ok_or(SoapParseError::NoResponseElement)?;

    let mut fields = HashMap::new();
    for child in &result_elem.children {
        if let Some(elem) = child.as_element() {
            let value = elem.get_text().unwrap_or_default().to_string();
            fields.insert(elem.name.clone(), value);
        }
    }

    Ok(fields)
}

//! Error types for the device control client

use crate::soap::SoapParseError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to a device
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every invocation attempt failed at the transport level
    #[error("Error communicating with {device} after {attempts} attempts. Giving up.")]
    RetriesExceeded { device: String, attempts: u32 },

    /// HTTP request failed (service description fetch)
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Service description document could not be parsed
    #[error("Invalid service description: {0}")]
    Description(#[from] quick_xml::Error),

    /// Device reply was not a usable SOAP envelope
    #[error("Invalid SOAP response: {0}")]
    Soap(#[from] SoapParseError),

    /// Request envelope could not be serialized
    #[error("Failed to build SOAP request: {0}")]
    Request(#[from] xmltree::Error),
}

//! TLS settings for the default HTTP transport.

use std::path::PathBuf;

use crate::Error;
use crate::error::Result;

/// Trust settings applied to the reqwest client built by the link.
///
/// The platform roots are always trusted. A CA given here is added on top,
/// which is what a GraphQL gateway behind a private CA needs. Ignored when a
/// custom [`HttpTransport`](crate::HttpTransport) is injected.
///
/// ## Example
///
/// ```rust
/// use graphql_upload_link::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/etc/ssl/private-ca.pem")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// PEM file holding an extra root certificate.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// PEM text of an extra root certificate.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Accept any server certificate.
    ///
    /// **WARNING**: only for a local server with a self-signed certificate.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Trust the platform roots and verify certificates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept any server certificate.
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if an extra root certificate is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }

    /// Applies these settings to a reqwest client builder.
    pub(crate) fn configure(
        &self,
        mut builder: reqwest::ClientBuilder,
    ) -> Result<reqwest::ClientBuilder> {
        if self.skip_verification {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref path) = self.ca_cert_file {
            let pem = std::fs::read(path).map_err(|e| {
                Error::configuration(format!("Failed to read CA certificate {:?}: {}", path, e))
                    .with_source(e)
            })?;
            builder = builder.add_root_certificate(parse_certificate(&pem)?);
        }

        if let Some(ref pem) = self.ca_cert_pem {
            builder = builder.add_root_certificate(parse_certificate(pem.as_bytes())?);
        }

        Ok(builder)
    }
}

fn parse_certificate(pem: &[u8]) -> Result<reqwest::Certificate> {
    reqwest::Certificate::from_pem(pem).map_err(|e| {
        Error::configuration(format!("Invalid CA certificate: {}", e)).with_source(e)
    })
}

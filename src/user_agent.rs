//! User-Agent string sent by the default HTTP transport.

use std::sync::OnceLock;

const PRODUCT: &str = "graphql-upload-link";

const VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent for outgoing requests.
///
/// Format: `graphql-upload-link/0.1.0 (linux; x86_64)`
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} ({}; {})",
            PRODUCT,
            VERSION,
            platform(),
            std::env::consts::ARCH
        )
    })
}

fn platform() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

use crate::domain::shared::ProviderError;
use crate::infrastructure::credentials::{Credential, CredentialStore};

pub const PROVIDER: &str = "Azure Speech";

/// Resolve the Azure Speech base URL for a request.
///
/// An explicit endpoint wins; otherwise the region credential is required and
/// combined with the API's host suffix.
pub fn resolve_base_url(
    endpoint: Option<&str>,
    credentials: &dyn CredentialStore,
    host_suffix: &str,
) -> Result<String, ProviderError> {
    if let Some(endpoint) = endpoint {
        return Ok(endpoint.trim_end_matches('/').to_string());
    }

    let region = credentials.require(Credential::AzureSpeechRegion)?;
    Ok(format!("https://{}.{}", region.trim(), host_suffix))
}

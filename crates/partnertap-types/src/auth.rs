//! Partner organization credentials.

use crate::{Result, TapError};

/// Organization identifier and access token for one extraction run.
///
/// The `Debug` output redacts the token.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    organization_id: String,
    access_token: String,
}

impl AuthContext {
    /// Creates a new auth context.
    ///
    /// # Errors
    ///
    /// Returns [`TapError::Config`] if either value is blank.
    pub fn new(
        organization_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        let organization_id = organization_id.into().trim().to_string();
        let access_token = access_token.into().trim().to_string();

        if organization_id.is_empty() {
            return Err(TapError::Config(
                "The parameter organization_id is required".to_string(),
            ));
        }
        if access_token.is_empty() {
            return Err(TapError::Config(
                "The parameter shopify_partners_access_token is required".to_string(),
            ));
        }

        Ok(Self {
            organization_id,
            access_token,
        })
    }

    /// Returns the partner organization id.
    #[must_use]
    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("organization_id", &self.organization_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

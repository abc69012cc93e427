//! DTOs for the link info endpoint.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::domain::lookup::LinkLookup;
use crate::error::AppError;

/// Query string of `GET /api/links/info`.
///
/// All fields are optional; at least one must be present. Empty values
/// (`?linkId=`) are treated as missing.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfoQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 190))]
    pub domain: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 190))]
    pub key: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 255))]
    pub link_id: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 255))]
    pub external_id: Option<String>,
}

impl LinkInfoQuery {
    /// Validates field lengths and identifier presence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is too long or no
    /// identifier is supplied.
    pub fn into_lookup(self) -> Result<LinkLookup, AppError> {
        self.validate()?;
        LinkLookup::from_parts(self.domain, self.key, self.link_id, self.external_id)
    }
}

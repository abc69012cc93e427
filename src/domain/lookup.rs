//! Link identifiers supplied by a caller, validated into a lookup request.
//!
//! A caller may identify a link by `domain` + `key`, by `linkId` or by
//! `externalId`, in any combination. [`LinkLookup`] is the only way to carry
//! those identifiers past the API boundary and it can't be built empty, so
//! downstream code never re-checks field presence. Which selector wins when
//! several are given is decided by the [`LinkRepository`] implementation,
//! not here.
//!
//! [`LinkRepository`]: crate::domain::repositories::LinkRepository

use serde_json::json;

use crate::error::AppError;

const MISSING_IDENTIFIER: &str =
    "You must provide a domain and a key or a linkId or an externalId to retrieve a link.";

/// One way of pointing at a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSelector {
    /// Routing attributes. At least one side is present. Only the full pair
    /// identifies a link; resolvers treat a lone side as matching nothing.
    DomainKey {
        domain: Option<String>,
        key: Option<String>,
    },
    LinkId(String),
    ExternalId(String),
}

/// A validated, non-empty set of link selectors in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkLookup {
    selectors: Vec<LinkSelector>,
}

impl LinkLookup {
    /// Builds a lookup from optional request fields.
    ///
    /// Surrounding whitespace is trimmed and empty strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if none of `domain`, `key`, `link_id`
    /// or `external_id` is present.
    pub fn from_parts(
        domain: Option<String>,
        key: Option<String>,
        link_id: Option<String>,
        external_id: Option<String>,
    ) -> Result<Self, AppError> {
        let domain = non_empty(domain);
        let key = non_empty(key);
        let link_id = non_empty(link_id);
        let external_id = non_empty(external_id);

        let mut selectors = Vec::with_capacity(3);

        if domain.is_some() || key.is_some() {
            selectors.push(LinkSelector::DomainKey { domain, key });
        }
        if let Some(id) = link_id {
            selectors.push(LinkSelector::LinkId(id));
        }
        if let Some(id) = external_id {
            selectors.push(LinkSelector::ExternalId(id));
        }

        if selectors.is_empty() {
            return Err(AppError::bad_request(
                MISSING_IDENTIFIER,
                json!({ "accepted": ["domain", "key", "linkId", "externalId"] }),
            ));
        }

        Ok(Self { selectors })
    }

    pub fn selectors(&self) -> &[LinkSelector] {
        &self.selectors
    }

    pub fn domain_key(&self) -> Option<(Option<&str>, Option<&str>)> {
        self.selectors.iter().find_map(|s| match s {
            LinkSelector::DomainKey { domain, key } => Some((domain.as_deref(), key.as_deref())),
            _ => None,
        })
    }

    pub fn link_id(&self) -> Option<&str> {
        self.selectors.iter().find_map(|s| match s {
            LinkSelector::LinkId(id) => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn external_id(&self) -> Option<&str> {
        self.selectors.iter().find_map(|s| match s {
            LinkSelector::ExternalId(id) => Some(id.as_str()),
            _ => None,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

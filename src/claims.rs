//! Bearer-token claims extraction.
//!
//! This module decodes the claims payload of a bearer token presented in an
//! `Authorization` header. It performs **no cryptographic verification**:
//! signature, issuer, audience, and expiry are checked upstream (the fronting
//! proxy and policy engine) before a request ever reaches this service. Any
//! future verifying decoder must be a separate function so that parsing and
//! authentication never get conflated.
//!
//! Every malformed-input path degrades to [`Identity::anonymous`] rather than
//! surfacing an error: a bad token is treated exactly like no token.

use std::collections::HashSet;

use base64ct::{Base64UrlUnpadded, Encoding};
use serde_json::Value;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity derived from a bearer token's claims.
///
/// Produced fresh per request and immutable afterwards. The role set is a
/// proper set: duplicate role entries in the token collapse, and insertion
/// order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// `preferred_username` claim; empty when absent.
    pub subject: String,
    /// `realm_access.roles` claim; empty when absent or malformed.
    pub roles: HashSet<String>,
}

impl Identity {
    /// The role-less identity used for unauthenticated or unparseable calls.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Extract an [`Identity`] from an `Authorization` header value.
///
/// An absent header, a non-`Bearer` scheme, a token with fewer than two
/// dot-delimited segments, or a payload segment that is not base64url-encoded
/// JSON all yield the anonymous identity. This function never fails.
pub fn extract(header: Option<&str>) -> Identity {
    let Some(token) = header.and_then(|h| h.strip_prefix(BEARER_PREFIX)) else {
        return Identity::anonymous();
    };

    let mut segments = token.split('.');
    let payload_b64 = match (segments.next(), segments.next()) {
        (Some(_header), Some(payload)) => payload,
        _ => return Identity::anonymous(),
    };

    // Some issuers pad their base64url; tolerate it.
    let payload_b64 = payload_b64.trim_end_matches('=');
    let payload_bytes = match Base64UrlUnpadded::decode_vec(payload_b64) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(%err, "bearer token payload is not valid base64url");
            return Identity::anonymous();
        }
    };

    let payload: Value = match serde_json::from_slice(&payload_bytes) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(%err, "bearer token payload is not valid JSON");
            return Identity::anonymous();
        }
    };

    let subject = payload
        .get("preferred_username")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // realm_access.roles absent or not an array reads as no roles; the
    // subject claim is still honored.
    let roles = payload
        .get("realm_access")
        .and_then(|ra| ra.get("roles"))
        .and_then(Value::as_array)
        .map(|roles| {
            roles
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    Identity { subject, roles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bearer_with_payload(payload: &Value) -> String {
        let encoded = Base64UrlUnpadded::encode_string(payload.to_string().as_bytes());
        format!("Bearer hdr.{encoded}.sig")
    }

    #[test]
    fn test_absent_header_is_anonymous() {
        assert_eq!(extract(None), Identity::anonymous());
    }

    #[test]
    fn test_non_bearer_scheme_is_anonymous() {
        assert_eq!(extract(Some("Basic dXNlcjpwYXNz")), Identity::anonymous());
        // Scheme match is literal, including the space
        assert_eq!(extract(Some("bearer abc.def.ghi")), Identity::anonymous());
        assert_eq!(extract(Some("Bearer")), Identity::anonymous());
    }

    #[test]
    fn test_too_few_segments_is_anonymous() {
        assert_eq!(extract(Some("Bearer ")), Identity::anonymous());
        assert_eq!(extract(Some("Bearer justonesegment")), Identity::anonymous());
    }

    #[test]
    fn test_invalid_base64_payload_is_anonymous() {
        assert_eq!(extract(Some("Bearer hdr.!!!not-base64!!!.sig")), Identity::anonymous());
    }

    #[test]
    fn test_non_json_payload_is_anonymous() {
        let encoded = Base64UrlUnpadded::encode_string(b"this is not json");
        let header = format!("Bearer hdr.{encoded}.sig");
        assert_eq!(extract(Some(&header)), Identity::anonymous());
    }

    #[test]
    fn test_round_trip_employee_token() {
        let header = bearer_with_payload(&json!({
            "realm_access": { "roles": ["employee"] },
            "preferred_username": "bob",
        }));
        let identity = extract(Some(&header));
        assert_eq!(identity.subject, "bob");
        assert_eq!(identity.roles, HashSet::from(["employee".to_string()]));
    }

    #[test]
    fn test_missing_realm_access_keeps_subject() {
        let header = bearer_with_payload(&json!({ "preferred_username": "carol" }));
        let identity = extract(Some(&header));
        assert_eq!(identity.subject, "carol");
        assert!(identity.roles.is_empty());
    }

    #[test]
    fn test_roles_not_a_sequence_reads_as_empty() {
        let header = bearer_with_payload(&json!({
            "preferred_username": "dave",
            "realm_access": { "roles": "manager" },
        }));
        let identity = extract(Some(&header));
        assert_eq!(identity.subject, "dave");
        assert!(identity.roles.is_empty());
    }

    #[test]
    fn test_missing_username_reads_as_empty_subject() {
        let header = bearer_with_payload(&json!({
            "realm_access": { "roles": ["manager"] },
        }));
        let identity = extract(Some(&header));
        assert_eq!(identity.subject, "");
        assert_eq!(identity.roles, HashSet::from(["manager".to_string()]));
    }

    #[test]
    fn test_duplicate_roles_collapse() {
        let header = bearer_with_payload(&json!({
            "realm_access": { "roles": ["employee", "employee", "employee"] },
        }));
        let identity = extract(Some(&header));
        assert_eq!(identity.roles.len(), 1);
    }

    #[test]
    fn test_padded_base64url_is_tolerated() {
        let payload = json!({ "preferred_username": "eve" }).to_string();
        let mut encoded = Base64UrlUnpadded::encode_string(payload.as_bytes());
        while encoded.len() % 4 != 0 {
            encoded.push('=');
        }
        let header = format!("Bearer hdr.{encoded}.sig");
        assert_eq!(extract(Some(&header)).subject, "eve");
    }

    #[test]
    fn test_non_string_role_entries_are_skipped() {
        let header = bearer_with_payload(&json!({
            "realm_access": { "roles": ["manager", 42, null] },
        }));
        let identity = extract(Some(&header));
        assert_eq!(identity.roles, HashSet::from(["manager".to_string()]));
    }
}

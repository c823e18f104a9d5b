/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::canonical::CanonicalPolicy;
use crate::error::SigningError;
use crate::validate::validate_policy;
use aws_smithy_types::DateTime;
use serde_json::{Map, Value};

pub(crate) const STATEMENT: &str = "Statement";
pub(crate) const RESOURCE: &str = "Resource";
pub(crate) const CONDITION: &str = "Condition";
pub(crate) const DATE_LESS_THAN: &str = "DateLessThan";
pub(crate) const DATE_GREATER_THAN: &str = "DateGreaterThan";
pub(crate) const IP_ADDRESS: &str = "IpAddress";
pub(crate) const EPOCH_TIME: &str = "AWS:EpochTime";
pub(crate) const SOURCE_IP: &str = "AWS:SourceIp";

/// A caller-authored CloudFront access policy.
///
/// The document is signed as-is, in its original key order, after it passes
/// schema validation. Only the first statement of a policy is validated or
/// interpreted; see [`CustomPolicy::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct CustomPolicy {
    document: Value,
}

impl CustomPolicy {
    /// Creates a builder for a single-statement policy.
    pub fn builder() -> CustomPolicyBuilder {
        CustomPolicyBuilder::default()
    }

    /// Parses a policy from JSON text, keeping its key order.
    pub fn from_json(json: &str) -> Result<Self, SigningError> {
        let document = serde_json::from_str(json)
            .map_err(|err| SigningError::malformed_policy("policy is not valid JSON", err))?;
        Ok(Self { document })
    }

    /// Wraps an already parsed policy document.
    pub fn from_value(document: Value) -> Self {
        Self { document }
    }

    /// Returns true when the document has no content (`null`, `{}` or `[]`).
    ///
    /// An empty custom policy does not select custom mode.
    pub fn is_empty(&self) -> bool {
        match &self.document {
            Value::Null => true,
            Value::Object(members) => members.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Checks the policy against the CloudFront policy schema.
    ///
    /// `Statement` may be one statement object or a non-empty array of them.
    /// Only the first statement is checked; later statements are ignored.
    /// The first statement needs a string `Resource` and a `Condition` whose
    /// keys are `DateLessThan`, `DateGreaterThan` or `IpAddress`, each holding
    /// only its own sub-key (`AWS:EpochTime` as an integer, or `AWS:SourceIp`
    /// as a string). An empty `Condition` is accepted.
    pub fn validate(&self) -> Result<(), SigningError> {
        validate_policy(&self.document)
    }

    /// Returns the policy document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Returns the canonical form of this policy.
    pub fn to_canonical(&self) -> CanonicalPolicy {
        CanonicalPolicy::from_document(&self.document)
    }
}

impl From<Value> for CustomPolicy {
    fn from(document: Value) -> Self {
        Self::from_value(document)
    }
}

/// Builder for [`CustomPolicy`].
///
/// Produces `{"Statement":[{"Resource":..,"Condition":{..}}]}` with conditions
/// in the order `DateLessThan`, `DateGreaterThan`, `IpAddress`.
#[derive(Debug, Default)]
pub struct CustomPolicyBuilder {
    resource: Option<String>,
    expires_at: Option<DateTime>,
    starts_at: Option<DateTime>,
    ip_range: Option<String>,
}

impl CustomPolicyBuilder {
    /// Sets the resource URL or URL pattern (`*` and `?` wildcards).
    pub fn resource(mut self, url: impl Into<String>) -> Self {
        self.resource = Some(url.into());
        self
    }

    /// Sets the required expiration time (`DateLessThan`).
    pub fn expires_at(mut self, time: DateTime) -> Self {
        self.expires_at = Some(time);
        self
    }

    /// Sets a not-valid-before time (`DateGreaterThan`).
    pub fn starts_at(mut self, time: DateTime) -> Self {
        self.starts_at = Some(time);
        self
    }

    /// Sets a source IP restriction in CIDR notation (`IpAddress`).
    pub fn ip_range(mut self, cidr: impl Into<String>) -> Self {
        self.ip_range = Some(cidr.into());
        self
    }

    /// Builds the policy.
    pub fn build(self) -> Result<CustomPolicy, SigningError> {
        let resource = self
            .resource
            .ok_or_else(|| SigningError::invalid_policy("resource is required"))?;
        let expires_at = self
            .expires_at
            .ok_or_else(|| SigningError::invalid_policy("expires_at is required"))?
            .secs();

        let mut condition = Map::new();
        condition.insert(DATE_LESS_THAN.into(), epoch_time(expires_at));

        if let Some(starts_at) = self.starts_at.map(|dt| dt.secs()) {
            if starts_at >= expires_at {
                return Err(SigningError::invalid_policy(
                    "starts_at must be before expires_at",
                ));
            }
            condition.insert(DATE_GREATER_THAN.into(), epoch_time(starts_at));
        }

        if let Some(ip) = self.ip_range {
            let mut source_ip = Map::new();
            source_ip.insert(SOURCE_IP.into(), Value::String(ip));
            condition.insert(IP_ADDRESS.into(), Value::Object(source_ip));
        }

        let mut statement = Map::new();
        statement.insert(RESOURCE.into(), Value::String(resource));
        statement.insert(CONDITION.into(), Value::Object(condition));

        let mut document = Map::new();
        document.insert(
            STATEMENT.into(),
            Value::Array(vec![Value::Object(statement)]),
        );

        Ok(CustomPolicy::from_value(Value::Object(document)))
    }
}

fn epoch_time(secs: i64) -> Value {
    let mut body = Map::new();
    body.insert(EPOCH_TIME.into(), Value::from(secs));
    Value::Object(body)
}

/// The minimal policy: one statement whose only condition is the expiry.
pub(crate) fn canned_policy(
    resource: &str,
    expires_at: DateTime,
) -> Result<CustomPolicy, SigningError> {
    CustomPolicy::builder()
        .resource(resource)
        .expires_at(expires_at)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_canned_policy() {
        let policy = canned_policy(
            "https://d111111abcdef8.cloudfront.net/image.jpg",
            DateTime::from_secs(1767290400),
        )
        .expect("valid canned policy");

        assert_eq!(
            policy.to_canonical().as_str(),
            r#"{"Statement":[{"Resource":"https://d111111abcdef8.cloudfront.net/image.jpg","Condition":{"DateLessThan":{"AWS:EpochTime":1767290400}}}]}"#
        );
        let statements = policy.document()["Statement"].as_array().unwrap();
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0]["Condition"].as_object().unwrap().len(), 1);
        policy.validate().unwrap();
    }

    #[test]
    fn test_custom_policy_with_starts_at() {
        let policy = CustomPolicy::builder()
            .resource("https://d111111abcdef8.cloudfront.net/*")
            .expires_at(DateTime::from_secs(1767290400))
            .starts_at(DateTime::from_secs(1767200000))
            .build()
            .expect("valid custom policy");

        let json = policy.to_canonical().into_string();
        assert!(json.contains(r#""DateGreaterThan":{"AWS:EpochTime":1767200000}"#));
        policy.validate().unwrap();
    }

    #[test]
    fn test_custom_policy_with_ip_range() {
        let policy = CustomPolicy::builder()
            .resource("https://d111111abcdef8.cloudfront.net/video.mp4")
            .expires_at(DateTime::from_secs(1767290400))
            .ip_range("192.0.2.0/24")
            .starts_at(DateTime::from_secs(1767200000))
            .build()
            .expect("valid custom policy");

        assert_eq!(
            policy.to_canonical().as_str(),
            r#"{"Statement":[{"Resource":"https://d111111abcdef8.cloudfront.net/video.mp4","Condition":{"DateLessThan":{"AWS:EpochTime":1767290400},"DateGreaterThan":{"AWS:EpochTime":1767200000},"IpAddress":{"AWS:SourceIp":"192.0.2.0/24"}}}]}"#
        );
        policy.validate().unwrap();
    }

    #[test]
    fn test_missing_resource() {
        let err = CustomPolicy::builder()
            .expires_at(DateTime::from_secs(1767290400))
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPolicy);
    }

    #[test]
    fn test_missing_expires_at() {
        let err = CustomPolicy::builder()
            .resource("https://example.com/file.txt")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPolicy);
    }

    #[test]
    fn test_starts_at_after_expires_at() {
        let err = CustomPolicy::builder()
            .resource("https://example.com/file.txt")
            .expires_at(DateTime::from_secs(1767200000))
            .starts_at(DateTime::from_secs(1767290400))
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid policy: starts_at must be before expires_at");
    }

    #[test]
    fn from_json_keeps_key_order() {
        let policy = CustomPolicy::from_json(
            r#"{"Statement": {"Condition": {"DateLessThan": {"AWS:EpochTime": 2000000000}}, "Resource": "https://x/y"}}"#,
        )
        .unwrap();
        assert_eq!(
            policy.to_canonical().as_str(),
            r#"{"Statement":{"Condition":{"DateLessThan":{"AWS:EpochTime":2000000000}},"Resource":"https://x/y"}}"#
        );
    }

    #[test]
    fn from_json_rejects_malformed_text() {
        let err = CustomPolicy::from_json(r#"{"Statement": "#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPolicy);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn emptiness() {
        assert!(CustomPolicy::from_value(json!(null)).is_empty());
        assert!(CustomPolicy::from_value(json!({})).is_empty());
        assert!(CustomPolicy::from_value(json!([])).is_empty());
        assert!(!CustomPolicy::from_value(json!({"Statement": []})).is_empty());
    }
}

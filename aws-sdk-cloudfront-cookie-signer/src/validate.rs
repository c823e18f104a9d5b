/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Custom policy schema validation.
//!
//! A custom policy must look like this:
//!
//! ```json
//! {
//!     "Statement": [
//!         {
//!             "Resource": "URL of the file",
//!             "Condition": {
//!                 "DateLessThan": { "AWS:EpochTime": 1767290400 },
//!                 "DateGreaterThan": { "AWS:EpochTime": 1767200000 },
//!                 "IpAddress": { "AWS:SourceIp": "192.0.2.0/24" }
//!             }
//!         }
//!     ]
//! }
//! ```
//!
//! `Statement` may also be a single object. Only the first statement is ever
//! examined; any later statements are neither validated nor interpreted, and
//! CloudFront is expected to act on the first one alone.

use crate::error::SigningError;
use crate::policy::{
    CONDITION, DATE_GREATER_THAN, DATE_LESS_THAN, EPOCH_TIME, IP_ADDRESS, RESOURCE, SOURCE_IP,
    STATEMENT,
};
use serde_json::{Map, Value};

/// The `Statement` member of a policy.
#[derive(Debug)]
enum Statements<'a> {
    Single(&'a Map<String, Value>),
    Many(&'a [Value]),
}

impl<'a> Statements<'a> {
    fn from_document(document: &'a Value) -> Result<Self, SigningError> {
        let statement = document
            .get(STATEMENT)
            .ok_or_else(|| SigningError::invalid_policy("policy is missing Statement"))?;

        match statement {
            Value::Object(single) if !single.is_empty() => Ok(Statements::Single(single)),
            Value::Array(many) if !many.is_empty() => Ok(Statements::Many(many)),
            Value::Null | Value::Object(_) | Value::Array(_) => {
                Err(SigningError::invalid_policy("policy statement is empty"))
            }
            other => Err(SigningError::invalid_policy(format!(
                "policy Statement must be an object or an array of objects, not '{}'",
                type_name(other)
            ))),
        }
    }

    fn first(&self) -> Result<&'a Map<String, Value>, SigningError> {
        match self {
            Statements::Single(statement) => Ok(statement),
            Statements::Many(statements) => statements[0].as_object().ok_or_else(|| {
                SigningError::invalid_policy(format!(
                    "policy statement must be of type 'object', not '{}'",
                    type_name(&statements[0])
                ))
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConditionKind {
    DateLessThan,
    DateGreaterThan,
    IpAddress,
}

impl ConditionKind {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            DATE_LESS_THAN => Some(Self::DateLessThan),
            DATE_GREATER_THAN => Some(Self::DateGreaterThan),
            IP_ADDRESS => Some(Self::IpAddress),
            _ => None,
        }
    }

    fn sub_key(self) -> &'static str {
        match self {
            Self::DateLessThan | Self::DateGreaterThan => EPOCH_TIME,
            Self::IpAddress => SOURCE_IP,
        }
    }

    fn check_value(self, value: &Value) -> Result<(), SigningError> {
        let (ok, expected) = match self {
            Self::DateLessThan | Self::DateGreaterThan => (is_integer(value), "integer"),
            Self::IpAddress => (value.is_string(), "string"),
        };
        if ok {
            return Ok(());
        }
        Err(SigningError::invalid_policy(format!(
            "{} value must be of type '{expected}', not '{}'",
            self.sub_key(),
            type_name(value)
        )))
    }
}

/// Checks `document` against the custom policy schema without modifying it.
pub(crate) fn validate_policy(document: &Value) -> Result<(), SigningError> {
    let statement = Statements::from_document(document)?.first()?;

    let (Some(condition), Some(resource)) = (statement.get(CONDITION), statement.get(RESOURCE))
    else {
        return Err(SigningError::invalid_policy(
            "policy statement must have Condition block",
        ));
    };

    let conditions = condition.as_object().ok_or_else(|| {
        SigningError::invalid_policy(format!(
            "policy statement Condition must be of type 'object', not '{}'",
            type_name(condition)
        ))
    })?;

    for (key, body) in conditions {
        let kind = ConditionKind::from_key(key).ok_or_else(|| {
            SigningError::invalid_policy(format!(
                "invalid condition key: {key} - key must be DateLessThan, DateGreaterThan, or IpAddress"
            ))
        })?;
        let body = body.as_object().ok_or_else(|| {
            SigningError::invalid_policy(format!(
                "condition key value must be of type 'object', not '{}'",
                type_name(body)
            ))
        })?;
        for (sub_key, value) in body {
            if sub_key != kind.sub_key() {
                return Err(SigningError::invalid_policy(format!(
                    "invalid condition key sub-key found: {sub_key}"
                )));
            }
            kind.check_value(value)?;
        }
    }

    if !resource.is_string() {
        return Err(SigningError::invalid_resource_type(format!(
            "provided Resource must be of type 'string', not '{}'",
            type_name(resource)
        )));
    }

    Ok(())
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) if is_integer(value) => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Request bodies before and after rewriting.

use serde::Serialize;
use serde_json::Value;

use crate::types::{Operation, Variables};

/// The structured request built from an [`Operation`].
///
/// `operation` is a second name slot that the rewriter reads for its
/// `operationName`. Bodies built by [`RequestBody::from_operation`] leave it
/// unset; it only carries a value when a custom pipeline fills it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// The operation name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,

    /// Secondary operation name read by the rewriter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    /// The query text.
    pub query: String,

    /// The variable bindings.
    pub variables: Variables,

    /// Extension metadata, present only when extensions are included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl RequestBody {
    /// Builds the body for an operation.
    pub fn from_operation(operation: &Operation, include_extensions: bool) -> Self {
        Self {
            operation_name: operation.name().map(str::to_owned),
            operation: None,
            query: operation.query().to_owned(),
            variables: operation.variable_map().clone(),
            extensions: if include_extensions {
                operation.extension_data().cloned()
            } else {
                None
            },
        }
    }
}

/// The body that actually goes on the wire: the rewritten query with its
/// variables inlined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewrittenBody {
    /// Copied from [`RequestBody::operation`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,

    /// The rewritten query text.
    pub query: String,

    /// Always `None`, serialized as `null`.
    pub variables: Option<Variables>,

    /// Copied from [`RequestBody::extensions`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_operation() {
        let operation = Operation::new("query Q { a }")
            .operation_name("Q")
            .variable("x", 1)
            .extensions(json!({ "persisted": true }));

        let body = RequestBody::from_operation(&operation, false);
        assert_eq!(body.operation_name.as_deref(), Some("Q"));
        assert!(body.operation.is_none());
        assert!(body.extensions.is_none());

        let body = RequestBody::from_operation(&operation, true);
        assert_eq!(body.extensions, Some(json!({ "persisted": true })));
    }

    #[test]
    fn test_serialized_field_names() {
        let body = RequestBody {
            operation_name: Some("Q".into()),
            query: "{ a }".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "operationName": "Q", "query": "{ a }", "variables": {} })
        );

        let rewritten = RewrittenBody {
            operation_name: None,
            query: " query { a } ".into(),
            variables: None,
            extensions: None,
        };
        assert_eq!(
            serde_json::to_string(&rewritten).unwrap(),
            r#"{"query":" query { a } ","variables":null}"#
        );

        let rewritten = RewrittenBody {
            extensions: Some(json!({ "persisted": true })),
            ..rewritten
        };
        assert_eq!(
            serde_json::to_string(&rewritten).unwrap(),
            r#"{"query":" query { a } ","variables":null,"extensions":{"persisted":true}}"#
        );
    }
}

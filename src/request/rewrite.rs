//! Textual query rewriting.
//!
//! Every request body is rewritten before it is sent: the selection set is
//! lifted out of the query, each `$variable` placeholder is replaced with the
//! variable's literal text, and the result is wrapped in a bare `query { }`
//! document. The substitution is purely textual. It does not parse GraphQL,
//! does not escape quotes inside string values, and substitutes variables in
//! map order, so a placeholder that is a prefix of another (`$id` inside
//! `$idExtra`) can capture the longer one.

use regex::{NoExpand, RegexBuilder};

use crate::Error;
use crate::error::Result;
use crate::request::{RequestBody, RewrittenBody};
use crate::types::InputValue;

/// Rewrites a request body into its wire form.
///
/// The rewritten `operationName` comes from [`RequestBody::operation`],
/// `variables` is always `None`, and `extensions` is carried over unchanged.
///
/// # Errors
///
/// Returns [`ErrorKind::Serialization`](crate::ErrorKind::Serialization) if a
/// variable has no textual form (a non-finite float, or a list or object that
/// still holds an upload).
pub fn rewrite_query(body: &RequestBody) -> Result<RewrittenBody> {
    let mut selection = selection_set(&body.query).to_owned();

    for (key, value) in &body.variables {
        let literal = literal(key, value)?;
        let pattern = RegexBuilder::new(&format!(r"\${}", regex::escape(key)))
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                Error::serialization(format!("Invalid variable name {:?}: {}", key, e))
                    .with_source(e)
            })?;
        selection = pattern
            .replace(&selection, NoExpand(&literal))
            .into_owned();
    }

    selection.retain(|c| c != '\n' && c != '\r');

    Ok(RewrittenBody {
        operation_name: body.operation.clone(),
        query: format!(" query {{ {selection} }} "),
        variables: None,
        extensions: body.extensions.clone(),
    })
}

/// Returns the text between the first `{` and the last `}`.
///
/// Falls back to the whole query when either brace is missing.
pub fn selection_set(query: &str) -> &str {
    match (query.find('{'), query.rfind('}')) {
        (Some(open), Some(close)) if open < close => &query[open + 1..close],
        _ => query,
    }
}

// `id` keys and numbers go in bare; everything else is single-quoted as is.
fn literal(key: &str, value: &InputValue) -> Result<String> {
    let text = raw_text(value)?;
    if key.eq_ignore_ascii_case("id") || value.is_number() {
        Ok(text)
    } else {
        Ok(format!("'{text}'"))
    }
}

/// Returns the textual form of a variable value.
pub fn raw_text(value: &InputValue) -> Result<String> {
    match value {
        InputValue::Null | InputValue::Upload(_) => Ok("null".to_owned()),
        InputValue::Bool(b) => Ok(b.to_string()),
        InputValue::Integer(i) => Ok(i.to_string()),
        InputValue::Float(f) if f.is_finite() => Ok(f.to_string()),
        InputValue::Float(f) => Err(Error::serialization(format!(
            "non-finite number {f} cannot be inlined"
        ))),
        InputValue::String(s) => Ok(s.clone()),
        InputValue::List(_) | InputValue::Object(_) => serde_json::to_string(value).map_err(|e| {
            Error::serialization(format!("Variable is not serializable: {}", e)).with_source(e)
        }),
    }
}

//! JSON payload serialization.

use serde::Serialize;

use crate::Error;
use crate::error::Result;

/// Serializes a request body to compact JSON text.
///
/// Fails with [`ErrorKind::Serialization`](crate::ErrorKind::Serialization)
/// when the body holds a value with no JSON form: a non-finite float or a
/// file upload that was not extracted.
pub fn serialize_payload<T: Serialize + ?Sized>(body: &T) -> Result<String> {
    serde_json::to_string(body).map_err(|e| {
        Error::serialization(format!("Payload is not serializable: {}", e)).with_source(e)
    })
}

//! Request preparation: body construction, file extraction, query rewriting,
//! serialization and wire encoding.

mod body;
mod extract;
mod multipart;
mod rewrite;
mod serialize;

pub use body::{RequestBody, RewrittenBody};
pub use extract::{DefaultFileExtractor, Extraction, FileExtractor};
pub use multipart::{FilePart, MultipartBody, WireBody, encode_body};
pub use rewrite::{raw_text, rewrite_query, selection_set};
pub use serialize::serialize_payload;

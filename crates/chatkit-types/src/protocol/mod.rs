//! Provider wire types.
//!
//! Bodies for the OpenAI Responses API family (session-scoped, thread-scoped,
//! stateless) and the response object they all return.

pub mod responses;

pub use responses::{
    FileSearchResources, Metadata, OutputContent, OutputItem, ResponseCreateRequest,
    ResponseObject, ThreadCreateRequest, ThreadObject, Tool, ToolResources, FILE_SEARCH_TOOL,
};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! Shape of the urls-by-domain API response.
//!
//! ```json
//! { "data": { "<group>": [ { "url": "...", "occurrence": 3, "type": "..." } ] } }
//! ```
//!
//! A missing or `null` `data` field is `ApiResponse::data == None`; that is the
//! "nothing to show, nothing to save" branch.

mod data;
mod record;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

pub use data::{UrlData, UrlGroup};
pub use record::{Occurrence, UrlRecord};

/// Top-level response body. Unknown top-level fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<UrlData>,
}

/// Serialize `value` as JSON indented with four spaces.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    use serde::ser::Error as _;

    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

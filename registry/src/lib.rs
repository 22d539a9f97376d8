pub mod json;
mod record;

pub use json::Registry;
pub use record::Record;

#[cfg(feature = "compact")]
use compact_str::CompactString as StringRepr;
#[cfg(not(feature = "compact"))]
use std::string::String as StringRepr;

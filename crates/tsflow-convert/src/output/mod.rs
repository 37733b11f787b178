//! Output writers - serialize converted files.

#[cfg(feature = "write-flow")]
pub mod flow;

#[cfg(feature = "write-json")]
pub mod json;

#[cfg(feature = "write-flow")]
pub use flow::{FLOW_WRITER, FlowWriter, FlowWriterImpl};

#[cfg(feature = "write-json")]
pub use json::{JSON_WRITER, JsonWriter};

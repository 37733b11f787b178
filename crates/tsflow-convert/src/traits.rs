//! Traits for output writers.

use crate::convert::ConvertedFile;

/// A writer serializes a converted file.
pub trait Writer: Send + Sync {
    /// Format identifier (e.g., "flow", "json").
    fn format(&self) -> &'static str;

    /// File extension for output (e.g., "js.flow").
    fn extension(&self) -> &'static str;

    /// Serialize the converted file.
    fn write(&self, file: &ConvertedFile) -> String;
}

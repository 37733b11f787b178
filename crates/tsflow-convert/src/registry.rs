//! Registry for output writers.

use crate::traits::Writer;
use std::sync::{OnceLock, RwLock};

/// Global writer registry.
static WRITERS: RwLock<Vec<&'static dyn Writer>> = RwLock::new(Vec::new());
static WRITERS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom writer.
pub fn register_writer(writer: &'static dyn Writer) {
    WRITERS.write().unwrap().push(writer);
}

fn init_writers() {
    WRITERS_INITIALIZED.get_or_init(|| {
        #[cfg(feature = "write-flow")]
        {
            register_writer(&crate::output::flow::FLOW_WRITER);
        }
        #[cfg(feature = "write-json")]
        {
            register_writer(&crate::output::json::JSON_WRITER);
        }
    });
}

/// Get a writer by format name.
pub fn writer_for_format(format: &str) -> Option<&'static dyn Writer> {
    init_writers();
    WRITERS
        .read()
        .unwrap()
        .iter()
        .find(|w| w.format() == format)
        .copied()
}

/// Get all registered writers.
pub fn writers() -> Vec<&'static dyn Writer> {
    init_writers();
    WRITERS.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "write-flow")]
    fn test_flow_writer_lookup() {
        let writer = writer_for_format("flow").expect("flow writer");
        assert_eq!(writer.format(), "flow");
        assert_eq!(writer.extension(), "js.flow");
    }

    #[test]
    #[cfg(feature = "write-json")]
    fn test_json_writer_lookup() {
        let writer = writer_for_format("json").expect("json writer");
        assert_eq!(writer.extension(), "json");
    }

    #[test]
    fn test_unknown_format() {
        assert!(writer_for_format("typescript").is_none());
    }

    #[test]
    #[cfg(all(feature = "write-flow", feature = "write-json"))]
    fn test_writers_listed_once() {
        let formats: Vec<_> = writers().iter().map(|w| w.format()).collect();
        assert_eq!(formats, vec!["flow", "json"]);
    }
}

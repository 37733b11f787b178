//! JSON writer: the converted IR and diagnostics, for tooling.

use crate::convert::ConvertedFile;
use crate::traits::Writer;

/// Static instance of the JSON writer for registry.
pub static JSON_WRITER: JsonWriter = JsonWriter;

pub struct JsonWriter;

impl Writer for JsonWriter {
    fn format(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, file: &ConvertedFile) -> String {
        // The IR has no maps with non-string keys, so serialization can't fail.
        serde_json::to_string_pretty(file).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert_source_file;
    use crate::input::SourceFile;
    use crate::rewrite::RewriteConfig;

    #[test]
    fn test_json_shape() {
        let source = SourceFile::parse("a.d.ts", "type A = string | 'b';\nenum E {}").unwrap();
        let converted = convert_source_file(&source, RewriteConfig::builtin());
        let value: serde_json::Value = serde_json::from_str(&JSON_WRITER.write(&converted)).unwrap();
        assert_eq!(value["file"]["name"], "a.d.ts");
        assert_eq!(value["diagnostics"], serde_json::json!([]));

        insta::assert_json_snapshot!(converted.file.body, @r###"
        [
          {
            "declaration": {
              "type_alias": {
                "id": "A",
                "type_params": null,
                "right": {
                  "union": [
                    "string",
                    {
                      "string_literal": {
                        "value": "b",
                        "raw": "'b'"
                      }
                    }
                  ]
                }
              }
            }
          },
          {
            "empty": {
              "comments": [
                {
                  "text": "tsflow-unimplemented: EnumDeclaration",
                  "placement": "leading"
                },
                {
                  "text": "enum E {}",
                  "placement": "trailing"
                }
              ]
            }
          }
        ]
        "###);
    }
}

//! Writer settings.

use helios_contract::StreamingState;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Limits and output options for one serializer.
///
/// Every field has a default, so partial JSON documents are accepted:
///
/// ```
/// use helios_contract_xml::WriterSettings;
///
/// let settings = WriterSettings::from_json_str(r#"{ "maxDepth": 16 }"#)?;
/// assert_eq!(settings.max_depth, 16);
/// assert_eq!(settings.max_items_in_object_graph, i32::MAX as usize);
/// # Ok::<(), helios_contract_xml::WriteError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriterSettings {
    /// Upper bound on members, array items and collection entries per write.
    pub max_items_in_object_graph: usize,
    /// Upper bound on nested class and collection contracts per write.
    pub max_depth: usize,
    /// Spaces per nesting level; `None` writes compact XML.
    pub indent: Option<usize>,
    /// Emit an XML declaration before the root element.
    pub write_declaration: bool,
    /// Passed to lifecycle hooks.
    pub streaming_state: StreamingState,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            max_items_in_object_graph: i32::MAX as usize,
            max_depth: 512,
            indent: None,
            write_declaration: false,
            streaming_state: StreamingState::All,
        }
    }
}

impl WriterSettings {
    /// Parses settings from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let settings = WriterSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, WriterSettings::default());
    }

    #[test]
    fn test_full_settings() {
        let settings = WriterSettings::from_json_str(
            r#"{
                "maxItemsInObjectGraph": 10,
                "maxDepth": 4,
                "indent": 2,
                "writeDeclaration": true,
                "streamingState": "persistence"
            }"#,
        )
        .unwrap();
        assert_eq!(settings.max_items_in_object_graph, 10);
        assert_eq!(settings.indent, Some(2));
        assert!(settings.write_declaration);
        assert_eq!(settings.streaming_state, StreamingState::Persistence);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(WriterSettings::from_json_str(r#"{ "maxDepth": "deep" }"#).is_err());
    }
}

//! The record behind the feature popup.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::map::LngLat;
use crate::sync::base_layer_id;

/// A clicked feature together with where it was clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFeature {
    pub properties: IndexMap<String, Value>,
    pub lng_lat: LngLat,
    /// Sublayer that drew the feature, e.g. `road-line`.
    pub layer_id: String,
}

impl SelectedFeature {
    /// Logical layer id with the geometry suffix removed.
    ///
    /// Falls back to the raw sublayer id when it carries no known suffix.
    pub fn base_layer_id(&self) -> &str {
        base_layer_id(&self.layer_id).unwrap_or(&self.layer_id)
    }

    /// Property rows as shown in the popup table.
    ///
    /// Keeps document order and skips null and empty-string values. Strings
    /// are shown verbatim, anything else as compact JSON.
    pub fn display_properties(&self) -> Vec<(&str, String)> {
        self.properties
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) if s.is_empty() => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.as_str(), text))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(layer_id: &str, properties: &[(&str, Value)]) -> SelectedFeature {
        SelectedFeature {
            properties: properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            lng_lat: LngLat::new(-106.9, 38.5),
            layer_id: layer_id.to_string(),
        }
    }

    #[test]
    fn test_base_layer_id_strips_suffix() {
        assert_eq!(feature("road-line", &[]).base_layer_id(), "road");
        assert_eq!(
            feature("tax-parcels-fill", &[]).base_layer_id(),
            "tax-parcels"
        );
        assert_eq!(feature("custom", &[]).base_layer_id(), "custom");
    }

    #[test]
    fn test_display_properties_skip_empty_values() {
        let f = feature(
            "address-circle",
            &[
                ("ZIP", json!(81230)),
                ("ADDRESS", json!("201 Main St")),
                ("UNIT", json!("")),
                ("NOTE", Value::Null),
                ("VERIFIED", json!(true)),
            ],
        );
        assert_eq!(
            f.display_properties(),
            vec![
                ("ZIP", "81230".to_string()),
                ("ADDRESS", "201 Main St".to_string()),
                ("VERIFIED", "true".to_string()),
            ]
        );
    }
}

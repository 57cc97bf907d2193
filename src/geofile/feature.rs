use serde::{Deserialize, Serialize};

/// A drawn shape as received from the map client. Stored and exported verbatim.
pub type Feature = serde_json::Value;

/// GeoJSON container for an ordered list of features.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }
}

/// How strictly an incoming feature is checked before it is stored.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeatureValidation {
    /// Any JSON value is accepted.
    Permissive,
    /// The value must be a JSON object.
    #[default]
    Object,
    /// The value must parse as a GeoJSON Feature.
    Feature,
}

impl FeatureValidation {
    /// Check `feature` against this level of strictness. The error is a human-readable reason.
    pub fn check(&self, feature: &Feature) -> Result<(), String> {
        match self {
            FeatureValidation::Permissive => Ok(()),
            FeatureValidation::Object => {
                if feature.is_object() {
                    Ok(())
                } else {
                    Err(format!("expected a JSON object, got {}", json_kind(feature)))
                }
            }
            FeatureValidation::Feature => geojson::Feature::from_json_value(feature.clone())
                .map(|_| ())
                .map_err(|err| format!("not a GeoJSON Feature: {}", err)),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

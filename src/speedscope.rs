//! Speedscope document model.
//!
//! Only the fields needed for cropping are typed. Everything else in the
//! document and in each profile is carried through untouched, in its
//! original key order.
//!
//! File format reference: https://www.speedscope.app/file-format-schema.json

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::{SpeedclipError, SpeedclipResult, TimeOffset, ValueUnit};

const SAMPLED: &str = "sampled";

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedscopeFile {
    pub profiles: Vec<SampledProfile>,
    /// Top-level object. The `profiles` slot is refilled on output.
    root: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledProfile {
    #[serde(rename = "type")]
    kind: ProfileType,
    #[serde(default)]
    pub name: Option<String>,
    pub unit: ValueUnit,
    pub start_value: f64,
    pub end_value: f64,
    pub samples: Vec<Value>,
    pub weights: Vec<f64>,
    #[serde(skip)]
    label: String,
    /// Key order as read, so output fields land where they were.
    #[serde(skip)]
    keys: Vec<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// Other profile types are rejected before deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum ProfileType {
    #[serde(rename = "sampled")]
    Sampled,
}

impl ProfileType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Sampled => SAMPLED,
        }
    }
}

impl SpeedscopeFile {
    pub fn from_value(value: Value) -> SpeedclipResult<Self> {
        let Value::Object(mut root) = value else {
            return Err(SpeedclipError::MalformedDocument(
                "top level is not a JSON object".to_string(),
            ));
        };
        let profiles = match root.get_mut("profiles").map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(SpeedclipError::MalformedDocument(
                    "'profiles' field has the wrong type (expected array)".to_string(),
                ));
            }
            None => {
                return Err(SpeedclipError::MalformedDocument(
                    "'profiles' field is missing".to_string(),
                ));
            }
        };
        let profiles = profiles
            .into_iter()
            .enumerate()
            .map(|(index, value)| SampledProfile::from_value(index, value))
            .collect::<SpeedclipResult<Vec<_>>>()?;
        Ok(Self { profiles, root })
    }

    pub fn from_slice(bytes: &[u8]) -> SpeedclipResult<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    pub fn into_value(self) -> Value {
        let mut root = self.root;
        let profiles = self
            .profiles
            .into_iter()
            .map(SampledProfile::into_value)
            .collect();
        root.insert("profiles".to_string(), Value::Array(profiles));
        Value::Object(root)
    }

    pub fn into_bytes(self, pretty: bool) -> SpeedclipResult<Vec<u8>> {
        let value = self.into_value();
        let bytes = if pretty {
            serde_json::to_vec_pretty(&value)?
        } else {
            serde_json::to_vec(&value)?
        };
        Ok(bytes)
    }
}

impl SampledProfile {
    /// Validates one entry of the `profiles` array.
    pub fn from_value(index: usize, value: Value) -> SpeedclipResult<Self> {
        let Value::Object(object) = &value else {
            return Err(SpeedclipError::MalformedDocument(format!(
                "profile #{index} is not a JSON object"
            )));
        };
        let label = match object.get("name").and_then(Value::as_str) {
            Some(name) => format!("{name:?}"),
            None => format!("#{index}"),
        };
        if let Some(kind) = object.get("type").and_then(Value::as_str)
            && kind != SAMPLED
        {
            return Err(SpeedclipError::UnsupportedProfile {
                profile: label,
                kind: kind.to_string(),
            });
        }
        let keys = object.keys().cloned().collect();

        let mut profile: Self =
            serde_json::from_value(value).map_err(|source| SpeedclipError::Profile {
                profile: label.clone(),
                source,
            })?;

        if let Some((index, &value)) = profile
            .weights
            .iter()
            .enumerate()
            .find(|&(_, w)| !w.is_finite() || *w < 0.0)
        {
            return Err(SpeedclipError::InvalidWeight {
                profile: label,
                index,
                value,
            });
        }
        if profile.samples.len() != profile.weights.len() {
            return Err(SpeedclipError::MisalignedArrays {
                profile: label,
                samples: profile.samples.len(),
                weights: profile.weights.len(),
            });
        }

        profile.label = label;
        profile.keys = keys;
        Ok(profile)
    }

    pub fn into_value(self) -> Value {
        let mut typed = Map::new();
        typed.insert("type".to_string(), Value::from(self.kind.as_str()));
        if let Some(name) = self.name {
            typed.insert("name".to_string(), Value::String(name));
        }
        typed.insert("unit".to_string(), Value::from(self.unit.as_str()));
        typed.insert("startValue".to_string(), json_number(self.start_value));
        typed.insert("endValue".to_string(), json_number(self.end_value));
        typed.insert("samples".to_string(), Value::Array(self.samples));
        typed.insert(
            "weights".to_string(),
            Value::Array(self.weights.into_iter().map(json_number).collect()),
        );

        let mut fields = self.fields;
        let mut out = Map::new();
        for key in self.keys {
            let value = typed
                .get_mut(&key)
                .or_else(|| fields.get_mut(&key))
                .map(Value::take);
            if let Some(value) = value {
                out.insert(key, value);
            }
        }
        Value::Object(out)
    }

    /// Name used in errors and logs: the quoted profile name, or `#<index>`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Declared span, `endValue - startValue`, as absolute time.
    pub fn total_duration(&self) -> TimeOffset {
        self.unit.to_offset(self.end_value - self.start_value)
    }
}

/// Whole values are written as JSON integers so integer inputs stay integers.
fn json_number(value: f64) -> Value {
    const EXACT_INT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < EXACT_INT {
        return Value::from(value as i64);
    }
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_doc() -> Value {
        json!({
            "$schema": "https://www.speedscope.app/file-format-schema.json",
            "shared": {"frames": [{"name": "main"}, {"name": "work"}]},
            "profiles": [{
                "type": "sampled",
                "name": "thread 1",
                "unit": "milliseconds",
                "startValue": 0,
                "endValue": 30,
                "samples": [[0], [0, 1], [0]],
                "weights": [10, 10, 10],
                "extra": {"kept": true}
            }],
            "activeProfileIndex": 0,
            "exporter": "test"
        })
    }

    fn profile_error(profile: Value) -> SpeedclipError {
        SpeedscopeFile::from_value(json!({ "profiles": [profile] })).expect_err("must fail")
    }

    #[test]
    fn parses_a_sampled_profile() {
        let doc = SpeedscopeFile::from_value(sample_doc()).expect("parse");
        assert_eq!(doc.profiles.len(), 1);
        let p = &doc.profiles[0];
        assert_eq!(p.name.as_deref(), Some("thread 1"));
        assert_eq!(p.label(), "\"thread 1\"");
        assert_eq!(p.unit, ValueUnit::Milliseconds);
        assert_eq!(p.weights, vec![10.0, 10.0, 10.0]);
        assert_eq!(p.samples[1], json!([0, 1]));
        assert_eq!(p.total_duration(), TimeOffset::from_millis(30));

        let out = doc.into_value();
        assert_eq!(out["profiles"][0]["extra"], json!({"kept": true}));
        assert_eq!(out["exporter"], json!("test"));
    }

    #[test]
    fn round_trip_preserves_document_and_key_order() {
        let original = sample_doc();
        let doc = SpeedscopeFile::from_value(original.clone()).expect("parse");
        let out = doc.into_value();
        assert_eq!(out, original);

        let keys: Vec<&String> = out.as_object().expect("object").keys().collect();
        assert_eq!(
            keys,
            vec!["$schema", "shared", "profiles", "activeProfileIndex", "exporter"]
        );
        let profile_keys: Vec<&String> = out["profiles"][0]
            .as_object()
            .expect("profile")
            .keys()
            .collect();
        assert_eq!(
            profile_keys,
            vec![
                "type",
                "name",
                "unit",
                "startValue",
                "endValue",
                "samples",
                "weights",
                "extra"
            ]
        );
    }

    #[test]
    fn integer_values_stay_integers() {
        assert_eq!(json_number(30.0).to_string(), "30");
        assert_eq!(json_number(-4.0).to_string(), "-4");
        assert_eq!(json_number(2.5).to_string(), "2.5");
    }

    #[test]
    fn unknown_units_are_preserved() {
        let mut doc = sample_doc();
        doc["profiles"][0]["unit"] = json!("furlongs");
        let parsed = SpeedscopeFile::from_value(doc).expect("parse");
        assert_eq!(parsed.profiles[0].unit, ValueUnit::Other("furlongs".to_string()));
        let out = parsed.into_value();
        assert_eq!(out["profiles"][0]["unit"], json!("furlongs"));
    }

    #[test]
    fn rejects_documents_without_profiles() {
        for doc in [json!([]), json!({}), json!({"profiles": {}})] {
            match SpeedscopeFile::from_value(doc) {
                Err(SpeedclipError::MalformedDocument(_)) => {}
                other => panic!("expected malformed document, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_and_mistyped_fields_name_the_profile() {
        let mut base = sample_doc()["profiles"][0].clone();
        base.as_object_mut()
            .expect("profile")
            .retain(|key, _| key != "unit");
        match profile_error(base) {
            SpeedclipError::Profile { profile, source } => {
                assert_eq!(profile, "\"thread 1\"");
                assert!(source.to_string().contains("missing field `unit`"), "{source}");
            }
            other => panic!("expected profile error, got {other:?}"),
        }

        let mut base = sample_doc()["profiles"][0].clone();
        base["startValue"] = json!("zero");
        match profile_error(base) {
            SpeedclipError::Profile { source, .. } => {
                assert!(source.to_string().contains("invalid type"), "{source}");
            }
            other => panic!("expected profile error, got {other:?}"),
        }

        let mut base = sample_doc()["profiles"][0].clone();
        base.as_object_mut()
            .expect("profile")
            .retain(|key, _| key != "type");
        match profile_error(base) {
            SpeedclipError::Profile { source, .. } => {
                assert!(source.to_string().contains("missing field `type`"), "{source}");
            }
            other => panic!("expected profile error, got {other:?}"),
        }
    }

    #[test]
    fn unnamed_profiles_are_labelled_by_index() {
        let mut base = sample_doc()["profiles"][0].clone();
        base.as_object_mut()
            .expect("profile")
            .retain(|key, _| key != "name" && key != "weights");
        match profile_error(base) {
            SpeedclipError::Profile { profile, source } => {
                assert_eq!(profile, "#0");
                assert!(source.to_string().contains("missing field `weights`"), "{source}");
            }
            other => panic!("expected profile error, got {other:?}"),
        }
    }

    #[test]
    fn unnamed_profiles_write_no_name() {
        let mut doc = sample_doc();
        doc["profiles"][0]
            .as_object_mut()
            .expect("profile")
            .retain(|key, _| key != "name");
        let parsed = SpeedscopeFile::from_value(doc.clone()).expect("parse");
        assert_eq!(parsed.profiles[0].name, None);
        assert_eq!(parsed.into_value(), doc);
    }

    #[test]
    fn evented_profiles_are_unsupported() {
        let evented = json!({
            "type": "evented",
            "name": "events",
            "unit": "milliseconds",
            "startValue": 0,
            "endValue": 10,
            "events": []
        });
        match profile_error(evented) {
            SpeedclipError::UnsupportedProfile { profile, kind } => {
                assert_eq!(profile, "\"events\"");
                assert_eq!(kind, "evented");
            }
            other => panic!("expected unsupported profile, got {other:?}"),
        }
    }

    #[test]
    fn misaligned_arrays_are_rejected() {
        let mut base = sample_doc()["profiles"][0].clone();
        base["weights"] = json!([10, 10]);
        match profile_error(base) {
            SpeedclipError::MisalignedArrays {
                samples, weights, ..
            } => {
                assert_eq!((samples, weights), (3, 2));
            }
            other => panic!("expected misaligned arrays, got {other:?}"),
        }
    }

    #[test]
    fn negative_weights_are_rejected() {
        let mut base = sample_doc()["profiles"][0].clone();
        base["weights"] = json!([10, -1, 10]);
        match profile_error(base) {
            SpeedclipError::InvalidWeight {
                profile,
                index,
                value,
            } => {
                assert_eq!(profile, "\"thread 1\"");
                assert_eq!((index, value), (1, -1.0));
            }
            other => panic!("expected invalid weight, got {other:?}"),
        }
    }
}

//! The decode/encode contract every model implements
//!
//! Models read their fields through [`DynamicValue`] and write them through
//! [`ObjectEncoder`]. Wire key names are spelled out per field in each
//! model's `decode`/`encode`; absent optional fields are omitted on encode,
//! never written as `null`.

use serde_json::{Map, Number, Value};

use crate::error::{DecodeResult, EncodeError, EncodeResult};
use crate::value::DynamicValue;

/// Untyped JSON object, as carried by opaque fields
pub type JsonObject = Map<String, Value>;

/// A type that can be built from parsed JSON
pub trait Decodable: Sized {
    fn decode(json: &DynamicValue) -> DecodeResult<Self>;
}

/// A type that can be written as a JSON object
pub trait Encodable {
    fn encode(&self) -> EncodeResult<JsonObject>;
}

impl<T: Decodable> Decodable for Vec<T> {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        json.decode_elements()
    }
}

impl Decodable for JsonObject {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        json.get_dictionary_object()
    }
}

impl Encodable for JsonObject {
    fn encode(&self) -> EncodeResult<JsonObject> {
        Ok(self.clone())
    }
}

/// Parse bytes and decode them as `T`
pub fn decode_slice<T: Decodable>(bytes: &[u8]) -> DecodeResult<T> {
    T::decode(&DynamicValue::parse(bytes)?)
}

/// Encode `value` and serialize it to JSON bytes
pub fn encode_to_vec<T: Encodable + ?Sized>(value: &T) -> EncodeResult<Vec<u8>> {
    let object = value.encode()?;
    Ok(serde_json::to_vec(&object)?)
}

/// Builder for a model's wire mapping
#[derive(Debug, Default)]
pub struct ObjectEncoder {
    map: JsonObject,
}

impl ObjectEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    /// Insert `value` when present; `None` leaves the key out entirely
    pub fn insert_opt(&mut self, key: &str, value: Option<impl Into<Value>>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn insert_f64(&mut self, key: &str, value: f64) -> EncodeResult<&mut Self> {
        let number = Number::from_f64(value).ok_or_else(|| EncodeError::NonFiniteNumber {
            key: key.to_string(),
        })?;
        Ok(self.insert(key, Value::Number(number)))
    }

    pub fn insert_opt_f64(&mut self, key: &str, value: Option<f64>) -> EncodeResult<&mut Self> {
        match value {
            Some(value) => self.insert_f64(key, value),
            None => Ok(self),
        }
    }

    pub fn insert_model<T: Encodable>(&mut self, key: &str, model: &T) -> EncodeResult<&mut Self> {
        let object = model.encode()?;
        Ok(self.insert(key, Value::Object(object)))
    }

    pub fn insert_opt_model<T: Encodable>(
        &mut self,
        key: &str,
        model: Option<&T>,
    ) -> EncodeResult<&mut Self> {
        match model {
            Some(model) => self.insert_model(key, model),
            None => Ok(self),
        }
    }

    pub fn insert_models<T: Encodable>(&mut self, key: &str, models: &[T]) -> EncodeResult<&mut Self> {
        let items = models
            .iter()
            .map(|m| m.encode().map(Value::Object))
            .collect::<EncodeResult<Vec<_>>>()?;
        Ok(self.insert(key, Value::Array(items)))
    }

    pub fn insert_opt_models<T: Encodable>(
        &mut self,
        key: &str,
        models: Option<&[T]>,
    ) -> EncodeResult<&mut Self> {
        match models {
            Some(models) => self.insert_models(key, models),
            None => Ok(self),
        }
    }

    pub fn finish(self) -> JsonObject {
        self.map
    }
}

/// Encode `value` to bytes and decode it back
#[cfg(test)]
pub(crate) fn round_trip<T: Decodable + Encodable>(value: &T) -> T {
    let bytes = encode_to_vec(value).unwrap();
    decode_slice(&bytes).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq)]
    struct Point {
        label: String,
        weight: Option<f64>,
    }

    impl Decodable for Point {
        fn decode(json: &DynamicValue) -> DecodeResult<Self> {
            Ok(Self {
                label: json.get_string("label")?,
                weight: json.try_f64("weight"),
            })
        }
    }

    impl Encodable for Point {
        fn encode(&self) -> EncodeResult<JsonObject> {
            let mut enc = ObjectEncoder::new();
            enc.insert("label", self.label.clone())
                .insert_opt_f64("weight", self.weight)?;
            Ok(enc.finish())
        }
    }

    #[test]
    fn test_optional_field_is_omitted() {
        let point = Point {
            label: "a".to_string(),
            weight: None,
        };
        let object = point.encode().unwrap();
        assert_eq!(Value::Object(object), json!({"label": "a"}));
    }

    #[test]
    fn test_non_finite_number_fails() {
        let point = Point {
            label: "a".to_string(),
            weight: Some(f64::NAN),
        };
        let err = encode_to_vec(&point).unwrap_err();
        assert!(matches!(err, EncodeError::NonFiniteNumber { ref key } if key == "weight"));
    }

    #[test]
    fn test_round_trip_through_bytes() {
        let point = Point {
            label: "a".to_string(),
            weight: Some(0.25),
        };
        let bytes = encode_to_vec(&point).unwrap();
        assert_eq!(decode_slice::<Point>(&bytes).unwrap(), point);
    }

    #[test]
    fn test_vec_decodes_top_level_array() {
        let points: Vec<Point> = decode_slice(br#"[{"label": "a"}, {"label": "b"}]"#).unwrap();
        assert_eq!(points.len(), 2);

        let err = decode_slice::<Vec<Point>>(br#"{"label": "a"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::FieldTypeMismatch { .. }));
    }

    #[test]
    fn test_insert_models() {
        let points = vec![
            Point {
                label: "a".to_string(),
                weight: None,
            },
            Point {
                label: "b".to_string(),
                weight: Some(1.0),
            },
        ];
        let mut enc = ObjectEncoder::new();
        enc.insert_models("points", &points).unwrap();
        enc.insert_opt_models::<Point>("absent", None).unwrap();
        assert_eq!(
            Value::Object(enc.finish()),
            json!({"points": [{"label": "a"}, {"label": "b", "weight": 1.0}]})
        );
    }
}

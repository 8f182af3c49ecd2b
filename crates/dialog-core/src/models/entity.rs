//! Entity models

use serde_json::Value;

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::models::{CollectionItem, CreateValue, EntityValue};
use crate::value::DynamicValue;

/// An entity defined in a workspace
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Entity name, wire key `entity`
    pub entity_name: String,
    pub description: Option<String>,
    pub metadata: Option<Value>,
    pub fuzzy_match: Option<bool>,
    pub created: Option<String>,
    pub updated: Option<String>,
    /// Only present when the entity is requested with `export=true`
    pub values: Option<Vec<EntityValue>>,
}

impl Decodable for Entity {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            entity_name: json.get_string("entity")?,
            description: json.try_string("description"),
            metadata: json.try_value("metadata"),
            fuzzy_match: json.try_bool("fuzzy_match"),
            created: json.try_string("created"),
            updated: json.try_string("updated"),
            values: json.try_decoded_array("values")?,
        })
    }
}

impl Encodable for Entity {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("entity", self.entity_name.clone())
            .insert_opt("description", self.description.clone())
            .insert_opt("metadata", self.metadata.clone())
            .insert_opt("fuzzy_match", self.fuzzy_match)
            .insert_opt("created", self.created.clone())
            .insert_opt("updated", self.updated.clone())
            .insert_opt_models("values", self.values.as_deref())?;
        Ok(enc.finish())
    }
}

impl CollectionItem for Entity {
    const COLLECTION_KEY: &'static str = "entities";
}

/// Payload for creating an entity
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEntity {
    pub entity: String,
    pub description: Option<String>,
    pub metadata: Option<Value>,
    pub values: Option<Vec<CreateValue>>,
    pub fuzzy_match: Option<bool>,
}

impl CreateEntity {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            description: None,
            metadata: None,
            values: None,
            fuzzy_match: None,
        }
    }

    pub fn with_values(mut self, values: Vec<CreateValue>) -> Self {
        self.values = Some(values);
        self
    }
}

impl Decodable for CreateEntity {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            entity: json.get_string("entity")?,
            description: json.try_string("description"),
            metadata: json.try_value("metadata"),
            values: json.try_decoded_array("values")?,
            fuzzy_match: json.try_bool("fuzzy_match"),
        })
    }
}

impl Encodable for CreateEntity {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("entity", self.entity.clone())
            .insert_opt("description", self.description.clone())
            .insert_opt("metadata", self.metadata.clone())
            .insert_opt_models("values", self.values.as_deref())?
            .insert_opt("fuzzy_match", self.fuzzy_match);
        Ok(enc.finish())
    }
}

/// Payload for updating an entity; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateEntity {
    /// Wire key `entity`
    pub new_entity: Option<String>,
    /// Wire key `description`
    pub new_description: Option<String>,
    /// Wire key `metadata`
    pub new_metadata: Option<Value>,
    /// Wire key `fuzzy_match`
    pub new_fuzzy_match: Option<bool>,
    /// Replaces all values, wire key `values`
    pub new_values: Option<Vec<CreateValue>>,
}

impl Encodable for UpdateEntity {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_opt("entity", self.new_entity.clone())
            .insert_opt("description", self.new_description.clone())
            .insert_opt("metadata", self.new_metadata.clone())
            .insert_opt("fuzzy_match", self.new_fuzzy_match)
            .insert_opt_models("values", self.new_values.as_deref())?;
        Ok(enc.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_slice, encode_to_vec, round_trip};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn test_exported_entity_decodes_nested_values() {
        let body = br#"{
            "entity": "topping",
            "fuzzy_match": true,
            "values": [
                {"value": "cheese", "synonyms": ["mozzarella"]},
                {"value": "ham", "type": "synonyms"}
            ]
        }"#;
        let entity: Entity = decode_slice(body).unwrap();
        let values = entity.values.as_ref().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].synonyms, Some(vec!["mozzarella".to_string()]));
        assert_eq!(entity.fuzzy_match, Some(true));
    }

    #[test]
    fn test_nested_value_failure_fails_entity() {
        let body = br#"{"entity": "topping", "values": [{"value": "cheese"}, {"synonyms": []}]}"#;
        let err = decode_slice::<Entity>(body).unwrap_err();
        assert_eq!(err.path(), Some("values[1].value"));
    }

    #[test]
    fn test_entity_round_trip() {
        let entity = Entity {
            entity_name: "size".to_string(),
            description: Some("Pizza size".to_string()),
            metadata: None,
            fuzzy_match: Some(false),
            created: None,
            updated: None,
            values: Some(vec![EntityValue::new("large")]),
        };
        let bytes = encode_to_vec(&entity).unwrap();
        assert_eq!(decode_slice::<Entity>(&bytes).unwrap(), entity);
    }

    #[test]
    fn test_create_entity_encodes_values() {
        let create = CreateEntity::new("size")
            .with_values(vec![CreateValue::new("large").with_synonyms(["big", "huge"])]);
        assert_eq!(
            Value::Object(create.encode().unwrap()),
            json!({
                "entity": "size",
                "values": [{"value": "large", "synonyms": ["big", "huge"]}]
            })
        );
    }

    #[test]
    fn test_entity_round_trip_all_set() {
        let bare = Entity {
            entity_name: "size".to_string(),
            description: None,
            metadata: None,
            fuzzy_match: None,
            created: None,
            updated: None,
            values: None,
        };
        assert_eq!(round_trip(&bare), bare);

        let full = Entity {
            description: Some("Pizza size".to_string()),
            metadata: Some(json!({"source": "import", "weights": [0.5, 0.25]})),
            fuzzy_match: Some(true),
            created: Some("2017-01-01".to_string()),
            updated: Some("2017-01-02".to_string()),
            values: Some(vec![EntityValue::new("small"), EntityValue::new("large")]),
            ..bare
        };
        assert_eq!(round_trip(&full), full);
    }

    #[test]
    fn test_create_entity_round_trip() {
        let bare = CreateEntity::new("topping");
        assert_eq!(round_trip(&bare), bare);

        let full = CreateEntity {
            description: Some("Toppings".to_string()),
            metadata: Some(json!(42)),
            fuzzy_match: Some(false),
            ..CreateEntity::new("topping").with_values(vec![CreateValue::new("ham")])
        };
        assert_eq!(round_trip(&full), full);
    }
}

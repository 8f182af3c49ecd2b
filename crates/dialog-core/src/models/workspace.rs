//! Workspace models

use serde_json::Value;

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::models::{
    CollectionItem, Counterexample, CreateCounterexample, CreateDialogNode, CreateEntity,
    CreateIntent, DialogNode, Entity, Intent,
};
use crate::value::DynamicValue;

/// A workspace: the container of one assistant's training data and dialog
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub name: String,
    pub language: String,
    pub workspace_id: String,
    pub description: Option<String>,
    pub metadata: Option<Value>,
    pub learning_opt_out: Option<bool>,
    /// Training status, e.g. `Available` or `Training`
    pub status: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    // Only present with `export=true`
    pub intents: Option<Vec<Intent>>,
    pub entities: Option<Vec<Entity>>,
    pub counterexamples: Option<Vec<Counterexample>>,
    pub dialog_nodes: Option<Vec<DialogNode>>,
}

impl Decodable for Workspace {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            name: json.get_string("name")?,
            language: json.get_string("language")?,
            workspace_id: json.get_string("workspace_id")?,
            description: json.try_string("description"),
            metadata: json.try_value("metadata"),
            learning_opt_out: json.try_bool("learning_opt_out"),
            status: json.try_string("status"),
            created: json.try_string("created"),
            updated: json.try_string("updated"),
            intents: json.try_decoded_array("intents")?,
            entities: json.try_decoded_array("entities")?,
            counterexamples: json.try_decoded_array("counterexamples")?,
            dialog_nodes: json.try_decoded_array("dialog_nodes")?,
        })
    }
}

impl Encodable for Workspace {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("name", self.name.clone())
            .insert("language", self.language.clone())
            .insert("workspace_id", self.workspace_id.clone())
            .insert_opt("description", self.description.clone())
            .insert_opt("metadata", self.metadata.clone())
            .insert_opt("learning_opt_out", self.learning_opt_out)
            .insert_opt("status", self.status.clone())
            .insert_opt("created", self.created.clone())
            .insert_opt("updated", self.updated.clone())
            .insert_opt_models("intents", self.intents.as_deref())?
            .insert_opt_models("entities", self.entities.as_deref())?
            .insert_opt_models("counterexamples", self.counterexamples.as_deref())?
            .insert_opt_models("dialog_nodes", self.dialog_nodes.as_deref())?;
        Ok(enc.finish())
    }
}

impl CollectionItem for Workspace {
    const COLLECTION_KEY: &'static str = "workspaces";
}

/// Payload for creating or updating a workspace
///
/// Every field is optional; on update, absent fields are left unchanged and
/// present arrays replace the existing content (unless `append=true`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceDefinition {
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub intents: Option<Vec<CreateIntent>>,
    pub entities: Option<Vec<CreateEntity>>,
    pub dialog_nodes: Option<Vec<CreateDialogNode>>,
    pub counterexamples: Option<Vec<CreateCounterexample>>,
    pub metadata: Option<Value>,
    pub learning_opt_out: Option<bool>,
}

impl WorkspaceDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl Decodable for WorkspaceDefinition {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            name: json.try_string("name"),
            description: json.try_string("description"),
            language: json.try_string("language"),
            intents: json.try_decoded_array("intents")?,
            entities: json.try_decoded_array("entities")?,
            dialog_nodes: json.try_decoded_array("dialog_nodes")?,
            counterexamples: json.try_decoded_array("counterexamples")?,
            metadata: json.try_value("metadata"),
            learning_opt_out: json.try_bool("learning_opt_out"),
        })
    }
}

impl Encodable for WorkspaceDefinition {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_opt("name", self.name.clone())
            .insert_opt("description", self.description.clone())
            .insert_opt("language", self.language.clone())
            .insert_opt_models("intents", self.intents.as_deref())?
            .insert_opt_models("entities", self.entities.as_deref())?
            .insert_opt_models("dialog_nodes", self.dialog_nodes.as_deref())?
            .insert_opt_models("counterexamples", self.counterexamples.as_deref())?
            .insert_opt("metadata", self.metadata.clone())
            .insert_opt("learning_opt_out", self.learning_opt_out);
        Ok(enc.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_slice, encode_to_vec, round_trip};
    use crate::error::DecodeError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exported_workspace() {
        let body = br#"{
            "name": "Pizza",
            "language": "en",
            "workspace_id": "ws-1",
            "status": "Available",
            "intents": [{"intent": "order", "examples": [{"text": "I want pizza"}]}],
            "entities": [],
            "counterexamples": [{"text": "weather?"}],
            "dialog_nodes": [{"dialog_node": "root"}]
        }"#;
        let workspace: Workspace = decode_slice(body).unwrap();
        assert_eq!(workspace.intents.as_ref().unwrap()[0].intent_name, "order");
        assert_eq!(workspace.entities, Some(vec![]));
        assert_eq!(workspace.dialog_nodes.as_ref().unwrap().len(), 1);

        let bytes = encode_to_vec(&workspace).unwrap();
        assert_eq!(decode_slice::<Workspace>(&bytes).unwrap(), workspace);
    }

    #[test]
    fn test_workspace_requires_id() {
        let err = decode_slice::<Workspace>(br#"{"name": "x", "language": "en"}"#).unwrap_err();
        assert_eq!(
            err,
            DecodeError::FieldMissing {
                path: "workspace_id".to_string()
            }
        );
    }

    #[test]
    fn test_definition_round_trip_all_absent() {
        let definition = WorkspaceDefinition::default();
        let encoded = definition.encode().unwrap();
        assert!(encoded.is_empty());
        let bytes = serde_json::to_vec(&encoded).unwrap();
        assert_eq!(
            decode_slice::<WorkspaceDefinition>(&bytes).unwrap(),
            definition
        );
    }

    #[test]
    fn test_definition_round_trip_nested() {
        let definition = WorkspaceDefinition {
            language: Some("en".to_string()),
            intents: Some(vec![CreateIntent::new("order").with_examples(["pizza please"])]),
            dialog_nodes: Some(vec![CreateDialogNode::new("root")]),
            counterexamples: Some(vec![CreateCounterexample::new("weather")]),
            ..WorkspaceDefinition::named("Pizza")
        };
        let bytes = encode_to_vec(&definition).unwrap();
        assert_eq!(
            decode_slice::<WorkspaceDefinition>(&bytes).unwrap(),
            definition
        );
    }

    #[test]
    fn test_workspace_round_trip() {
        let bare = Workspace {
            name: "Pizza".to_string(),
            language: "en".to_string(),
            workspace_id: "ws-1".to_string(),
            description: None,
            metadata: None,
            learning_opt_out: None,
            status: None,
            created: None,
            updated: None,
            intents: None,
            entities: None,
            counterexamples: None,
            dialog_nodes: None,
        };
        assert_eq!(round_trip(&bare), bare);

        let full = Workspace {
            description: Some("Orders pizza".to_string()),
            metadata: Some(serde_json::json!({"owner": "team-a"})),
            learning_opt_out: Some(true),
            status: Some("Training".to_string()),
            created: Some("2017-01-01".to_string()),
            updated: Some("2017-01-02".to_string()),
            intents: Some(vec![]),
            entities: Some(vec![]),
            counterexamples: Some(vec![Counterexample::new("weather")]),
            dialog_nodes: Some(vec![DialogNode::new("root")]),
            ..bare
        };
        assert_eq!(round_trip(&full), full);
    }

    #[test]
    fn test_definition_keeps_scalar_metadata() {
        let definition = WorkspaceDefinition {
            metadata: Some(serde_json::json!("v2")),
            learning_opt_out: Some(false),
            description: Some("Orders pizza".to_string()),
            entities: Some(vec![CreateEntity::new("size")]),
            ..WorkspaceDefinition::named("Pizza")
        };
        assert_eq!(round_trip(&definition), definition);
    }
}

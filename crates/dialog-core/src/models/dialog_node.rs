//! Dialog node models

use serde_json::Value;

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::models::CollectionItem;
use crate::value::DynamicValue;

/// Where processing continues after a node
#[derive(Debug, Clone, PartialEq)]
pub struct DialogNodeNextStep {
    /// `get_user_input`, `skip_user_input` or `jump_to`
    pub behavior: String,
    /// Target node, wire key `dialog_node`
    pub dialog_node: Option<String>,
    /// `condition`, `client`, `user_input` or `body`
    pub selector: Option<String>,
}

impl DialogNodeNextStep {
    pub fn jump_to(dialog_node: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            behavior: "jump_to".to_string(),
            dialog_node: Some(dialog_node.into()),
            selector: Some(selector.into()),
        }
    }
}

impl Decodable for DialogNodeNextStep {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            behavior: json.get_string("behavior")?,
            dialog_node: json.try_string("dialog_node"),
            selector: json.try_string("selector"),
        })
    }
}

impl Encodable for DialogNodeNextStep {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("behavior", self.behavior.clone())
            .insert_opt("dialog_node", self.dialog_node.clone())
            .insert_opt("selector", self.selector.clone());
        Ok(enc.finish())
    }
}

/// A node of a workspace's dialog tree
///
/// `output`, `context` and `metadata` are free-form and kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogNode {
    /// Node identifier, wire key `dialog_node`
    pub dialog_node_id: String,
    pub description: Option<String>,
    pub conditions: Option<String>,
    pub parent: Option<String>,
    pub previous_sibling: Option<String>,
    pub output: Option<Value>,
    pub context: Option<Value>,
    pub metadata: Option<Value>,
    pub next_step: Option<DialogNodeNextStep>,
    pub title: Option<String>,
    /// Wire key `type`
    pub node_type: Option<String>,
    pub event_name: Option<String>,
    pub variable: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl DialogNode {
    pub fn new(dialog_node_id: impl Into<String>) -> Self {
        Self {
            dialog_node_id: dialog_node_id.into(),
            description: None,
            conditions: None,
            parent: None,
            previous_sibling: None,
            output: None,
            context: None,
            metadata: None,
            next_step: None,
            title: None,
            node_type: None,
            event_name: None,
            variable: None,
            created: None,
            updated: None,
        }
    }
}

impl Decodable for DialogNode {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            dialog_node_id: json.get_string("dialog_node")?,
            description: json.try_string("description"),
            conditions: json.try_string("conditions"),
            parent: json.try_string("parent"),
            previous_sibling: json.try_string("previous_sibling"),
            output: json.try_value("output"),
            context: json.try_value("context"),
            metadata: json.try_value("metadata"),
            next_step: json.try_decode("next_step")?,
            title: json.try_string("title"),
            node_type: json.try_string("type"),
            event_name: json.try_string("event_name"),
            variable: json.try_string("variable"),
            created: json.try_string("created"),
            updated: json.try_string("updated"),
        })
    }
}

impl Encodable for DialogNode {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("dialog_node", self.dialog_node_id.clone())
            .insert_opt("description", self.description.clone())
            .insert_opt("conditions", self.conditions.clone())
            .insert_opt("parent", self.parent.clone())
            .insert_opt("previous_sibling", self.previous_sibling.clone())
            .insert_opt("output", self.output.clone())
            .insert_opt("context", self.context.clone())
            .insert_opt("metadata", self.metadata.clone())
            .insert_opt_model("next_step", self.next_step.as_ref())?
            .insert_opt("title", self.title.clone())
            .insert_opt("type", self.node_type.clone())
            .insert_opt("event_name", self.event_name.clone())
            .insert_opt("variable", self.variable.clone())
            .insert_opt("created", self.created.clone())
            .insert_opt("updated", self.updated.clone());
        Ok(enc.finish())
    }
}

impl CollectionItem for DialogNode {
    const COLLECTION_KEY: &'static str = "dialog_nodes";
}

/// Payload for creating a dialog node
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDialogNode {
    pub dialog_node: String,
    pub description: Option<String>,
    pub conditions: Option<String>,
    pub parent: Option<String>,
    pub previous_sibling: Option<String>,
    pub output: Option<Value>,
    pub context: Option<Value>,
    pub metadata: Option<Value>,
    pub next_step: Option<DialogNodeNextStep>,
    pub title: Option<String>,
    /// Wire key `type`
    pub node_type: Option<String>,
    pub event_name: Option<String>,
    pub variable: Option<String>,
}

impl CreateDialogNode {
    pub fn new(dialog_node: impl Into<String>) -> Self {
        Self {
            dialog_node: dialog_node.into(),
            description: None,
            conditions: None,
            parent: None,
            previous_sibling: None,
            output: None,
            context: None,
            metadata: None,
            next_step: None,
            title: None,
            node_type: None,
            event_name: None,
            variable: None,
        }
    }
}

impl Decodable for CreateDialogNode {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            dialog_node: json.get_string("dialog_node")?,
            description: json.try_string("description"),
            conditions: json.try_string("conditions"),
            parent: json.try_string("parent"),
            previous_sibling: json.try_string("previous_sibling"),
            output: json.try_value("output"),
            context: json.try_value("context"),
            metadata: json.try_value("metadata"),
            next_step: json.try_decode("next_step")?,
            title: json.try_string("title"),
            node_type: json.try_string("type"),
            event_name: json.try_string("event_name"),
            variable: json.try_string("variable"),
        })
    }
}

impl Encodable for CreateDialogNode {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("dialog_node", self.dialog_node.clone())
            .insert_opt("description", self.description.clone())
            .insert_opt("conditions", self.conditions.clone())
            .insert_opt("parent", self.parent.clone())
            .insert_opt("previous_sibling", self.previous_sibling.clone())
            .insert_opt("output", self.output.clone())
            .insert_opt("context", self.context.clone())
            .insert_opt("metadata", self.metadata.clone())
            .insert_opt_model("next_step", self.next_step.as_ref())?
            .insert_opt("title", self.title.clone())
            .insert_opt("type", self.node_type.clone())
            .insert_opt("event_name", self.event_name.clone())
            .insert_opt("variable", self.variable.clone());
        Ok(enc.finish())
    }
}

/// Payload for updating a dialog node; absent fields are left unchanged
///
/// Every field maps onto the wire key without its `new_` prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDialogNode {
    pub new_dialog_node: Option<String>,
    pub new_description: Option<String>,
    pub new_conditions: Option<String>,
    pub new_parent: Option<String>,
    pub new_previous_sibling: Option<String>,
    pub new_output: Option<Value>,
    pub new_context: Option<Value>,
    pub new_metadata: Option<Value>,
    pub new_next_step: Option<DialogNodeNextStep>,
    pub new_title: Option<String>,
    pub new_type: Option<String>,
    pub new_event_name: Option<String>,
    pub new_variable: Option<String>,
}

impl Encodable for UpdateDialogNode {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_opt("dialog_node", self.new_dialog_node.clone())
            .insert_opt("description", self.new_description.clone())
            .insert_opt("conditions", self.new_conditions.clone())
            .insert_opt("parent", self.new_parent.clone())
            .insert_opt("previous_sibling", self.new_previous_sibling.clone())
            .insert_opt("output", self.new_output.clone())
            .insert_opt("context", self.new_context.clone())
            .insert_opt("metadata", self.new_metadata.clone())
            .insert_opt_model("next_step", self.new_next_step.as_ref())?
            .insert_opt("title", self.new_title.clone())
            .insert_opt("type", self.new_type.clone())
            .insert_opt("event_name", self.new_event_name.clone())
            .insert_opt("variable", self.new_variable.clone());
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
    fn test_dialog_node_round_trip_with_opaque_output() {
        let body = br#"{
            "dialog_node": "welcome",
            "conditions": "welcome",
            "output": {"text": {"values": ["Hello!"], "selection_policy": "random"}},
            "context": {"counter": 0, "flags": [true, null]},
            "next_step": {"behavior": "jump_to", "dialog_node": "menu", "selector": "body"}
        }"#;
        let node: DialogNode = decode_slice(body).unwrap();
        assert_eq!(
            node.next_step,
            Some(DialogNodeNextStep::jump_to("menu", "body"))
        );

        let bytes = encode_to_vec(&node).unwrap();
        let again: DialogNode = decode_slice(&bytes).unwrap();
        assert_eq!(again, node);
        assert_eq!(
            again.output.unwrap(),
            json!({"text": {"values": ["Hello!"], "selection_policy": "random"}})
        );
    }

    #[test]
    fn test_malformed_next_step_is_an_error() {
        let body = br#"{"dialog_node": "a", "next_step": {"selector": "body"}}"#;
        let err = decode_slice::<DialogNode>(body).unwrap_err();
        assert_eq!(err.path(), Some("next_step.behavior"));
    }

    #[test]
    fn test_update_renames_node() {
        let update = UpdateDialogNode {
            new_dialog_node: Some("greeting".to_string()),
            new_type: Some("standard".to_string()),
            ..Default::default()
        };
        assert_eq!(
            Value::Object(update.encode().unwrap()),
            json!({"dialog_node": "greeting", "type": "standard"})
        );
    }

    #[test]
    fn test_next_step_round_trip() {
        let bare = DialogNodeNextStep {
            behavior: "get_user_input".to_string(),
            dialog_node: None,
            selector: None,
        };
        assert_eq!(round_trip(&bare), bare);

        let jump = DialogNodeNextStep::jump_to("menu", "condition");
        assert_eq!(round_trip(&jump), jump);
    }

    #[test]
    fn test_dialog_node_round_trip_all_set() {
        assert_eq!(round_trip(&DialogNode::new("bare")), DialogNode::new("bare"));

        let node = DialogNode {
            description: Some("Ask for the size".to_string()),
            conditions: Some("#order".to_string()),
            parent: Some("root".to_string()),
            previous_sibling: Some("welcome".to_string()),
            output: Some(json!({"text": "What size?"})),
            context: Some(json!({"size": null})),
            metadata: Some(json!("imported")),
            next_step: Some(DialogNodeNextStep::jump_to("toppings", "user_input")),
            title: Some("Size".to_string()),
            node_type: Some("frame".to_string()),
            event_name: Some("focus".to_string()),
            variable: Some("$size".to_string()),
            created: Some("2017-01-01T00:00:00.000Z".to_string()),
            updated: Some("2017-01-02T00:00:00.000Z".to_string()),
            ..DialogNode::new("size")
        };
        assert_eq!(round_trip(&node), node);
    }

    #[test]
    fn test_create_dialog_node_round_trip() {
        let bare = CreateDialogNode::new("root");
        assert_eq!(round_trip(&bare), bare);

        let create = CreateDialogNode {
            description: Some("Greets the user".to_string()),
            conditions: Some("welcome".to_string()),
            parent: Some("root".to_string()),
            previous_sibling: Some("intro".to_string()),
            output: Some(json!({"text": {"values": ["Hi"]}})),
            context: Some(json!({"visits": 1})),
            metadata: Some(json!([1, 2, 3])),
            next_step: Some(DialogNodeNextStep::jump_to("menu", "body")),
            title: Some("Welcome".to_string()),
            node_type: Some("standard".to_string()),
            event_name: Some("input".to_string()),
            variable: Some("$name".to_string()),
            ..CreateDialogNode::new("welcome")
        };
        assert_eq!(round_trip(&create), create);
    }

    #[test]
    fn test_non_object_output_is_kept() {
        let body = br#"{"dialog_node": "a", "output": "plain text", "context": [1]}"#;
        let node: DialogNode = decode_slice(body).unwrap();
        assert_eq!(node.output, Some(json!("plain text")));
        assert_eq!(
            Value::Object(node.encode().unwrap()),
            json!({"dialog_node": "a", "output": "plain text", "context": [1]})
        );
    }
}

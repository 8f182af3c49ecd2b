//! Synonyms of an entity value

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::models::CollectionItem;
use crate::value::DynamicValue;

/// An alternative spelling or phrasing of an entity value
#[derive(Debug, Clone, PartialEq)]
pub struct Synonym {
    /// Wire key `synonym`
    pub synonym_text: String,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl Decodable for Synonym {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            synonym_text: json.get_string("synonym")?,
            created: json.try_string("created"),
            updated: json.try_string("updated"),
        })
    }
}

impl Encodable for Synonym {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("synonym", self.synonym_text.clone())
            .insert_opt("created", self.created.clone())
            .insert_opt("updated", self.updated.clone());
        Ok(enc.finish())
    }
}

impl CollectionItem for Synonym {
    const COLLECTION_KEY: &'static str = "synonyms";
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSynonym {
    pub synonym: String,
}

impl CreateSynonym {
    pub fn new(synonym: impl Into<String>) -> Self {
        Self {
            synonym: synonym.into(),
        }
    }
}

impl Encodable for CreateSynonym {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("synonym", self.synonym.clone());
        Ok(enc.finish())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSynonym {
    /// Wire key `synonym`
    pub new_synonym: Option<String>,
}

impl Encodable for UpdateSynonym {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_opt("synonym", self.new_synonym.clone());
        Ok(enc.finish())
    }
}

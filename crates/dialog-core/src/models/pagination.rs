//! Pagination metadata and paged collections

use crate::codec::{Decodable, Encodable, JsonObject, ObjectEncoder};
use crate::error::{DecodeResult, EncodeResult};
use crate::value::DynamicValue;

/// Pagination block returned by list endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pagination {
    /// URL that reproduces the current page
    pub refresh_url: String,
    /// URL of the next page, absent on the last one
    pub next_url: Option<String>,
    /// Total number of objects (only with `include_count=true`)
    pub total: Option<i64>,
    /// Number of objects matching the query (only with `include_count=true`)
    pub matched: Option<i64>,
    pub refresh_cursor: Option<String>,
    pub next_cursor: Option<String>,
}

impl Decodable for Pagination {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            refresh_url: json.get_string("refresh_url")?,
            next_url: json.try_string("next_url"),
            total: json.try_i64("total"),
            matched: json.try_i64("matched"),
            refresh_cursor: json.try_string("refresh_cursor"),
            next_cursor: json.try_string("next_cursor"),
        })
    }
}

impl Encodable for Pagination {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert("refresh_url", self.refresh_url.clone())
            .insert_opt("next_url", self.next_url.clone())
            .insert_opt("total", self.total)
            .insert_opt("matched", self.matched)
            .insert_opt("refresh_cursor", self.refresh_cursor.clone())
            .insert_opt("next_cursor", self.next_cursor.clone());
        Ok(enc.finish())
    }
}

/// Model that appears in a paged list response
pub trait CollectionItem: Decodable + Encodable {
    /// Wire key of the item array, e.g. `"intents"`
    const COLLECTION_KEY: &'static str;
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cursor for the following page, if there is one
    pub fn next_cursor(&self) -> Option<&str> {
        self.pagination.next_cursor.as_deref()
    }
}

impl<T: CollectionItem> Decodable for Collection<T> {
    fn decode(json: &DynamicValue) -> DecodeResult<Self> {
        Ok(Self {
            items: json.decoded_array(T::COLLECTION_KEY)?,
            pagination: json.decode("pagination")?,
        })
    }
}

impl<T: CollectionItem> Encodable for Collection<T> {
    fn encode(&self) -> EncodeResult<JsonObject> {
        let mut enc = ObjectEncoder::new();
        enc.insert_models(T::COLLECTION_KEY, &self.items)?
            .insert_model("pagination", &self.pagination)?;
        Ok(enc.finish())
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

//! dialog-core - Typed JSON codec and data models for the dialog service
//!
//! Every model implements the [`Decodable`]/[`Encodable`] pair. Decoding goes
//! through [`DynamicValue`], whose `get_*` accessors read required fields and
//! whose `try_*` accessors read optional ones; encoding goes through
//! [`ObjectEncoder`], which leaves absent optional fields out of the output.
//!
//! ```rust
//! use dialog_core::{decode_slice, Encodable, Intent};
//!
//! let body = br#"{"intent":"pizza_order","description":"","created":"2017-01-01","updated":"2017-01-01"}"#;
//! let intent: Intent = decode_slice(body).unwrap();
//! assert_eq!(intent.intent_name, "pizza_order");
//! assert_eq!(intent.encode().unwrap().len(), 4);
//! ```

pub mod codec;
pub mod error;
pub mod models;
pub mod value;

pub use codec::{decode_slice, encode_to_vec, Decodable, Encodable, JsonObject, ObjectEncoder};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult, JsonType};
pub use models::*;
pub use value::DynamicValue;

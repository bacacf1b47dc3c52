//! UUID document ids.
//!
//! The driver's raw serializer writes a `Uuid` as binary while `to_bson`
//! writes it as a string, so a filter built one way misses documents
//! written the other. Ids are stored as strings on both paths instead.

use mongodb::bson::{Document, doc};
use serde::{Deserialize, Deserializer, Serializer};
use uuid::Uuid;

/// Serde adapter storing a `Uuid` as its hyphenated string.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Hotel {
///     #[serde(rename = "_id", with = "database::mongodb::uuid_as_string")]
///     id: Uuid,
/// }
/// ```
pub mod uuid_as_string {
    use super::*;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// `{ "_id": "<uuid>" }`
pub fn id_filter(id: Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{from_document, to_document};
    use serde::Serialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        #[serde(rename = "_id", with = "uuid_as_string")]
        id: Uuid,
    }

    #[test]
    fn test_id_round_trips_as_string() {
        let record = Record { id: Uuid::now_v7() };
        let document = to_document(&record).unwrap();

        assert_eq!(document, id_filter(record.id));
        assert_eq!(from_document::<Record>(document).unwrap(), record);
    }

    #[test]
    fn test_malformed_id_is_rejected() {
        let err = from_document::<Record>(doc! { "_id": "not-a-uuid" });
        assert!(err.is_err());
    }

    #[test]
    fn test_json_form_is_plain_string() {
        let id = Uuid::nil();
        let json = serde_json::to_value(Record { id }).unwrap();
        assert_eq!(json["_id"], id.to_string());
    }
}

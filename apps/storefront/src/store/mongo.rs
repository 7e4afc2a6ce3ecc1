//! # MongoDB Store
//!
//! Document store backed by the official MongoDB driver.
//!
//! The driver owns connection pooling and thread safety; a single
//! `MongoStore` is shared process-wide. `_id` values are converted to hex
//! strings and surfaced as `id`. Filters are translated from
//! `DocumentFilter`; text filters become an escaped, case-insensitive
//! `$regex` so they match exactly what the in-process predicate matches.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, Bson, Document as BsonDocument, doc, oid::ObjectId};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::{Client, Database};
use serde_json::Value;
use storefront_core::document::ID_FIELD;
use storefront_core::{Document, DocumentFilter, StorefrontError};

use super::{DocumentStore, StoreHealth};

/// MongoDB-backed document store.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl std::fmt::Debug for MongoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoStore")
            .field("database", &self.database.name())
            .finish_non_exhaustive()
    }
}

impl MongoStore {
    /// Build a client for `url` and select database `name`.
    ///
    /// The driver connects lazily; an unreachable server surfaces on the first
    /// operation, not here.
    pub async fn connect(url: &str, name: &str) -> Result<Self, StorefrontError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| StorefrontError::ConfigError(format!("Invalid DATABASE_URL: {}", e)))?;
        Ok(Self {
            database: client.database(name),
        })
    }

    fn collection(&self, name: &str) -> mongodb::Collection<BsonDocument> {
        self.database.collection::<BsonDocument>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongo"
    }

    fn is_valid_id(&self, id: &str) -> bool {
        ObjectId::parse_str(id).is_ok()
    }

    async fn create(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, StorefrontError> {
        document.remove(ID_FIELD);
        document.remove("_id");

        let bson_document = bson::to_document(&document)
            .map_err(|e| StorefrontError::WriteError(e.to_string()))?;

        let result = self
            .collection(collection)
            .insert_one(bson_document)
            .await
            .map_err(|e| classify(e, StorefrontError::WriteError))?;

        Ok(id_to_string(result.inserted_id))
    }

    async fn query(
        &self,
        collection: &str,
        filter: &DocumentFilter,
        limit: i64,
    ) -> Result<Vec<Document>, StorefrontError> {
        let cursor = self
            .collection(collection)
            .find(to_bson_filter(filter))
            .limit(limit)
            .await
            .map_err(|e| classify(e, StorefrontError::QueryError))?;

        let raw: Vec<BsonDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| classify(e, StorefrontError::QueryError))?;

        raw.into_iter().map(normalize).collect()
    }

    async fn health_check(&self) -> StoreHealth {
        let name = self.database.name().to_string();
        match self.database.list_collection_names().await {
            Ok(names) => StoreHealth::working(name, names),
            Err(e) => {
                tracing::warn!("Listing collections failed: {}", e);
                StoreHealth::degraded(name, &e.to_string())
            }
        }
    }
}

// =============================================================================
// TRANSLATION
// =============================================================================

/// Map a driver error: server selection failures mean no usable connection.
fn classify(error: MongoError, otherwise: fn(String) -> StorefrontError) -> StorefrontError {
    match *error.kind {
        ErrorKind::ServerSelection { .. } => {
            tracing::warn!("MongoDB server selection failed: {}", error);
            StorefrontError::StoreUnavailable
        }
        _ => otherwise(error.to_string()),
    }
}

fn to_bson_filter(filter: &DocumentFilter) -> BsonDocument {
    match filter {
        DocumentFilter::All => BsonDocument::new(),
        DocumentFilter::IdEquals(id) => match ObjectId::parse_str(id) {
            Ok(oid) => doc! { "_id": oid },
            Err(_) => doc! { "_id": id.as_str() },
        },
        DocumentFilter::TextContains { filter, fields } => {
            let pattern = filter.escaped_pattern();
            let clauses: Vec<Bson> = fields
                .iter()
                .map(|field| {
                    let mut clause = BsonDocument::new();
                    clause.insert(
                        field.as_str(),
                        doc! { "$regex": pattern.as_str(), "$options": "i" },
                    );
                    Bson::Document(clause)
                })
                .collect();
            doc! { "$or": clauses }
        }
    }
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

/// Replace `_id` with a string `id` and convert to plain JSON.
fn normalize(mut raw: BsonDocument) -> Result<Document, StorefrontError> {
    let id = raw
        .remove("_id")
        .map(id_to_string)
        .ok_or_else(|| StorefrontError::MalformedDocument("document without _id".to_string()))?;

    match Bson::Document(raw).into_relaxed_extjson() {
        Value::Object(mut map) => {
            map.insert(ID_FIELD.to_string(), Value::String(id));
            Ok(map)
        }
        other => Err(StorefrontError::MalformedDocument(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::TextFilter;

    #[test]
    fn object_id_filter_uses_native_type() {
        let hex = "65f0a1b2c3d4e5f601234567";
        let filter = to_bson_filter(&DocumentFilter::IdEquals(hex.to_string()));
        assert!(matches!(filter.get("_id"), Some(Bson::ObjectId(_))));
    }

    #[test]
    fn non_object_id_filter_uses_string() {
        let filter = to_bson_filter(&DocumentFilter::IdEquals("sample-1".to_string()));
        assert_eq!(filter.get_str("_id").ok(), Some("sample-1"));
    }

    #[test]
    fn text_filter_becomes_escaped_case_insensitive_regex() {
        let text = TextFilter::parse(Some("a.b")).expect("filter");
        let filter = to_bson_filter(&DocumentFilter::text(text, &["title", "description"]));

        let clauses = filter.get_array("$or").expect("$or");
        assert_eq!(clauses.len(), 2);
        let first = clauses[0].as_document().expect("clause");
        let regex = first.get_document("title").expect("title");
        assert_eq!(regex.get_str("$regex").ok(), Some(r"a\.b"));
        assert_eq!(regex.get_str("$options").ok(), Some("i"));
    }

    #[test]
    fn normalize_replaces_object_id() {
        let oid = ObjectId::new();
        let raw = doc! { "_id": oid, "title": "Lamp", "price": 12.5 };
        let doc = normalize(raw).expect("normalize");

        assert_eq!(doc.get("id").and_then(Value::as_str), Some(oid.to_hex().as_str()));
        assert!(doc.get("_id").is_none());
        assert_eq!(doc.get("price").and_then(Value::as_f64), Some(12.5));
    }

    #[test]
    fn normalize_requires_id() {
        assert!(normalize(doc! { "title": "Lamp" }).is_err());
    }

    #[test]
    fn id_to_string_handles_string_ids() {
        assert_eq!(id_to_string(Bson::String("abc".into())), "abc");
    }
}

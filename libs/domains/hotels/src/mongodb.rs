//! MongoDB implementation of HotelRepository

use async_trait::async_trait;
use database::mongodb::id_filter;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, from_document},
    options::{Collation, CollationStrength, IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::HotelResult;
use crate::models::{Hotel, LookupQuery, SearchQuery};
use crate::repository::HotelRepository;

/// MongoDB implementation of the HotelRepository
pub struct MongoHotelRepository {
    collection: Collection<Hotel>,
}

impl MongoHotelRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "hotels")
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Hotel>(collection_name);
        Self { collection }
    }

    /// Create the text index used by search and the country index used by
    /// browsing. Safe to run on every start.
    pub async fn init_indexes(&self) -> HotelResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! {
                    "hotel_name": "text",
                    "hotel_description": "text",
                    "country": "text",
                })
                .options(
                    IndexOptions::builder()
                        .name("idx_text_search".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "country": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_country".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "available": 1, "star_rating": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_available_rating".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Hotel indexes created successfully");
        Ok(())
    }

    pub fn collection(&self) -> &Collection<Hotel> {
        &self.collection
    }

    // English, primary strength: ignores case and accents
    fn name_collation() -> Collation {
        Collation::builder()
            .locale("en")
            .strength(CollationStrength::Primary)
            .build()
    }

    fn lookup_filter(query: &LookupQuery) -> Option<Document> {
        let mut clauses = Vec::new();
        if let Some(id) = query.id {
            clauses.push(id_filter(id));
        }
        if let Some(ref name) = query.name {
            clauses.push(doc! { "hotel_name": name });
        }

        if clauses.is_empty() {
            None
        } else {
            Some(doc! { "$or": clauses })
        }
    }

    fn sample_available_pipeline(size: i64) -> Vec<Document> {
        vec![
            doc! { "$match": { "available": true } },
            doc! { "$sample": { "size": size } },
        ]
    }

    fn sample_countries_pipeline(size: i64) -> Vec<Document> {
        vec![
            doc! { "$group": { "_id": "$country" } },
            doc! { "$sample": { "size": size } },
        ]
    }

    /// `$text` must be the first stage; it is left out for a blank destination.
    fn search_pipeline(query: &SearchQuery) -> Vec<Document> {
        let mut pipeline = Vec::with_capacity(3);

        if !query.destination.is_empty() {
            // Quoted so the whole destination is matched as one phrase
            let phrase = format!("\"{}\"", query.destination.replace('"', ""));
            pipeline.push(doc! { "$match": { "$text": { "$search": phrase } } });
        }

        pipeline.push(doc! {
            "$match": { "available": true, "star_rating": { "$gte": query.stars } }
        });
        pipeline.push(doc! { "$sort": { "cost_per_night": query.order.direction() } });

        pipeline
    }

    async fn aggregate_hotels(&self, pipeline: Vec<Document>) -> HotelResult<Vec<Hotel>> {
        let documents: Vec<Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        documents
            .into_iter()
            .map(|document| Ok(from_document::<Hotel>(document)?))
            .collect()
    }
}

#[async_trait]
impl HotelRepository for MongoHotelRepository {
    #[instrument(skip(self, hotel), fields(hotel_name = %hotel.hotel_name))]
    async fn insert(&self, hotel: Hotel) -> HotelResult<Hotel> {
        self.collection.insert_one(&hotel).await?;

        tracing::info!(hotel_id = %hotel.id, "Hotel created successfully");
        Ok(hotel)
    }

    #[instrument(skip(self))]
    async fn find_available(&self) -> HotelResult<Vec<Hotel>> {
        let cursor = self.collection.find(doc! { "available": true }).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn sample_available(&self, size: i64) -> HotelResult<Vec<Hotel>> {
        self.aggregate_hotels(Self::sample_available_pipeline(size))
            .await
    }

    #[instrument(skip(self))]
    async fn sample_countries(&self, size: i64) -> HotelResult<Vec<String>> {
        let groups: Vec<Document> = self
            .collection
            .aggregate(Self::sample_countries_pipeline(size))
            .await?
            .try_collect()
            .await?;

        Ok(groups
            .iter()
            .filter_map(|group| group.get_str("_id").ok().map(str::to_string))
            .collect())
    }

    #[instrument(skip(self))]
    async fn distinct_countries(&self) -> HotelResult<Vec<String>> {
        let values = self.collection.distinct("country", doc! {}).await?;

        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(country) => Some(country),
                _ => None,
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_country(&self, country: String) -> HotelResult<Vec<Hotel>> {
        let cursor = self.collection.find(doc! { "country": country }).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> HotelResult<Option<Hotel>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_id_or_name(&self, query: LookupQuery) -> HotelResult<Vec<Hotel>> {
        let Some(filter) = Self::lookup_filter(&query) else {
            return Ok(Vec::new());
        };

        let cursor = self
            .collection
            .find(filter)
            .collation(Self::name_collation())
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn search(&self, query: SearchQuery) -> HotelResult<Vec<Hotel>> {
        self.aggregate_hotels(Self::search_pipeline(&query)).await
    }

    #[instrument(skip(self, hotel))]
    async fn replace(&self, id: Uuid, hotel: Hotel) -> HotelResult<Option<Hotel>> {
        let updated = self
            .collection
            .find_one_and_replace(id_filter(id), &hotel)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(hotel_id = %id, "Hotel updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> HotelResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(hotel_id = %id, "Hotel deleted successfully");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceOrder;

    fn query(destination: &str, stars: i32, order: PriceOrder) -> SearchQuery {
        SearchQuery {
            destination: destination.to_string(),
            stars,
            order,
        }
    }

    #[test]
    fn test_search_pipeline_stages() {
        let pipeline =
            MongoHotelRepository::search_pipeline(&query("Paris", 3, PriceOrder::Descending));

        assert_eq!(pipeline.len(), 3);
        assert_eq!(
            pipeline[0],
            doc! { "$match": { "$text": { "$search": "\"Paris\"" } } }
        );
        assert_eq!(
            pipeline[1],
            doc! { "$match": { "available": true, "star_rating": { "$gte": 3 } } }
        );
        assert_eq!(pipeline[2], doc! { "$sort": { "cost_per_night": -1 } });
    }

    #[test]
    fn test_search_pipeline_skips_text_for_blank_destination() {
        let pipeline =
            MongoHotelRepository::search_pipeline(&query("", 1, PriceOrder::Ascending));

        assert_eq!(pipeline.len(), 2);
        assert!(pipeline[0].get_document("$match").unwrap().contains_key("available"));
        assert_eq!(pipeline[1], doc! { "$sort": { "cost_per_night": 1 } });
    }

    #[test]
    fn test_search_pipeline_strips_quotes() {
        let pipeline = MongoHotelRepository::search_pipeline(&query(
            "New \"York\"",
            1,
            PriceOrder::Ascending,
        ));
        assert_eq!(
            pipeline[0],
            doc! { "$match": { "$text": { "$search": "\"New York\"" } } }
        );
    }

    #[test]
    fn test_lookup_filter() {
        assert!(MongoHotelRepository::lookup_filter(&LookupQuery::default()).is_none());

        let filter = MongoHotelRepository::lookup_filter(&LookupQuery {
            id: Some(Uuid::now_v7()),
            name: Some("ritz".to_string()),
        })
        .unwrap();
        assert_eq!(filter.get_array("$or").unwrap().len(), 2);

        let filter = MongoHotelRepository::lookup_filter(&LookupQuery {
            id: None,
            name: Some("ritz".to_string()),
        })
        .unwrap();
        assert_eq!(
            filter,
            doc! { "$or": [ { "hotel_name": "ritz" } ] }
        );
    }

    #[test]
    fn test_sample_pipelines() {
        assert_eq!(
            MongoHotelRepository::sample_available_pipeline(9),
            vec![
                doc! { "$match": { "available": true } },
                doc! { "$sample": { "size": 9_i64 } },
            ]
        );
        assert_eq!(
            MongoHotelRepository::sample_countries_pipeline(9)[0],
            doc! { "$group": { "_id": "$country" } }
        );
    }
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::HotelResult;
use crate::models::{Hotel, LookupQuery, SearchQuery};

/// Repository trait for Hotel persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Insert a new hotel
    async fn insert(&self, hotel: Hotel) -> HotelResult<Hotel>;

    /// Every available hotel, in store order
    async fn find_available(&self) -> HotelResult<Vec<Hotel>>;

    /// Random sample of up to `size` available hotels
    async fn sample_available(&self, size: i64) -> HotelResult<Vec<Hotel>>;

    /// Random sample of up to `size` distinct countries, over all hotels
    async fn sample_countries(&self, size: i64) -> HotelResult<Vec<String>>;

    /// Distinct countries over all hotels
    async fn distinct_countries(&self) -> HotelResult<Vec<String>>;

    /// Hotels whose country equals `country` exactly, available or not
    async fn find_by_country(&self, country: String) -> HotelResult<Vec<Hotel>>;

    async fn find_by_id(&self, id: Uuid) -> HotelResult<Option<Hotel>>;

    /// Hotels matching the id or the name (case and accent insensitive)
    async fn find_by_id_or_name(&self, query: LookupQuery) -> HotelResult<Vec<Hotel>>;

    /// Text search over available hotels, ordered by price
    async fn search(&self, query: SearchQuery) -> HotelResult<Vec<Hotel>>;

    /// Replace the stored document, returning the new version if it existed
    async fn replace(&self, id: Uuid, hotel: Hotel) -> HotelResult<Option<Hotel>>;

    /// Delete by id; `false` when nothing matched
    async fn delete(&self, id: Uuid) -> HotelResult<bool>;
}

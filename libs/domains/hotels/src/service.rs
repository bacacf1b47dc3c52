//! Hotel Service - Business logic layer

use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::error::{HotelError, HotelResult};
use crate::images::{ImageHost, ImageUpload, StagedImage};
use crate::models::{HomePage, Hotel, HotelForm, LookupQuery, SearchQuery};
use crate::repository::HotelRepository;

/// Hotels and countries shown on the home page
pub const HOME_SAMPLE_SIZE: i64 = 9;

/// Hotel service providing query and mutation operations
///
/// Mutations that carry an image upload it first and commit second; an
/// upload that the commit never references is discarded again.
pub struct HotelService<R: HotelRepository> {
    repository: Arc<R>,
    images: Arc<dyn ImageHost>,
}

impl<R: HotelRepository> HotelService<R> {
    pub fn new(repository: R, images: Arc<dyn ImageHost>) -> Self {
        Self {
            repository: Arc::new(repository),
            images,
        }
    }

    /// Every available hotel
    #[instrument(skip(self))]
    pub async fn list_available(&self) -> HotelResult<Vec<Hotel>> {
        self.repository.find_available().await
    }

    /// Random hotels and countries for the home page, sampled concurrently
    #[instrument(skip(self))]
    pub async fn home_page(&self) -> HotelResult<HomePage> {
        let (hotels, countries) = tokio::try_join!(
            self.repository.sample_available(HOME_SAMPLE_SIZE),
            self.repository.sample_countries(HOME_SAMPLE_SIZE),
        )?;

        Ok(HomePage { hotels, countries })
    }

    #[instrument(skip(self))]
    pub async fn list_countries(&self) -> HotelResult<Vec<String>> {
        self.repository.distinct_countries().await
    }

    #[instrument(skip(self))]
    pub async fn hotels_by_country(&self, country: String) -> HotelResult<Vec<Hotel>> {
        self.repository.find_by_country(country).await
    }

    #[instrument(skip(self))]
    pub async fn get_hotel(&self, id: Uuid) -> HotelResult<Hotel> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(HotelError::NotFound(id))
    }

    /// Admin lookup by id or name; an empty query matches nothing
    #[instrument(skip(self))]
    pub async fn find_for_edit(&self, query: LookupQuery) -> HotelResult<Vec<Hotel>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.find_by_id_or_name(query).await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: SearchQuery) -> HotelResult<Vec<Hotel>> {
        self.repository.search(query).await
    }

    /// Create a hotel, attaching the uploaded image if one was sent
    #[instrument(skip(self, form, upload), fields(hotel_name = %form.hotel_name))]
    pub async fn create_hotel(
        &self,
        form: HotelForm,
        upload: Option<ImageUpload>,
    ) -> HotelResult<Hotel> {
        form.validate()?;

        let staged = StagedImage::stage(self.images.as_ref(), upload)
            .await
            .map_err(HotelError::ImageUpload)?;

        let mut hotel = Hotel::new(form);
        if let Some(public_id) = staged.public_id() {
            hotel.image = Some(public_id.to_string());
        }

        match self.repository.insert(hotel).await {
            Ok(hotel) => Ok(hotel),
            Err(e) => {
                staged.discard(self.images.as_ref()).await;
                Err(e)
            }
        }
    }

    /// Replace every editable field of an existing hotel
    #[instrument(skip(self, form, upload))]
    pub async fn update_hotel(
        &self,
        id: Uuid,
        form: HotelForm,
        upload: Option<ImageUpload>,
    ) -> HotelResult<Hotel> {
        form.validate()?;

        let existing = self.get_hotel(id).await?;

        let staged = StagedImage::stage(self.images.as_ref(), upload)
            .await
            .map_err(HotelError::ImageUpload)?;

        let mut replacement = existing.replaced_by(form);
        if let Some(public_id) = staged.public_id() {
            replacement.image = Some(public_id.to_string());
        }

        match self.repository.replace(id, replacement).await {
            Ok(Some(hotel)) => Ok(hotel),
            Ok(None) => {
                // Deleted between the lookup and the replace
                staged.discard(self.images.as_ref()).await;
                Err(HotelError::NotFound(id))
            }
            Err(e) => {
                staged.discard(self.images.as_ref()).await;
                Err(e)
            }
        }
    }

    /// Delete a hotel. Deleting an id that doesn't exist is not an error.
    #[instrument(skip(self))]
    pub async fn delete_hotel(&self, id: Uuid) -> HotelResult<()> {
        if !self.repository.delete(id).await? {
            debug!(hotel_id = %id, "Nothing to delete");
        }
        Ok(())
    }

    /// Browser URL for a stored image id
    pub fn image_url(&self, public_id: &str) -> String {
        self.images.public_url(public_id)
    }
}

impl<R: HotelRepository> Clone for HotelService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            images: Arc::clone(&self.images),
        }
    }
}

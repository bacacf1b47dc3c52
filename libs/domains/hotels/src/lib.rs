//! Hotels Domain
//!
//! Hotel listings stored in MongoDB: public browsing and search, plus the
//! admin pages that create, update and delete listings.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← Pages, forms, flash messages
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │   Service   │ ──▶ │ Image host  │  ← Cloudinary uploads
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, forms, queries
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_hotels::{
//!     handlers, images::DisabledImageHost, mongodb::MongoHotelRepository,
//!     service::HotelService, views,
//! };
//! use axum_helpers::Views;
//! use mongodb::Client;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("hotels");
//!
//! let repository = MongoHotelRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = HotelService::new(repository, Arc::new(DisabledImageHost));
//!
//! let views = Views::builder()?.templates(views::templates())?.build();
//! let router = handlers::router(service, views);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod format;
pub mod handlers;
pub mod images;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod views;

// Re-export commonly used types
pub use error::{HotelError, HotelResult};
pub use format::format_text;
pub use images::{
    CloudinaryConfig, CloudinaryImageHost, DisabledImageHost, ImageError, ImageHost, ImageUpload,
};
pub use models::{Hotel, HotelForm, LookupQuery, PriceOrder, SearchForm, SearchQuery};
pub use mongodb::MongoHotelRepository;
pub use repository::HotelRepository;
pub use service::HotelService;

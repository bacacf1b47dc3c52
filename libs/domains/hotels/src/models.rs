use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::error::{HotelError, HotelResult};
use crate::format::format_text;

/// Hotel entity - a listing stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "database::mongodb::uuid_as_string")]
    pub id: Uuid,
    pub hotel_name: String,
    pub hotel_description: String,
    /// Title-cased on create
    pub country: String,
    pub cost_per_night: f64,
    /// 1 to 5
    pub star_rating: i32,
    /// Only available hotels are listed publicly
    pub available: bool,
    /// Image host public id
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitted create/update form.
///
/// Built from multipart text fields; the file part travels separately as an
/// [`ImageUpload`](crate::images::ImageUpload).
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct HotelForm {
    #[validate(length(min = 1, max = 200))]
    pub hotel_name: String,
    #[validate(length(max = 5000))]
    pub hotel_description: String,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(range(min = 0.0))]
    pub cost_per_night: f64,
    #[validate(range(min = 1, max = 5))]
    pub star_rating: i32,
    pub available: bool,
    /// Current image id carried by the update form's hidden field
    pub image: Option<String>,
}

impl HotelForm {
    /// Build a form from submitted text fields.
    ///
    /// Missing text fields are empty, a missing checkbox is `false`. Numbers
    /// must parse when present; a missing number is 0 and left to validation.
    pub fn from_fields(mut fields: HashMap<String, String>) -> HotelResult<Self> {
        let mut take = |name: &str| fields.remove(name).unwrap_or_default();

        let hotel_name = take("hotel_name").trim().to_string();
        let hotel_description = take("hotel_description").trim().to_string();
        let country = take("country").trim().to_string();
        let cost_per_night = parse_cost(&take("cost_per_night"))?;
        let star_rating = parse_number("star_rating", &take("star_rating"))?;
        let available = is_checked(&take("available"));
        let image = Some(take("image").trim().to_string()).filter(|s| !s.is_empty());

        Ok(Self {
            hotel_name,
            hotel_description,
            country,
            cost_per_night,
            star_rating,
            available,
            image,
        })
    }
}

fn parse_number<T>(field: &'static str, raw: &str) -> HotelResult<T>
where
    T: std::str::FromStr + Default,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse().map_err(|_| HotelError::InvalidField {
        field,
        value: raw.to_string(),
    })
}

// "NaN" and "inf" parse as f64 but are not prices
fn parse_cost(raw: &str) -> HotelResult<f64> {
    let cost: f64 = parse_number("cost_per_night", raw)?;
    if !cost.is_finite() {
        return Err(HotelError::InvalidField {
            field: "cost_per_night",
            value: raw.trim().to_string(),
        });
    }
    Ok(cost)
}

// HTML checkboxes post "on" by default
fn is_checked(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

impl Hotel {
    /// Create a new hotel from a validated form, title-casing the country
    pub fn new(form: HotelForm) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            hotel_name: form.hotel_name,
            hotel_description: form.hotel_description,
            country: format_text(&form.country),
            cost_per_night: form.cost_per_night,
            star_rating: form.star_rating,
            available: form.available,
            image: form.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replacement of every editable field, keeping identity and
    /// creation time.
    pub fn replaced_by(&self, form: HotelForm) -> Self {
        Self {
            id: self.id,
            hotel_name: form.hotel_name,
            hotel_description: form.hotel_description,
            country: form.country,
            cost_per_night: form.cost_per_night,
            star_rating: form.star_rating,
            available: form.available,
            image: form.image,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// Raw search form; every field is optional text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub stars: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

/// Sort direction on `cost_per_night`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceOrder {
    #[default]
    Ascending,
    Descending,
}

impl PriceOrder {
    /// MongoDB `$sort` direction
    pub fn direction(self) -> i32 {
        match self {
            PriceOrder::Ascending => 1,
            PriceOrder::Descending => -1,
        }
    }
}

/// Search parameters after lenient parsing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    /// Phrase matched against the text index; blank matches everything
    pub destination: String,
    /// Minimum star rating, at least 1
    pub stars: i32,
    pub order: PriceOrder,
}

impl From<SearchForm> for SearchQuery {
    /// Malformed numbers fall back to defaults instead of failing: `stars`
    /// becomes 1 and `sort` ascending.
    fn from(form: SearchForm) -> Self {
        let stars = form
            .stars
            .as_deref()
            .and_then(parse_leading_int)
            .filter(|stars| *stars >= 1)
            .map(|stars| stars.min(i32::MAX as i64) as i32)
            .unwrap_or(1);

        let order = match form.sort.as_deref().and_then(parse_leading_int) {
            Some(n) if n < 0 => PriceOrder::Descending,
            _ => PriceOrder::Ascending,
        };

        Self {
            destination: form.destination.unwrap_or_default().trim().to_string(),
            stars,
            order,
        }
    }
}

/// Integer prefix of `raw` ("4.5" is 4, "3 stars" is 3, "abc" is `None`).
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end]
        .parse::<i64>()
        .ok()
        .map(|n| sign * n)
}

/// Raw edit/remove lookup form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub hotel_id: Option<String>,
    #[serde(default)]
    pub hotel_name: Option<String>,
}

/// Admin lookup by id and/or name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupQuery {
    pub id: Option<Uuid>,
    pub name: Option<String>,
}

impl LookupQuery {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}

impl From<LookupForm> for LookupQuery {
    /// Blank values are absent; an id that isn't a UUID can't match
    /// anything and is dropped.
    fn from(form: LookupForm) -> Self {
        let id = form
            .hotel_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| Uuid::parse_str(s).ok());
        let name = form
            .hotel_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self { id, name }
    }
}

/// Home page data
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    pub hotels: Vec<Hotel>,
    pub countries: Vec<String>,
}

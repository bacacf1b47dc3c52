//! Hotel page templates and the data they render.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Hotel, SearchQuery};
use crate::repository::HotelRepository;
use crate::service::HotelService;

pub const INDEX: &str = "index";
pub const ALL_HOTELS: &str = "all_hotels";
pub const ALL_COUNTRIES: &str = "all_countries";
pub const HOTELS_BY_COUNTRY: &str = "hotels_by_country";
pub const HOTEL_DETAIL: &str = "hotel_detail";
pub const SEARCH_RESULTS: &str = "search_results";
pub const ADMIN: &str = "admin";
pub const HOTEL_FORM: &str = "hotel_form";
pub const EDIT_REMOVE: &str = "edit_remove";

/// `(name, source)` for every hotel template, ready for
/// [`ViewsBuilder::templates`](axum_helpers::ViewsBuilder::templates).
pub fn templates() -> [(&'static str, &'static str); 10] {
    [
        ("hotel_card", include_str!("../templates/hotel_card.hbs")),
        (INDEX, include_str!("../templates/index.hbs")),
        (ALL_HOTELS, include_str!("../templates/all_hotels.hbs")),
        (ALL_COUNTRIES, include_str!("../templates/all_countries.hbs")),
        (HOTELS_BY_COUNTRY, include_str!("../templates/hotels_by_country.hbs")),
        (HOTEL_DETAIL, include_str!("../templates/hotel_detail.hbs")),
        (SEARCH_RESULTS, include_str!("../templates/search_results.hbs")),
        (ADMIN, include_str!("../templates/admin.hbs")),
        (HOTEL_FORM, include_str!("../templates/hotel_form.hbs")),
        (EDIT_REMOVE, include_str!("../templates/edit_remove.hbs")),
    ]
}

/// A hotel as templates see it, with its image resolved to a URL
#[derive(Debug, Clone, Serialize)]
pub struct HotelView {
    pub id: Uuid,
    pub hotel_name: String,
    pub hotel_description: String,
    pub country: String,
    pub cost_per_night: f64,
    pub star_rating: i32,
    pub available: bool,
    pub image: Option<String>,
    pub image_url: Option<String>,
}

impl HotelView {
    pub fn new<R: HotelRepository>(hotel: Hotel, service: &HotelService<R>) -> Self {
        let image_url = hotel.image.as_deref().map(|id| service.image_url(id));
        Self {
            id: hotel.id,
            hotel_name: hotel.hotel_name,
            hotel_description: hotel.hotel_description,
            country: hotel.country,
            cost_per_night: hotel.cost_per_night,
            star_rating: hotel.star_rating,
            available: hotel.available,
            image: hotel.image,
            image_url,
        }
    }

    pub fn list<R: HotelRepository>(hotels: Vec<Hotel>, service: &HotelService<R>) -> Vec<Self> {
        hotels
            .into_iter()
            .map(|hotel| Self::new(hotel, service))
            .collect()
    }
}

#[derive(Serialize)]
pub struct HomeData {
    pub hotels: Vec<HotelView>,
    pub countries: Vec<String>,
}

#[derive(Serialize)]
pub struct HotelListData {
    pub hotels: Vec<HotelView>,
}

#[derive(Serialize)]
pub struct CountriesData {
    pub countries: Vec<String>,
}

#[derive(Serialize)]
pub struct CountryData {
    pub country: String,
    pub hotels: Vec<HotelView>,
}

#[derive(Serialize)]
pub struct DetailData {
    pub hotel: HotelView,
}

#[derive(Serialize)]
pub struct SearchData {
    pub query: SearchQuery,
    pub hotels: Vec<HotelView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Update,
    Delete,
}

/// The add/update/delete form; `hotel` is absent when creating
#[derive(Serialize)]
pub struct FormData {
    pub mode: FormMode,
    pub action: String,
    pub hotel: Option<HotelView>,
}

#[derive(Serialize)]
pub struct LookupData {
    pub matches: Vec<HotelView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::MockImageHost;
    use crate::models::{HotelForm, PriceOrder};
    use crate::repository::MockHotelRepository;
    use axum::response::Html;
    use axum_helpers::{RequestContext, SessionUser, Views};
    use std::sync::Arc;

    fn views() -> Views {
        Views::builder()
            .unwrap()
            .templates(templates())
            .unwrap()
            .build()
    }

    fn service() -> HotelService<MockHotelRepository> {
        let mut images = MockImageHost::new();
        images
            .expect_public_url()
            .returning(|id| format!("https://img.test/{}", id));
        HotelService::new(MockHotelRepository::new(), Arc::new(images))
    }

    fn hotel(name: &str, available: bool) -> Hotel {
        let mut hotel = Hotel::new(HotelForm {
            hotel_name: name.to_string(),
            hotel_description: "Sea views".to_string(),
            country: "greece".to_string(),
            cost_per_night: 99.5,
            star_rating: 4,
            available,
            image: None,
        });
        hotel.image = Some("hotels/sea".to_string());
        hotel
    }

    fn admin() -> RequestContext {
        RequestContext {
            user: Some(SessionUser {
                id: Uuid::now_v7(),
                username: "admin".to_string(),
                is_admin: true,
            }),
            ..RequestContext::anonymous("/")
        }
    }

    #[test]
    fn test_every_template_registers() {
        let views = views();
        for (name, _) in templates() {
            assert!(views.has_template(name), "{} missing", name);
        }
    }

    #[test]
    fn test_hotel_view_resolves_image_url() {
        let view = HotelView::new(hotel("Blue Door", true), &service());
        assert_eq!(view.image_url.as_deref(), Some("https://img.test/hotels/sea"));
        assert_eq!(view.country, "Greece");
    }

    #[test]
    fn test_listing_renders_cards() {
        let service = service();
        let data = HotelListData {
            hotels: HotelView::list(vec![hotel("Blue Door", true)], &service),
        };

        let Html(html) = views()
            .page(ALL_HOTELS, &RequestContext::anonymous("/all"), "All Hotels", data)
            .unwrap();

        assert!(html.contains("Blue Door"));
        assert!(html.contains("$99.50 per night"));
        assert!(html.contains("href=\"/countries/Greece\""));
        assert!(html.contains("https://img.test/hotels/sea"));
    }

    #[test]
    fn test_country_links_are_percent_encoded() {
        let data = CountriesData {
            countries: vec!["Trinidad/Tobago".to_string(), "Côte D'ivoire".to_string()],
        };

        let Html(html) = views()
            .page(ALL_COUNTRIES, &RequestContext::anonymous("/countries"), "Browse by country", data)
            .unwrap();

        assert!(html.contains("href=\"/countries/Trinidad%2FTobago\""));
        assert!(html.contains("href=\"/countries/C%C3%B4te%20D%27ivoire\""));
    }

    #[test]
    fn test_detail_shows_admin_actions_only_to_admins() {
        let service = service();
        let data = || DetailData {
            hotel: HotelView::new(hotel("Blue Door", false), &service),
        };

        let Html(anonymous) = views()
            .page(HOTEL_DETAIL, &RequestContext::anonymous("/all/x"), "Blue Door", data())
            .unwrap();
        assert!(!anonymous.contains("/update"));
        assert!(anonymous.contains("Not currently taking bookings"));

        let Html(admin) = views()
            .page(HOTEL_DETAIL, &admin(), "Blue Door", data())
            .unwrap();
        assert!(admin.contains("/update\""));
        assert!(admin.contains("/delete\""));
    }

    #[test]
    fn test_update_form_is_prefilled() {
        let service = service();
        let hotel = HotelView::new(hotel("Blue Door", true), &service);
        let data = FormData {
            mode: FormMode::Update,
            action: format!("/admin/{}/update", hotel.id),
            hotel: Some(hotel),
        };

        let Html(html) = views()
            .page(HOTEL_FORM, &admin(), "Update hotel", data)
            .unwrap();

        assert!(html.contains("value=\"Blue Door\""));
        assert!(html.contains("name=\"image\" value=\"hotels/sea\""));
        assert!(html.contains(" checked"));
        assert!(html.contains("multipart/form-data"));
    }

    #[test]
    fn test_delete_form_asks_for_confirmation() {
        let service = service();
        let data = FormData {
            mode: FormMode::Delete,
            action: "/admin/x/delete".to_string(),
            hotel: Some(HotelView::new(hotel("Blue Door", true), &service)),
        };

        let Html(html) = views()
            .page(HOTEL_FORM, &admin(), "Delete hotel", data)
            .unwrap();
        assert!(html.contains("Delete <strong>Blue Door</strong>"));
        assert!(!html.contains("multipart/form-data"));
    }

    #[test]
    fn test_search_summary() {
        let data = SearchData {
            query: SearchQuery {
                destination: "Paris".to_string(),
                stars: 3,
                order: PriceOrder::Descending,
            },
            hotels: vec![],
        };

        let Html(html) = views()
            .page(SEARCH_RESULTS, &RequestContext::anonymous("/results"), "Search results", data)
            .unwrap();
        assert!(html.contains("3+ stars"));
        assert!(html.contains("high to low"));
        assert!(html.contains("No hotels match your search."));
    }
}

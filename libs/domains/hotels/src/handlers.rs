use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_helpers::{AppError, Flash, RequestContext, UuidPath, Views, require_admin};
use std::collections::HashMap;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::warn;

use crate::error::HotelError;
use crate::images::ImageUpload;
use crate::models::{HotelForm, LookupForm, LookupQuery, SearchForm, SearchQuery};
use crate::repository::HotelRepository;
use crate::service::HotelService;
use crate::views::{
    self, CountriesData, CountryData, DetailData, FormData, FormMode, HomeData, HotelListData,
    HotelView, LookupData, SearchData,
};

/// Largest accepted hotel form, image included
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const IMAGE_UPLOAD_FAILED: &str =
    "Sorry there was a problem uploading your image, please try again...";

/// Router state shared by every hotel handler
pub struct HotelState<R: HotelRepository> {
    pub service: HotelService<R>,
    pub views: Views,
}

type AppState<R> = State<Arc<HotelState<R>>>;

/// Create the hotels router: public browsing plus the admin pages behind
/// [`require_admin`].
pub fn router<R: HotelRepository + 'static>(service: HotelService<R>, views: Views) -> Router {
    let admin = Router::new()
        .route("/admin", get(admin_page))
        .route("/admin/add", get(add_form).post(create_hotel))
        .route(
            "/admin/edit-remove",
            get(edit_remove_form).post(edit_remove_lookup),
        )
        .route("/admin/{hotel_id}/update", get(update_form).post(update_hotel))
        .route("/admin/{hotel_id}/delete", get(delete_form).post(delete_hotel))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(home_page))
        .route("/all", get(all_hotels))
        .route("/all/{hotel}", get(hotel_detail))
        .route("/countries", get(all_countries))
        .route("/countries/{country}", get(hotels_by_country))
        .route("/results", post(search_results))
        .merge(admin)
        .with_state(Arc::new(HotelState { service, views }))
}

async fn home_page<R: HotelRepository>(
    State(state): AppState<R>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let home = state.service.home_page().await?;
    let data = HomeData {
        hotels: HotelView::list(home.hotels, &state.service),
        countries: home.countries,
    };
    state.views.page(views::INDEX, &ctx, "Lets travel", data)
}

async fn all_hotels<R: HotelRepository>(
    State(state): AppState<R>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let hotels = state.service.list_available().await?;
    let data = HotelListData {
        hotels: HotelView::list(hotels, &state.service),
    };
    state.views.page(views::ALL_HOTELS, &ctx, "All Hotels", data)
}

async fn all_countries<R: HotelRepository>(
    State(state): AppState<R>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let countries = state.service.list_countries().await?;
    state
        .views
        .page(views::ALL_COUNTRIES, &ctx, "Browse by country", CountriesData { countries })
}

async fn hotels_by_country<R: HotelRepository>(
    State(state): AppState<R>,
    Path(country): Path<String>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let hotels = state.service.hotels_by_country(country.clone()).await?;
    let title = format!("Browse by country: {}", country);
    let data = CountryData {
        country,
        hotels: HotelView::list(hotels, &state.service),
    };
    state.views.page(views::HOTELS_BY_COUNTRY, &ctx, &title, data)
}

async fn hotel_detail<R: HotelRepository>(
    State(state): AppState<R>,
    UuidPath(id): UuidPath,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let hotel = state.service.get_hotel(id).await?;
    let title = hotel.hotel_name.clone();
    let data = DetailData {
        hotel: HotelView::new(hotel, &state.service),
    };
    state.views.page(views::HOTEL_DETAIL, &ctx, &title, data)
}

async fn search_results<R: HotelRepository>(
    State(state): AppState<R>,
    ctx: RequestContext,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    let query = SearchQuery::from(form);
    let hotels = state.service.search(query.clone()).await?;
    let data = SearchData {
        query,
        hotels: HotelView::list(hotels, &state.service),
    };
    state.views.page(views::SEARCH_RESULTS, &ctx, "Search results", data)
}

async fn admin_page<R: HotelRepository>(
    State(state): AppState<R>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    state.views.page(views::ADMIN, &ctx, "Admin", ())
}

async fn add_form<R: HotelRepository>(
    State(state): AppState<R>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let data = FormData {
        mode: FormMode::Create,
        action: "/admin/add".to_string(),
        hotel: None,
    };
    state.views.page(views::HOTEL_FORM, &ctx, "Add new hotel", data)
}

async fn create_hotel<R: HotelRepository>(
    State(state): AppState<R>,
    session: Session,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (form, upload) = read_hotel_form(multipart).await?;
    let flash = Flash::new(&session);

    match state.service.create_hotel(form, upload).await {
        Ok(hotel) => {
            flash
                .success(format!("{} created successfully!", hotel.hotel_name))
                .await?;
            Ok(Redirect::to(&format!("/all/{}", hotel.id)).into_response())
        }
        Err(HotelError::ImageUpload(e)) => {
            warn!("Image upload failed: {}", e);
            flash.error(IMAGE_UPLOAD_FAILED).await?;
            Ok(Redirect::to("/admin/add").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn edit_remove_form<R: HotelRepository>(
    State(state): AppState<R>,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let data = LookupData { matches: vec![] };
    state
        .views
        .page(views::EDIT_REMOVE, &ctx, "Search for hotel to edit or remove", data)
}

async fn edit_remove_lookup<R: HotelRepository>(
    State(state): AppState<R>,
    session: Session,
    ctx: RequestContext,
    Form(form): Form<LookupForm>,
) -> Result<Response, AppError> {
    let matches = state
        .service
        .find_for_edit(LookupQuery::from(form))
        .await?;

    if matches.is_empty() {
        Flash::new(&session).info("No matches were found...").await?;
        return Ok(Redirect::to("/admin/edit-remove").into_response());
    }

    let data = LookupData {
        matches: HotelView::list(matches, &state.service),
    };
    Ok(state
        .views
        .page(views::EDIT_REMOVE, &ctx, "Add / Remove Hotel", data)?
        .into_response())
}

async fn update_form<R: HotelRepository>(
    State(state): AppState<R>,
    UuidPath(id): UuidPath,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let hotel = state.service.get_hotel(id).await?;
    let data = FormData {
        mode: FormMode::Update,
        action: format!("/admin/{}/update", id),
        hotel: Some(HotelView::new(hotel, &state.service)),
    };
    state.views.page(views::HOTEL_FORM, &ctx, "Update hotel", data)
}

async fn update_hotel<R: HotelRepository>(
    State(state): AppState<R>,
    session: Session,
    UuidPath(id): UuidPath,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (form, upload) = read_hotel_form(multipart).await?;
    let flash = Flash::new(&session);

    match state.service.update_hotel(id, form, upload).await {
        Ok(hotel) => {
            flash
                .success(format!("{} updated successfully", hotel.hotel_name))
                .await?;
            Ok(Redirect::to(&format!("/all/{}", hotel.id)).into_response())
        }
        Err(HotelError::ImageUpload(e)) => {
            warn!(hotel_id = %id, "Image upload failed: {}", e);
            flash.error(IMAGE_UPLOAD_FAILED).await?;
            Ok(Redirect::to(&format!("/admin/{}/update", id)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn delete_form<R: HotelRepository>(
    State(state): AppState<R>,
    UuidPath(id): UuidPath,
    ctx: RequestContext,
) -> Result<Html<String>, AppError> {
    let hotel = state.service.get_hotel(id).await?;
    let data = FormData {
        mode: FormMode::Delete,
        action: format!("/admin/{}/delete", id),
        hotel: Some(HotelView::new(hotel, &state.service)),
    };
    state.views.page(views::HOTEL_FORM, &ctx, "Delete hotel", data)
}

async fn delete_hotel<R: HotelRepository>(
    State(state): AppState<R>,
    session: Session,
    UuidPath(id): UuidPath,
) -> Result<Redirect, AppError> {
    state.service.delete_hotel(id).await?;
    Flash::new(&session)
        .info(format!("Hotel ID: {} has been deleted", id))
        .await?;
    Ok(Redirect::to("/"))
}

/// Split a multipart hotel form into its text fields and the image file.
///
/// The file input and the hidden current-image field may share a name; a
/// part with a file name is the file. An empty file means "no new image".
async fn read_hotel_form(
    mut multipart: Multipart,
) -> Result<(HotelForm, Option<ImageUpload>), AppError> {
    let mut fields = HashMap::new();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    upload = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            None => {
                fields.insert(name, field.text().await?);
            }
        }
    }

    Ok((HotelForm::from_fields(fields)?, upload))
}

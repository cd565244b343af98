//! HTTP handler functions for the store map API.

use actix_web::{HttpResponse, web};
use store_map_analytics::{AnalyticsError, ClassifyOptions};
use store_map_dataset::{DatasetError, Selection};
use store_map_landmark_models::LandmarkTable;
use store_map_palette::MarkerColor;
use store_map_server_models::{
    AnalysisQueryParams, ApiCategoryCount, ApiCity, ApiExpansionAnalysis, ApiHealth, ApiLandmark,
    ApiStore, ApiStoreAnalysis,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/cities`
///
/// Lists the cities available for selection.
pub async fn cities(state: web::Data<AppState>) -> HttpResponse {
    let cities: Vec<ApiCity> = state
        .cache
        .config()
        .cities
        .iter()
        .map(|city| ApiCity {
            name: city.name.clone(),
            dir: city.dir.clone(),
        })
        .collect();

    HttpResponse::Ok().json(cities)
}

/// `GET /api/stores`
///
/// Lists every registry store, for the store overview map.
pub async fn stores(state: web::Data<AppState>) -> HttpResponse {
    let stores: Vec<ApiStore> = state.stores.iter().map(ApiStore::from).collect();
    HttpResponse::Ok().json(stores)
}

/// `GET /api/cities/{city}/stores`
///
/// Lists the store codes that have a landmark file in the city directory.
pub async fn city_stores(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let city = path.into_inner();
    match store_map_dataset::list_store_codes(state.cache.config(), &city) {
        Ok(codes) => HttpResponse::Ok().json(codes),
        Err(e) => dataset_error_response(&city, &e),
    }
}

/// `GET /api/cities/{city}/stores/{code}/analysis`
///
/// Runs the full landmark analytics pipeline for one store selection.
pub async fn store_analysis(
    state: web::Data<AppState>,
    path: web::Path<(String, u32)>,
    params: web::Query<AnalysisQueryParams>,
) -> HttpResponse {
    let (city, store_code) = path.into_inner();

    let Some(store) = store_map_registry::find_store(&state.stores, store_code) else {
        return HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Store code {store_code} not found.")
        }));
    };

    let selection = Selection::Store {
        city: city.clone(),
        store_code,
    };
    let table = match state.cache.load(&selection) {
        Ok(table) => table,
        Err(e) => return dataset_error_response(&selection.to_string(), &e),
    };

    let with_distances = match store_map_analytics::compute_distances(&table, store.coords) {
        Ok(table) => table,
        Err(e) => return analytics_error_response(&e),
    };

    let options = ClassifyOptions {
        z_threshold: params
            .threshold
            .unwrap_or(store_map_analytics::DEFAULT_Z_THRESHOLD),
    };
    let classified = match store_map_analytics::classify(&with_distances, &options) {
        Ok(classified) => classified,
        Err(e) => return analytics_error_response(&e),
    };

    let colors = color_map_for(&state, &with_distances);
    let color_of = |property_type: &store_map_landmark_models::PropertyType| {
        colors.get(property_type).copied().unwrap_or(MarkerColor::Gray)
    };

    let landmarks: Vec<ApiLandmark> = classified
        .iter()
        .map(|landmark| ApiLandmark::from_classified(landmark, color_of(&landmark.property_type)))
        .collect();

    let competitors: Vec<ApiLandmark> = store_map_analytics::filter_competitors(
        &with_distances,
        &state.cache.config().competitors,
    )
    .iter()
    .map(|landmark| ApiLandmark::from_landmark(landmark, color_of(&landmark.property_type)))
    .collect();

    let counts = store_map_analytics::aggregate_counts(&with_distances);

    HttpResponse::Ok().json(ApiStoreAnalysis {
        store: ApiStore::from(store),
        threshold: options.z_threshold,
        landmarks,
        counts: ApiCategoryCount::list(&counts),
        competitors,
    })
}

/// `GET /api/cities/{city}/comparison`
///
/// Aggregates landmark counts across every area of a city into the
/// zero-filled comparison matrix.
pub async fn comparison(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let city = path.into_inner();

    let codes = match store_map_dataset::list_store_codes(state.cache.config(), &city) {
        Ok(codes) => codes,
        Err(e) => return dataset_error_response(&city, &e),
    };

    let mut areas = Vec::with_capacity(codes.len());
    for store_code in codes {
        let selection = Selection::Store {
            city: city.clone(),
            store_code,
        };
        match state.cache.load(&selection) {
            Ok(table) => areas.push((store_code.to_string(), (*table).clone())),
            Err(e) => return dataset_error_response(&selection.to_string(), &e),
        }
    }

    HttpResponse::Ok().json(store_map_analytics::compare_areas(&areas))
}

/// `GET /api/expansion`
///
/// Lists the candidate expansion areas.
pub async fn expansion_areas(state: web::Data<AppState>) -> HttpResponse {
    match store_map_dataset::list_expansion_areas(state.cache.config()) {
        Ok(areas) => HttpResponse::Ok().json(areas),
        Err(e) => dataset_error_response("expansion areas", &e),
    }
}

/// `GET /api/expansion/{area}/analysis`
///
/// Chart payload for one expansion area. Expansion areas have no store
/// point, so landmarks come back without distances or classification.
pub async fn expansion_analysis(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let area = path.into_inner();
    let selection = Selection::Expansion { area: area.clone() };

    let table = match state.cache.load(&selection) {
        Ok(table) => table,
        Err(e) => return dataset_error_response(&selection.to_string(), &e),
    };

    let colors = color_map_for(&state, &table);
    let landmarks: Vec<ApiLandmark> = table
        .iter()
        .map(|landmark| {
            let color = colors
                .get(&landmark.property_type)
                .copied()
                .unwrap_or(MarkerColor::Gray);
            ApiLandmark::from_landmark(landmark, color)
        })
        .collect();

    let counts = store_map_analytics::aggregate_counts(&table);

    HttpResponse::Ok().json(ApiExpansionAnalysis {
        area,
        center: store_map_analytics::table_center(&table),
        landmarks,
        counts: ApiCategoryCount::list(&counts),
    })
}

fn color_map_for(
    state: &AppState,
    table: &LandmarkTable,
) -> std::collections::BTreeMap<store_map_landmark_models::PropertyType, MarkerColor> {
    let types = table.property_types();
    store_map_palette::color_map(&types, &state.color_overrides)
}

fn dataset_error_response(subject: &str, error: &DatasetError) -> HttpResponse {
    match error {
        DatasetError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("No data found for {subject}")
            }))
        }
        DatasetError::UnknownCity(city) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Unknown city `{city}`")
        })),
        DatasetError::MissingColumn { .. }
        | DatasetError::InvalidValue { .. }
        | DatasetError::Csv(_) => {
            log::warn!("Malformed input for {subject}: {error}");
            HttpResponse::UnprocessableEntity().json(serde_json::json!({
                "error": error.to_string()
            }))
        }
        _ => {
            log::error!("Failed to load {subject}: {error}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to load {subject}")
            }))
        }
    }
}

fn analytics_error_response(error: &AnalyticsError) -> HttpResponse {
    log::warn!("Analytics pipeline failed: {error}");
    HttpResponse::UnprocessableEntity().json(serde_json::json!({
        "error": error.to_string()
    }))
}

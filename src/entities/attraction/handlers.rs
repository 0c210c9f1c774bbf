//! Attraction HTTP handlers

use super::model::{Attraction, AttractionFields, AttractionInput, AttractionQuery};
use super::view::AttractionView;
use crate::core::error::{ApiResult, EntityError, parse_id};
use crate::core::hyperlink::BaseUrl;
use crate::core::validation::ValidatedJson;
use crate::entities::park_area::handlers::find_park_area;
use crate::server::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_attractions(
    State(state): State<AppState>,
    base: BaseUrl,
    Query(query): Query<AttractionQuery>,
) -> ApiResult<Json<Vec<AttractionView>>> {
    let attractions = match query.area.as_deref() {
        Some(raw) => {
            let area_id = parse_id(raw)?;
            state.store.attractions.find_by("area_id", area_id).await?
        }
        None => state.store.attractions.list().await?,
    };

    Ok(Json(
        attractions
            .iter()
            .map(|attraction| AttractionView::render(attraction, &base))
            .collect(),
    ))
}

pub async fn get_attraction(
    State(state): State<AppState>,
    base: BaseUrl,
    Path(id): Path<String>,
) -> ApiResult<Json<AttractionView>> {
    let id = parse_id(&id)?;
    let attraction = find_attraction(&state, id).await?;
    Ok(Json(AttractionView::render(&attraction, &base)))
}

pub async fn create_attraction(
    State(state): State<AppState>,
    base: BaseUrl,
    ValidatedJson(input): ValidatedJson<AttractionInput>,
) -> ApiResult<(StatusCode, Json<AttractionView>)> {
    find_park_area(&state, input.area_id).await?;

    let attraction = state
        .store
        .attractions
        .create(AttractionFields::from(input))
        .await?;

    tracing::info!(id = attraction.id, area_id = attraction.area_id, "attraction created");
    Ok((
        StatusCode::CREATED,
        Json(AttractionView::render(&attraction, &base)),
    ))
}

pub async fn update_attraction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<AttractionInput>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    find_attraction(&state, id).await?;
    find_park_area(&state, input.area_id).await?;

    state
        .store
        .attractions
        .update(id, AttractionFields::from(input))
        .await?
        .ok_or(EntityError::NotFound {
            entity_type: "attraction",
            id,
        })?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_attraction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    find_attraction(&state, id).await?;

    // Itineraries keep their rows and render the attraction as null
    let detached = state
        .store
        .itineraries
        .detach("attraction_id", id)
        .await?;

    if !state.store.attractions.delete(id).await? {
        return Err(EntityError::NotFound {
            entity_type: "attraction",
            id,
        }
        .into());
    }

    tracing::info!(id, detached, "attraction deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch an Attraction or fail with NotFound
pub(crate) async fn find_attraction(state: &AppState, id: i64) -> ApiResult<Attraction> {
    Ok(state
        .store
        .attractions
        .get(id)
        .await?
        .ok_or(EntityError::NotFound {
            entity_type: "attraction",
            id,
        })?)
}

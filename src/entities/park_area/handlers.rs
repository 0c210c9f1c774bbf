//! ParkArea HTTP handlers

use super::model::{ParkArea, ParkAreaFields, ParkAreaInput};
use super::view::ParkAreaView;
use crate::core::error::{ApiResult, EntityError, parse_id};
use crate::core::hyperlink::BaseUrl;
use crate::core::validation::ValidatedJson;
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_park_areas(
    State(state): State<AppState>,
    base: BaseUrl,
) -> ApiResult<Json<Vec<ParkAreaView>>> {
    let areas = state.store.park_areas.list().await?;

    Ok(Json(
        areas
            .iter()
            .map(|area| ParkAreaView::render(area, &base))
            .collect(),
    ))
}

pub async fn get_park_area(
    State(state): State<AppState>,
    base: BaseUrl,
    Path(id): Path<String>,
) -> ApiResult<Json<ParkAreaView>> {
    let id = parse_id(&id)?;
    let area = find_park_area(&state, id).await?;
    Ok(Json(ParkAreaView::render(&area, &base)))
}

pub async fn create_park_area(
    State(state): State<AppState>,
    base: BaseUrl,
    ValidatedJson(input): ValidatedJson<ParkAreaInput>,
) -> ApiResult<(StatusCode, Json<ParkAreaView>)> {
    let area = state
        .store
        .park_areas
        .create(ParkAreaFields::from(input))
        .await?;

    tracing::info!(id = area.id, name = %area.name, "park area created");
    Ok((StatusCode::CREATED, Json(ParkAreaView::render(&area, &base))))
}

pub async fn update_park_area(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ParkAreaInput>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    state
        .store
        .park_areas
        .update(id, ParkAreaFields::from(input))
        .await?
        .ok_or(EntityError::NotFound {
            entity_type: "parkarea",
            id,
        })?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_park_area(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    find_park_area(&state, id).await?;

    let attractions = state.store.attractions.find_by("area_id", id).await?;
    if !attractions.is_empty() {
        return Err(EntityError::Conflict {
            entity_type: "parkarea",
            message: format!(
                "area {} still has {} attraction(s); delete or move them first",
                id,
                attractions.len()
            ),
        }
        .into());
    }

    if !state.store.park_areas.delete(id).await? {
        return Err(EntityError::NotFound {
            entity_type: "parkarea",
            id,
        }
        .into());
    }

    tracing::info!(id, "park area deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch a ParkArea or fail with NotFound
pub(crate) async fn find_park_area(state: &AppState, id: i64) -> ApiResult<ParkArea> {
    Ok(state
        .store
        .park_areas
        .get(id)
        .await?
        .ok_or(EntityError::NotFound {
            entity_type: "parkarea",
            id,
        })?)
}

//! Itinerary HTTP handlers
//!
//! Every route is scoped to the caller's Customer; rows owned by someone
//! else are reported as missing.

use super::model::{Itinerary, ItineraryFields, ItineraryInput};
use super::view::{ItineraryRenderer, ItineraryView};
use crate::core::auth::AuthContext;
use crate::core::error::{ApiResult, EntityError, RequestError, ValidationError, parse_id};
use crate::core::hyperlink::BaseUrl;
use crate::core::media::image_extension;
use crate::core::validation::ValidatedJson;
use crate::entities::attraction::handlers::find_attraction;
use crate::entities::customer::current_customer;
use crate::server::state::AppState;
use axum::{
    Extension,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::Json,
};

const IMAGE_DIR: &str = "itineraries";

pub async fn list_itineraries(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    base: BaseUrl,
) -> ApiResult<Json<Vec<ItineraryView>>> {
    let customer = current_customer(state.store.customers.as_ref(), &auth).await?;

    let itineraries = state
        .store
        .itineraries
        .find_by("customer_id", customer.id)
        .await?;

    let views = ItineraryRenderer::new(&state.store, &base)
        .render_all(&itineraries)
        .await?;
    Ok(Json(views))
}

pub async fn get_itinerary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    base: BaseUrl,
    Path(id): Path<String>,
) -> ApiResult<Json<ItineraryView>> {
    let id = parse_id(&id)?;
    let itinerary = owned_itinerary(&state, &auth, id).await?;

    let view = ItineraryRenderer::new(&state.store, &base)
        .render(&itinerary)
        .await?;
    Ok(Json(view))
}

pub async fn create_itinerary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    base: BaseUrl,
    ValidatedJson(input): ValidatedJson<ItineraryInput>,
) -> ApiResult<(StatusCode, Json<ItineraryView>)> {
    let customer = current_customer(state.store.customers.as_ref(), &auth).await?;
    let attraction = find_attraction(&state, input.attraction_id).await?;

    let itinerary = state
        .store
        .itineraries
        .create(ItineraryFields {
            starttime: input.starttime,
            attraction_id: Some(attraction.id),
            customer_id: customer.id,
            image: None,
        })
        .await?;

    tracing::info!(
        id = itinerary.id,
        customer_id = customer.id,
        attraction_id = attraction.id,
        "itinerary created"
    );

    let view = ItineraryRenderer::new(&state.store, &base)
        .render(&itinerary)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update_itinerary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ItineraryInput>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let itinerary = owned_itinerary(&state, &auth, id).await?;
    let attraction = find_attraction(&state, input.attraction_id).await?;

    let fields = ItineraryFields {
        starttime: input.starttime,
        attraction_id: Some(attraction.id),
        ..itinerary.fields()
    };

    state
        .store
        .itineraries
        .update(id, fields)
        .await?
        .ok_or(EntityError::NotFound {
            entity_type: "itinerary",
            id,
        })?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_itinerary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let itinerary = owned_itinerary(&state, &auth, id).await?;

    if !state.store.itineraries.delete(id).await? {
        return Err(EntityError::NotFound {
            entity_type: "itinerary",
            id,
        }
        .into());
    }

    if let Some(path) = itinerary.image.as_deref() {
        discard_image(&state, path).await;
    }

    tracing::info!(id, "itinerary deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Store the request body as the itinerary's image
pub async fn upload_itinerary_image(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let itinerary = owned_itinerary(&state, &auth, id).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let extension =
        image_extension(content_type).ok_or_else(|| RequestError::UnsupportedMediaType {
            content_type: content_type.to_string(),
        })?;

    if body.is_empty() {
        return Err(ValidationError::FieldError {
            field: "image".to_string(),
            message: "image body is empty".to_string(),
        }
        .into());
    }

    let stored = state.media.save(IMAGE_DIR, extension, &body).await?;

    let fields = ItineraryFields {
        image: Some(stored.clone()),
        ..itinerary.fields()
    };

    if state.store.itineraries.update(id, fields).await?.is_none() {
        // Row vanished while the file was written
        discard_image(&state, &stored).await;
        return Err(EntityError::NotFound {
            entity_type: "itinerary",
            id,
        }
        .into());
    }

    if let Some(previous) = itinerary.image.as_deref() {
        discard_image(&state, previous).await;
    }

    tracing::info!(id, path = %stored, "itinerary image stored");
    Ok(StatusCode::NO_CONTENT)
}

/// Remove the itinerary's image, if any
pub async fn delete_itinerary_image(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let itinerary = owned_itinerary(&state, &auth, id).await?;

    let Some(previous) = itinerary.image.clone() else {
        return Ok(StatusCode::NO_CONTENT);
    };

    let fields = ItineraryFields {
        image: None,
        ..itinerary.fields()
    };
    if state.store.itineraries.update(id, fields).await?.is_none() {
        return Err(EntityError::NotFound {
            entity_type: "itinerary",
            id,
        }
        .into());
    }
    discard_image(&state, &previous).await;

    Ok(StatusCode::NO_CONTENT)
}

/// Fetch an itinerary owned by the caller, hiding everyone else's rows
async fn owned_itinerary(
    state: &AppState,
    auth: &AuthContext,
    id: i64,
) -> ApiResult<Itinerary> {
    let customer = current_customer(state.store.customers.as_ref(), auth).await?;

    let itinerary = state
        .store
        .itineraries
        .get(id)
        .await?
        .filter(|itinerary| itinerary.customer_id == customer.id)
        .ok_or(EntityError::NotFound {
            entity_type: "itinerary",
            id,
        })?;

    Ok(itinerary)
}

/// Best-effort file removal; the row is already updated
async fn discard_image(state: &AppState, path: &str) {
    if let Err(e) = state.media.remove(path).await {
        tracing::warn!(path = %path, error = %e, "failed to remove itinerary image");
    }
}

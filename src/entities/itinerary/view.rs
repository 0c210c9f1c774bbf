//! Itinerary representation with the attraction expanded two levels deep

use super::model::Itinerary;
use crate::core::Entity;
use crate::core::error::StorageResult;
use crate::core::hyperlink::BaseUrl;
use crate::entities::attraction::{Attraction, AttractionDetailView};
use crate::entities::park_area::ParkArea;
use crate::storage::EntityStore;
use serde::Serialize;
use std::collections::HashMap;

/// Read representation of an Itinerary
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryView {
    pub id: i64,
    pub url: String,
    pub starttime: i64,
    pub attraction_id: Option<i64>,
    /// `null` when the attraction no longer exists
    pub attraction: Option<AttractionDetailView>,
    pub image: Option<String>,
}

/// Renders itineraries, fetching each related row at most once
pub struct ItineraryRenderer<'a> {
    store: &'a EntityStore,
    base: &'a BaseUrl,
    attractions: HashMap<i64, Option<Attraction>>,
    areas: HashMap<i64, Option<ParkArea>>,
}

impl<'a> ItineraryRenderer<'a> {
    pub fn new(store: &'a EntityStore, base: &'a BaseUrl) -> Self {
        Self {
            store,
            base,
            attractions: HashMap::new(),
            areas: HashMap::new(),
        }
    }

    pub async fn render(&mut self, itinerary: &Itinerary) -> StorageResult<ItineraryView> {
        let attraction = match itinerary.attraction_id {
            Some(id) => self.expand_attraction(id).await?,
            None => None,
        };

        Ok(ItineraryView {
            id: itinerary.id,
            url: self.base.resource(Itinerary::resource_name(), itinerary.id),
            starttime: itinerary.starttime,
            attraction_id: itinerary.attraction_id,
            attraction,
            image: itinerary.image.as_deref().map(|path| self.base.media(path)),
        })
    }

    pub async fn render_all(&mut self, itineraries: &[Itinerary]) -> StorageResult<Vec<ItineraryView>> {
        let mut views = Vec::with_capacity(itineraries.len());
        for itinerary in itineraries {
            views.push(self.render(itinerary).await?);
        }
        Ok(views)
    }

    async fn expand_attraction(&mut self, id: i64) -> StorageResult<Option<AttractionDetailView>> {
        if !self.attractions.contains_key(&id) {
            let fetched = self.store.attractions.get(id).await?;
            if fetched.is_none() {
                tracing::warn!(attraction_id = id, "itinerary points at a missing attraction");
            }
            self.attractions.insert(id, fetched);
        }

        let Some(attraction) = self.attractions.get(&id).cloned().flatten() else {
            return Ok(None);
        };

        let area_id = attraction.area_id;
        if !self.areas.contains_key(&area_id) {
            let fetched = self.store.park_areas.get(area_id).await?;
            self.areas.insert(area_id, fetched);
        }
        let area = self.areas.get(&area_id).and_then(Option::as_ref);

        Ok(Some(AttractionDetailView::render(&attraction, area, self.base)))
    }
}

use super::model::Attraction;
use crate::core::Entity;
use crate::core::hyperlink::BaseUrl;
use crate::entities::park_area::{ParkArea, ParkAreaView};
use serde::Serialize;

/// Read representation of an Attraction
#[derive(Debug, Clone, Serialize)]
pub struct AttractionView {
    pub id: i64,
    pub url: String,
    pub name: String,
    pub area_id: i64,
}

impl AttractionView {
    pub fn render(attraction: &Attraction, base: &BaseUrl) -> Self {
        Self {
            id: attraction.id,
            url: base.resource(Attraction::resource_name(), attraction.id),
            name: attraction.name.clone(),
            area_id: attraction.area_id,
        }
    }
}

/// Attraction with its park area expanded, as nested inside an itinerary
#[derive(Debug, Clone, Serialize)]
pub struct AttractionDetailView {
    #[serde(flatten)]
    pub attraction: AttractionView,
    pub area: Option<ParkAreaView>,
}

impl AttractionDetailView {
    pub fn render(attraction: &Attraction, area: Option<&ParkArea>, base: &BaseUrl) -> Self {
        Self {
            attraction: AttractionView::render(attraction, base),
            area: area.map(|area| ParkAreaView::render(area, base)),
        }
    }
}

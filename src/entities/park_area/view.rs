use super::model::ParkArea;
use crate::core::Entity;
use crate::core::hyperlink::BaseUrl;
use serde::Serialize;

/// Read representation of a ParkArea
#[derive(Debug, Clone, Serialize)]
pub struct ParkAreaView {
    pub id: i64,
    pub url: String,
    pub name: String,
    pub theme: String,
}

impl ParkAreaView {
    pub fn render(area: &ParkArea, base: &BaseUrl) -> Self {
        Self {
            id: area.id,
            url: base.resource(ParkArea::resource_name(), area.id),
            name: area.name.clone(),
            theme: area.theme.clone(),
        }
    }
}

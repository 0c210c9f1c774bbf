//! Attraction entity model

use crate::core::Entity;
use crate::core::validation::trimmed;
use serde::Deserialize;
use validator::Validate;

/// A ride or show located in one park area
#[derive(Debug, Clone, PartialEq)]
pub struct Attraction {
    pub id: i64,
    pub name: String,
    pub area_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttractionFields {
    pub name: String,
    pub area_id: i64,
}

impl Entity for Attraction {
    type Fields = AttractionFields;

    fn resource_name() -> &'static str {
        "attractions"
    }

    fn resource_name_singular() -> &'static str {
        "attraction"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_parts(id: i64, fields: AttractionFields) -> Self {
        Self {
            id,
            name: fields.name,
            area_id: fields.area_id,
        }
    }

    fn references() -> &'static [&'static str] {
        &["area_id"]
    }

    fn reference(&self, field: &str) -> Option<i64> {
        match field {
            "area_id" => Some(self.area_id),
            _ => None,
        }
    }
}

/// Request body for create and update
#[derive(Debug, Deserialize, Validate)]
pub struct AttractionInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "name must be 1 to 255 characters"))]
    pub name: String,

    #[validate(range(min = 1, message = "area_id must be a positive id"))]
    pub area_id: i64,
}

impl From<AttractionInput> for AttractionFields {
    fn from(input: AttractionInput) -> Self {
        Self {
            name: input.name,
            area_id: input.area_id,
        }
    }
}

/// Query string accepted by the list route
///
/// `area` stays a string here so a malformed value surfaces as a
/// validation error instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AttractionQuery {
    pub area: Option<String>,
}

//! Itinerary entity model

use crate::core::Entity;
use serde::Deserialize;
use validator::Validate;

/// A customer's planned visit to an attraction
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub id: i64,
    pub starttime: i64,
    /// `None` once the attraction has been deleted
    pub attraction_id: Option<i64>,
    pub customer_id: i64,
    /// Path of the uploaded image relative to the media root
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryFields {
    pub starttime: i64,
    pub attraction_id: Option<i64>,
    pub customer_id: i64,
    pub image: Option<String>,
}

impl Itinerary {
    /// Current fields, for updates that change only part of the row
    pub fn fields(&self) -> ItineraryFields {
        ItineraryFields {
            starttime: self.starttime,
            attraction_id: self.attraction_id,
            customer_id: self.customer_id,
            image: self.image.clone(),
        }
    }
}

impl Entity for Itinerary {
    type Fields = ItineraryFields;

    fn resource_name() -> &'static str {
        "itineraries"
    }

    fn resource_name_singular() -> &'static str {
        "itinerary"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_parts(id: i64, fields: ItineraryFields) -> Self {
        Self {
            id,
            starttime: fields.starttime,
            attraction_id: fields.attraction_id,
            customer_id: fields.customer_id,
            image: fields.image,
        }
    }

    fn references() -> &'static [&'static str] {
        &["attraction_id", "customer_id"]
    }

    fn reference(&self, field: &str) -> Option<i64> {
        match field {
            "attraction_id" => self.attraction_id,
            "customer_id" => Some(self.customer_id),
            _ => None,
        }
    }

    fn detachable() -> &'static [&'static str] {
        &["attraction_id"]
    }

    fn detach(&mut self, field: &str) {
        if field == "attraction_id" {
            self.attraction_id = None;
        }
    }

    fn sort_key(&self) -> (i64, i64) {
        (self.starttime, self.id)
    }
}

/// Request body for create and update
///
/// The owning customer is never taken from the body.
#[derive(Debug, Deserialize, Validate)]
pub struct ItineraryInput {
    #[validate(range(min = 0, message = "starttime must not be negative"))]
    pub starttime: i64,

    #[serde(alias = "ride_id")]
    #[validate(range(min = 1, message = "attraction_id must be a positive id"))]
    pub attraction_id: i64,
}

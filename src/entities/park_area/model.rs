//! ParkArea entity model

use crate::core::Entity;
use crate::core::validation::trimmed;
use serde::Deserialize;
use validator::Validate;

/// A themed section of the park
#[derive(Debug, Clone, PartialEq)]
pub struct ParkArea {
    pub id: i64,
    pub name: String,
    pub theme: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParkAreaFields {
    pub name: String,
    pub theme: String,
}

impl Entity for ParkArea {
    type Fields = ParkAreaFields;

    fn resource_name() -> &'static str {
        "parkareas"
    }

    fn resource_name_singular() -> &'static str {
        "parkarea"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_parts(id: i64, fields: ParkAreaFields) -> Self {
        Self {
            id,
            name: fields.name,
            theme: fields.theme,
        }
    }
}

/// Request body for create and update
#[derive(Debug, Deserialize, Validate)]
pub struct ParkAreaInput {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "name must be 1 to 255 characters"))]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "theme must be 1 to 255 characters"))]
    pub theme: String,
}

impl From<ParkAreaInput> for ParkAreaFields {
    fn from(input: ParkAreaInput) -> Self {
        Self {
            name: input.name,
            theme: input.theme,
        }
    }
}

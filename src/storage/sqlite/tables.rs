//! Column mappings between entities and their SQLite tables

use crate::core::Entity;
use crate::entities::attraction::{Attraction, AttractionFields};
use crate::entities::customer::{Customer, CustomerFields};
use crate::entities::itinerary::{Itinerary, ItineraryFields};
use crate::entities::park_area::{ParkArea, ParkAreaFields};
use sqlx::Row;
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};

/// Query type produced by `sqlx::query` for SQLite
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// An entity stored in its own SQLite table
///
/// `COLUMNS` lists the writable columns in the order `bind_fields` binds
/// them; the `id` column is implied.
pub trait SqlEntity: Entity {
    /// Table name
    const TABLE: &'static str;

    /// Writable columns, excluding `id`
    const COLUMNS: &'static [&'static str];

    /// `ORDER BY` clause for list queries
    const ORDER_BY: &'static str;

    /// Bind the fields in `COLUMNS` order
    fn bind_fields<'q>(fields: &Self::Fields, query: SqliteQuery<'q>) -> SqliteQuery<'q>;

    /// Decode a row selected as `id, COLUMNS...`
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;
}

impl SqlEntity for Customer {
    const TABLE: &'static str = "customer";
    const COLUMNS: &'static [&'static str] = &["account_id", "family_members"];
    const ORDER_BY: &'static str = "id";

    fn bind_fields<'q>(fields: &CustomerFields, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(fields.account_id).bind(fields.family_members)
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Customer {
            id: row.try_get("id")?,
            account_id: row.try_get("account_id")?,
            family_members: row.try_get("family_members")?,
        })
    }
}

impl SqlEntity for ParkArea {
    const TABLE: &'static str = "park_area";
    const COLUMNS: &'static [&'static str] = &["name", "theme"];
    const ORDER_BY: &'static str = "id";

    fn bind_fields<'q>(fields: &ParkAreaFields, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(fields.name.clone()).bind(fields.theme.clone())
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(ParkArea {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            theme: row.try_get("theme")?,
        })
    }
}

impl SqlEntity for Attraction {
    const TABLE: &'static str = "attraction";
    const COLUMNS: &'static [&'static str] = &["name", "area_id"];
    const ORDER_BY: &'static str = "id";

    fn bind_fields<'q>(fields: &AttractionFields, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(fields.name.clone()).bind(fields.area_id)
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Attraction {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            area_id: row.try_get("area_id")?,
        })
    }
}

impl SqlEntity for Itinerary {
    const TABLE: &'static str = "itinerary";
    const COLUMNS: &'static [&'static str] =
        &["starttime", "attraction_id", "customer_id", "image"];
    const ORDER_BY: &'static str = "starttime, id";

    fn bind_fields<'q>(fields: &ItineraryFields, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(fields.starttime)
            .bind(fields.attraction_id)
            .bind(fields.customer_id)
            .bind(fields.image.clone())
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Itinerary {
            id: row.try_get("id")?,
            starttime: row.try_get("starttime")?,
            attraction_id: row.try_get("attraction_id")?,
            customer_id: row.try_get("customer_id")?,
            image: row.try_get("image")?,
        })
    }
}

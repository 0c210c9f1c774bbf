//! Entity trait defining the core abstraction for stored rows

/// Base trait for every row type kept in the entity store.
///
/// An entity is an integer primary key plus a set of writable fields
/// (`Self::Fields`). Stores assign ids on insert and rebuild entities from
/// the id and the fields with [`Entity::from_parts`], so create and update
/// take fields only and full-replace semantics fall out naturally.
///
/// Foreign keys are exposed by name so that generic stores can filter on
/// them (`find_by`) and null them out (`detach`) without knowing the
/// concrete type.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Writable fields (everything except the primary key)
    type Fields: Clone + Send + Sync + 'static;

    /// The plural resource name used in URLs (e.g., "parkareas")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "parkarea")
    fn resource_name_singular() -> &'static str;

    /// Get the primary key of this entity
    fn id(&self) -> i64;

    /// Rebuild an entity from its primary key and fields
    fn from_parts(id: i64, fields: Self::Fields) -> Self;

    /// Foreign-key fields that can be used to filter rows
    fn references() -> &'static [&'static str] {
        &[]
    }

    /// Value of a foreign-key field, `None` when unset or unknown
    fn reference(&self, _field: &str) -> Option<i64> {
        None
    }

    /// Nullable foreign-key fields that may be cleared when the target goes away
    fn detachable() -> &'static [&'static str] {
        &[]
    }

    /// Clear a nullable foreign key
    fn detach(&mut self, _field: &str) {}

    /// Display order for lists: rows sort ascending on this key
    fn sort_key(&self) -> (i64, i64) {
        (self.id(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Ride {
        id: i64,
        fields: RideFields,
    }

    #[derive(Clone, Debug)]
    struct RideFields {
        area_id: Option<i64>,
    }

    impl Entity for Ride {
        type Fields = RideFields;

        fn resource_name() -> &'static str {
            "rides"
        }

        fn resource_name_singular() -> &'static str {
            "ride"
        }

        fn id(&self) -> i64 {
            self.id
        }

        fn from_parts(id: i64, fields: RideFields) -> Self {
            Self { id, fields }
        }

        fn references() -> &'static [&'static str] {
            &["area_id"]
        }

        fn reference(&self, field: &str) -> Option<i64> {
            match field {
                "area_id" => self.fields.area_id,
                _ => None,
            }
        }

        fn detachable() -> &'static [&'static str] {
            &["area_id"]
        }

        fn detach(&mut self, field: &str) {
            if field == "area_id" {
                self.fields.area_id = None;
            }
        }
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(Ride::resource_name(), "rides");
        assert_eq!(Ride::resource_name_singular(), "ride");
    }

    #[test]
    fn test_default_sort_key_is_id() {
        let ride = Ride::from_parts(9, RideFields { area_id: Some(1) });
        assert_eq!(ride.sort_key(), (9, 0));
    }

    #[test]
    fn test_detach_clears_reference() {
        let mut ride = Ride::from_parts(1, RideFields { area_id: Some(4) });
        assert_eq!(ride.reference("area_id"), Some(4));
        ride.detach("area_id");
        assert_eq!(ride.reference("area_id"), None);
        assert_eq!(ride.reference("unknown"), None);
    }
}

//! Establishment catalog: the typed store plus name-based lookup.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::store::TypedStore;
use crate::{EngineError, Establishment, establishments};

/// [`TypedStore`] specialization for establishments.
///
/// Adds the exact-match name lookup used to resolve release categories and
/// to guard name uniqueness before a create. Built by composition around the
/// generic store, not by extending it.
#[derive(Clone)]
pub struct EstablishmentCatalog {
    store: TypedStore<Establishment>,
    db: DatabaseConnection,
}

impl EstablishmentCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            store: TypedStore::new(db.clone()),
            db,
        }
    }

    /// The underlying generic store.
    pub fn store(&self) -> &TypedStore<Establishment> {
        &self.store
    }

    /// Exact, case-sensitive lookup by canonical name.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Establishment>, EngineError> {
        let model = establishments::Entity::find()
            .filter(establishments::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        model.map(Establishment::try_from).transpose()
    }
}

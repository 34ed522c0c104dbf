//! Core engine for the personal statements service.
//!
//! Two stores and one pure computation:
//!
//! - [`EstablishmentCatalog`]: merchants with a unique name and a free-form
//!   category, over a generic [`TypedStore`].
//! - [`TransactionLedger`]: releases (single transactions) over the same
//!   generic store.
//! - [`aggregate`]: joins releases against the catalog and sums them per
//!   (date, category, payment method) group.
//!
//! The [`Engine`] facade owns both stores and carries the orchestration the
//! HTTP layer relies on (uniqueness guard, existence checks, timestamp
//! preservation). All store calls are async and atomic at the single-record
//! level; check-then-act sequences (get before update/remove) are *not*
//! atomic and race concurrent writers — the losers receive the
//! not-acknowledged outcomes. Name uniqueness is the exception: a unique
//! index backs the pre-check, so concurrent duplicate creates cannot both
//! win.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema, SqlErr};

pub use catalog::EstablishmentCatalog;
pub use error::EngineError;
pub use establishments::{Establishment, EstablishmentCmd, KIND_MAX_LEN, NAME_MAX_LEN};
pub use ids::RecordId;
pub use ledger::TransactionLedger;
pub use releases::{PaymentMethod, Release, ReleaseCmd};
pub use statement::{Statement, aggregate};
pub use store::{StoredRecord, TypedStore};

mod catalog;
mod error;
mod establishments;
mod ids;
mod ledger;
mod releases;
mod statement;
mod store;

type ResultEngine<T> = Result<T, EngineError>;

/// Facade over the catalog, the ledger and the statement aggregation.
pub struct Engine {
    catalog: EstablishmentCatalog,
    ledger: TransactionLedger,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Creates a new establishment after guarding name uniqueness.
    ///
    /// The pre-check answers the common case; a concurrent create slipping
    /// past it hits the unique index and is reported the same way.
    pub async fn create_establishment(&self, cmd: EstablishmentCmd) -> ResultEngine<Establishment> {
        let establishment = Establishment::new(cmd)?;
        if self
            .catalog
            .get_by_name(&establishment.name)
            .await?
            .is_some()
        {
            return Err(EngineError::Conflict(establishment.name));
        }

        let name = establishment.name.clone();
        match self.catalog.store().create_item(establishment).await {
            Err(EngineError::Database(err)) if is_unique_violation(&err) => {
                Err(EngineError::Conflict(name))
            }
            other => other,
        }
    }

    /// Lists all establishments in creation order. Empty is a normal result.
    pub async fn establishments(&self) -> ResultEngine<Vec<Establishment>> {
        self.catalog.store().get_all().await
    }

    /// Exact-match lookup by canonical name.
    pub async fn establishment_by_name(&self, name: &str) -> ResultEngine<Option<Establishment>> {
        self.catalog.get_by_name(name).await
    }

    /// Replaces an establishment, preserving its creation timestamp.
    pub async fn update_establishment(
        &self,
        id: &RecordId,
        cmd: EstablishmentCmd,
    ) -> ResultEngine<Establishment> {
        let current = self
            .catalog
            .store()
            .get_by_id(id)
            .await?
            .ok_or_else(|| EngineError::EstablishmentNotFound(id.to_string()))?;

        let mut updated = Establishment::new(cmd)?;
        updated.id = current.id;
        updated.created_at = current.created_at;

        let name = updated.name.clone();
        let acknowledged = match self.catalog.store().update_by_id(id, &updated).await {
            Err(EngineError::Database(err)) if is_unique_violation(&err) => {
                return Err(EngineError::Conflict(name));
            }
            other => other?,
        };
        if !acknowledged {
            return Err(EngineError::UpdateRejected);
        }
        Ok(updated)
    }

    /// Removes an establishment after confirming it exists. The confirm step
    /// races concurrent deletes; the loser gets [`EngineError::RemoveRejected`].
    pub async fn remove_establishment(&self, id: &RecordId) -> ResultEngine<()> {
        self.catalog
            .store()
            .get_by_id(id)
            .await?
            .ok_or_else(|| EngineError::EstablishmentNotFound(id.to_string()))?;

        if !self.catalog.store().remove_by_id(id).await? {
            return Err(EngineError::RemoveRejected);
        }
        Ok(())
    }

    /// Records a release. The named establishment must exist; the snapshot
    /// stores the catalog row's canonical name.
    pub async fn create_release(&self, cmd: ReleaseCmd) -> ResultEngine<Release> {
        let establishment = self
            .catalog
            .get_by_name(&cmd.establishment_name)
            .await?
            .ok_or_else(|| EngineError::UnknownEstablishment(cmd.establishment_name.clone()))?;

        let release = Release::new(cmd, establishment.name)?;
        self.ledger.store().create_item(release).await
    }

    /// Lists all releases in creation order. Empty is a normal result.
    pub async fn releases(&self) -> ResultEngine<Vec<Release>> {
        self.ledger.store().get_all().await
    }

    /// Replaces a release, preserving its creation timestamp. The named
    /// establishment is re-resolved, so the snapshot follows the catalog's
    /// current canonical spelling.
    pub async fn update_release(&self, id: &RecordId, cmd: ReleaseCmd) -> ResultEngine<Release> {
        let current = self
            .ledger
            .store()
            .get_by_id(id)
            .await?
            .ok_or_else(|| EngineError::ReleaseNotFound(id.to_string()))?;

        let establishment = self
            .catalog
            .get_by_name(&cmd.establishment_name)
            .await?
            .ok_or_else(|| EngineError::UnknownEstablishment(cmd.establishment_name.clone()))?;

        let mut updated = Release::new(cmd, establishment.name)?;
        updated.id = current.id;
        updated.created_at = current.created_at;

        if !self.ledger.store().update_by_id(id, &updated).await? {
            return Err(EngineError::UpdateRejected);
        }
        Ok(updated)
    }

    /// Removes a release after confirming it exists.
    pub async fn remove_release(&self, id: &RecordId) -> ResultEngine<()> {
        self.ledger
            .store()
            .get_by_id(id)
            .await?
            .ok_or_else(|| EngineError::ReleaseNotFound(id.to_string()))?;

        if !self.ledger.store().remove_by_id(id).await? {
            return Err(EngineError::RemoveRejected);
        }
        Ok(())
    }

    /// Aggregates the current ledger into statements.
    pub async fn statements(&self) -> ResultEngine<Vec<Statement>> {
        let releases = self.ledger.store().get_all().await?;
        let establishments = self.catalog.store().get_all().await?;
        aggregate(&releases, &establishments)
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// The builder for `Engine`.
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`, preparing the backing collections on the supplied
    /// connection (create-if-missing; there is no migration tooling).
    pub async fn build(self) -> Result<Engine, EngineError> {
        prepare_collections(&self.database).await?;

        Ok(Engine {
            catalog: EstablishmentCatalog::new(self.database.clone()),
            ledger: TransactionLedger::new(self.database),
        })
    }
}

async fn prepare_collections(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut establishments_table = schema.create_table_from_entity(establishments::Entity);
    db.execute(backend.build(establishments_table.if_not_exists()))
        .await?;

    let mut releases_table = schema.create_table_from_entity(releases::Entity);
    db.execute(backend.build(releases_table.if_not_exists()))
        .await?;

    Ok(())
}

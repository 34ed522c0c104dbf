//! Transaction ledger: the typed store for releases.

use sea_orm::DatabaseConnection;

use crate::Release;
use crate::store::TypedStore;

/// [`TypedStore`] specialization for releases.
///
/// No extra query operations: the establishment-name snapshot on each
/// release keeps historical rows independent of later catalog renames, so
/// everything the ledger needs is the generic contract.
#[derive(Clone)]
pub struct TransactionLedger {
    store: TypedStore<Release>,
}

impl TransactionLedger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            store: TypedStore::new(db),
        }
    }

    /// The underlying generic store.
    pub fn store(&self) -> &TypedStore<Release> {
        &self.store
    }
}

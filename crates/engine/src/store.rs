//! Generic typed persistence shared by every record kind.
//!
//! A [`TypedStore`] is CRUD over a single backing collection, parameterized
//! by the [`StoredRecord`] capability. Each call is atomic at the
//! single-record level; nothing here spans a get-then-update/remove
//! sequence, so those flows race concurrent writers and the callers own
//! that trade-off.

use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::{EngineError, RecordId};

/// Capability a record needs to live in a [`TypedStore`].
///
/// Ties a domain type to its sea-orm entity and exposes the identity fields
/// the store manages.
pub trait StoredRecord: Clone + Send + Sync + Sized {
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Clone + Send;

    /// Collection name, used for tracing.
    fn collection() -> &'static str;

    /// The assigned identifier, if any.
    fn record_id(&self) -> Option<&RecordId>;

    /// Stamps a fresh identity: id plus creation and update timestamps.
    fn assign_identity(&mut self, id: RecordId, now: DateTime<Utc>);

    /// Column holding the identifier.
    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    /// Column holding the creation timestamp; drives stable listing order.
    fn created_column() -> <Self::Entity as EntityTrait>::Column;

    fn to_active(&self) -> Self::ActiveModel;

    fn from_model(model: <Self::Entity as EntityTrait>::Model) -> Result<Self, EngineError>;
}

/// Total attempts for an operation hitting transient backend failures.
const MAX_ATTEMPTS: u32 = 3;
/// First backoff step; doubled after every failed attempt.
const BASE_BACKOFF: Duration = Duration::from_millis(50);

/// Generic CRUD persistence for one record kind.
#[derive(Clone)]
pub struct TypedStore<R: StoredRecord> {
    db: DatabaseConnection,
    _record: PhantomData<fn() -> R>,
}

impl<R: StoredRecord> TypedStore<R> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    /// Inserts `item`, assigning id and timestamps when the id is absent,
    /// and returns the stored value including the server-assigned fields.
    pub async fn create_item(&self, mut item: R) -> Result<R, EngineError>
    where
        <R::Entity as EntityTrait>::Model: IntoActiveModel<R::ActiveModel>,
    {
        if item.record_id().is_none() {
            item.assign_identity(RecordId::generate(), Utc::now());
        }

        let db = self.db.clone();
        let active = item.to_active();
        retry(R::collection(), move || {
            let db = db.clone();
            let active = active.clone();
            async move {
                R::Entity::insert(active).exec_without_returning(&db).await?;
                Ok(())
            }
        })
        .await?;

        Ok(item)
    }

    /// Returns every record in creation order. An empty collection is a
    /// normal outcome here; callers decide what it means.
    pub async fn get_all(&self) -> Result<Vec<R>, EngineError> {
        let db = self.db.clone();
        let models = retry(R::collection(), move || {
            let db = db.clone();
            async move {
                R::Entity::find()
                    .order_by_asc(R::created_column())
                    .order_by_asc(R::id_column())
                    .all(&db)
                    .await
            }
        })
        .await?;

        models.into_iter().map(R::from_model).collect()
    }

    /// Exact-match lookup on the identifier; `None` is not an error.
    pub async fn get_by_id(&self, id: &RecordId) -> Result<Option<R>, EngineError> {
        let db = self.db.clone();
        let id = id.clone();
        let model = retry(R::collection(), move || {
            let db = db.clone();
            let id = id.clone();
            async move {
                R::Entity::find()
                    .filter(R::id_column().eq(id.as_str()))
                    .one(&db)
                    .await
            }
        })
        .await?;

        model.map(R::from_model).transpose()
    }

    /// Replaces the record matching `id` with `item` and reports whether a
    /// row was actually touched.
    pub async fn update_by_id(&self, id: &RecordId, item: &R) -> Result<bool, EngineError> {
        let db = self.db.clone();
        let id = id.clone();
        let active = item.to_active();
        let result = retry(R::collection(), move || {
            let db = db.clone();
            let id = id.clone();
            let active = active.clone();
            async move {
                R::Entity::update_many()
                    .set(active)
                    .filter(R::id_column().eq(id.as_str()))
                    .exec(&db)
                    .await
            }
        })
        .await?;

        Ok(result.rows_affected > 0)
    }

    /// Removes the record matching `id` and reports whether a row was
    /// actually touched.
    pub async fn remove_by_id(&self, id: &RecordId) -> Result<bool, EngineError> {
        let db = self.db.clone();
        let id = id.clone();
        let result = retry(R::collection(), move || {
            let db = db.clone();
            let id = id.clone();
            async move {
                R::Entity::delete_many()
                    .filter(R::id_column().eq(id.as_str()))
                    .exec(&db)
                    .await
            }
        })
        .await?;

        Ok(result.rows_affected > 0)
    }
}

fn is_transient(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

/// Runs `op`, retrying transient connection failures with exponential
/// backoff. Definite errors (constraint violations, bad statements)
/// propagate on the first attempt.
async fn retry<T, F, Fut>(collection: &'static str, mut op: F) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut backoff = BASE_BACKOFF;
    let mut attempt = 1;
    loop {
        match op().await {
            Err(err) if attempt < MAX_ATTEMPTS && is_transient(&err) => {
                tracing::warn!("{collection}: transient storage error (attempt {attempt}): {err}");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                attempt += 1;
            }
            other => return other,
        }
    }
}

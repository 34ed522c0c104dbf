//! Establishment records and their backing collection schema.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::store::StoredRecord;
use crate::{EngineError, RecordId};

/// Longest accepted establishment name.
pub const NAME_MAX_LEN: usize = 50;
/// Longest accepted establishment category.
pub const KIND_MAX_LEN: usize = 25;

/// Fields accepted when creating or replacing an establishment.
#[derive(Clone, Debug)]
pub struct EstablishmentCmd {
    pub name: String,
    pub kind: String,
}

/// A merchant with a unique name and a free-form category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Establishment {
    pub id: Option<RecordId>,
    pub name: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Establishment {
    /// Builds an unstored establishment from `cmd`, normalizing the name
    /// (first character upper-cased) and enforcing the field limits.
    pub fn new(cmd: EstablishmentCmd) -> Result<Self, EngineError> {
        let name = canonical_name(cmd.name.trim());
        if name.is_empty() {
            return Err(EngineError::Validation(
                "establishment name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(EngineError::Validation(format!(
                "establishment name must be at most {NAME_MAX_LEN} characters"
            )));
        }

        let kind = cmd.kind.trim().to_string();
        if kind.is_empty() {
            return Err(EngineError::Validation(
                "establishment type must not be empty".to_string(),
            ));
        }
        if kind.chars().count() > KIND_MAX_LEN {
            return Err(EngineError::Validation(format!(
                "establishment type must be at most {KIND_MAX_LEN} characters"
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id: None,
            name,
            kind,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Upper-cases the first character, leaving the rest untouched.
fn canonical_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "establishments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    // Unique at the storage layer: closes the check-then-create race between
    // concurrent creates with the same name.
    #[sea_orm(unique)]
    pub name: String,
    pub kind: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Establishment> for ActiveModel {
    fn from(establishment: &Establishment) -> Self {
        Self {
            id: ActiveValue::Set(
                establishment
                    .id
                    .as_ref()
                    .map(RecordId::to_string)
                    .unwrap_or_default(),
            ),
            name: ActiveValue::Set(establishment.name.clone()),
            kind: ActiveValue::Set(establishment.kind.clone()),
            created_at: ActiveValue::Set(establishment.created_at),
            updated_at: ActiveValue::Set(establishment.updated_at),
        }
    }
}

impl TryFrom<Model> for Establishment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(RecordId::parse(&model.id)?),
            name: model.name,
            kind: model.kind,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl StoredRecord for Establishment {
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    fn collection() -> &'static str {
        "establishments"
    }

    fn record_id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    fn assign_identity(&mut self, id: RecordId, now: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = now;
        self.updated_at = now;
    }

    fn id_column() -> Column {
        Column::Id
    }

    fn created_column() -> Column {
        Column::CreatedAt
    }

    fn to_active(&self) -> ActiveModel {
        self.into()
    }

    fn from_model(model: Model) -> Result<Self, EngineError> {
        Self::try_from(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(name: &str, kind: &str) -> EstablishmentCmd {
        EstablishmentCmd {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn normalizes_first_character() {
        let establishment = Establishment::new(cmd("padaria stn", "Alimentação")).unwrap();
        assert_eq!(establishment.name, "Padaria stn");
    }

    #[test]
    fn rejects_empty_and_oversized_fields() {
        assert!(matches!(
            Establishment::new(cmd("", "Alimentação")),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            Establishment::new(cmd("Padaria", "  ")),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            Establishment::new(cmd(&"x".repeat(51), "Alimentação")),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            Establishment::new(cmd("Padaria", &"x".repeat(26))),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn keeps_fields_at_their_limits() {
        let establishment =
            Establishment::new(cmd(&"x".repeat(50), &"y".repeat(25))).unwrap();
        assert_eq!(establishment.name.chars().count(), 50);
        assert_eq!(establishment.kind.chars().count(), 25);
    }
}

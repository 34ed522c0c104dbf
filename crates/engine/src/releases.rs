//! Release records: single financial transactions against an establishment.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::store::StoredRecord;
use crate::{EngineError, RecordId};

/// Payment instrument of a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Credit,
    Debit,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cash" => Ok(Self::Cash),
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(EngineError::Validation(format!(
                "invalid payment method: {other}"
            ))),
        }
    }
}

/// Fields accepted when creating or replacing a release.
#[derive(Clone, Debug)]
pub struct ReleaseCmd {
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub establishment_name: String,
    pub amount: Decimal,
}

/// A financial transaction recorded against an establishment.
///
/// `establishment_name` is a snapshot of the catalog row's canonical name at
/// creation time, not a live reference: renaming the establishment later
/// leaves historical releases untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: Option<RecordId>,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub establishment_name: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Release {
    /// Builds an unstored release, taking the establishment name as already
    /// resolved by the caller. The amount must not be negative.
    pub fn new(cmd: ReleaseCmd, establishment_name: String) -> Result<Self, EngineError> {
        if cmd.amount < Decimal::ZERO {
            return Err(EngineError::Validation(
                "amount must be >= 0".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: None,
            date: cmd.date,
            payment_method: cmd.payment_method,
            establishment_name,
            amount: cmd.amount,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "releases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: Date,
    pub payment_method: String,
    pub establishment_name: String,
    // Canonical decimal string. Keeps fixed-point semantics independent of
    // the column affinity; parsed back on read.
    pub amount: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Release> for ActiveModel {
    fn from(release: &Release) -> Self {
        Self {
            id: ActiveValue::Set(
                release
                    .id
                    .as_ref()
                    .map(RecordId::to_string)
                    .unwrap_or_default(),
            ),
            date: ActiveValue::Set(release.date),
            payment_method: ActiveValue::Set(release.payment_method.as_str().to_string()),
            establishment_name: ActiveValue::Set(release.establishment_name.clone()),
            amount: ActiveValue::Set(release.amount.to_string()),
            created_at: ActiveValue::Set(release.created_at),
            updated_at: ActiveValue::Set(release.updated_at),
        }
    }
}

impl TryFrom<Model> for Release {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let amount = model
            .amount
            .parse::<Decimal>()
            .map_err(|_| EngineError::Validation(format!("invalid stored amount: {}", model.amount)))?;

        Ok(Self {
            id: Some(RecordId::parse(&model.id)?),
            date: model.date,
            payment_method: PaymentMethod::try_from(model.payment_method.as_str())?,
            establishment_name: model.establishment_name,
            amount,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl StoredRecord for Release {
    type Entity = Entity;
    type ActiveModel = ActiveModel;

    fn collection() -> &'static str {
        "releases"
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
    use rust_decimal_macros::dec;

    fn cmd(amount: Decimal) -> ReleaseCmd {
        ReleaseCmd {
            date: "2024-01-01".parse().unwrap(),
            payment_method: PaymentMethod::Credit,
            establishment_name: "Padaria Stn".to_string(),
            amount,
        }
    }

    #[test]
    fn payment_method_round_trips_through_storage_strings() {
        for method in [PaymentMethod::Cash, PaymentMethod::Credit, PaymentMethod::Debit] {
            assert_eq!(PaymentMethod::try_from(method.as_str()).unwrap(), method);
        }
        assert!(PaymentMethod::try_from("check").is_err());
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(matches!(
            Release::new(cmd(dec!(-0.01)), "Padaria Stn".to_string()),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn zero_amount_is_allowed() {
        let release = Release::new(cmd(dec!(0)), "Padaria Stn".to_string()).unwrap();
        assert_eq!(release.amount, dec!(0));
    }
}

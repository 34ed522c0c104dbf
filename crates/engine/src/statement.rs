//! Statement aggregation.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Establishment, PaymentMethod, Release};

/// A grouped summary of releases sharing date, category and payment method.
///
/// Statements are derived on demand and never persisted; re-running the
/// aggregation over the same inputs yields the same output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub kind: String,
    pub total_amount: Decimal,
}

/// Joins `releases` against `establishments` and sums amounts per
/// (date, category, payment method) group.
///
/// Groups are emitted in first-occurrence order of their key while scanning
/// `releases`; no sorting is applied. Categories resolve against the
/// *current* catalog rows, so re-aggregating after an establishment changes
/// category reclassifies its historical releases.
///
/// Errors: [`EngineError::NoReleases`] when `releases` is empty,
/// [`EngineError::Integrity`] when a release names an establishment absent
/// from `establishments` (never silently dropped).
pub fn aggregate(
    releases: &[Release],
    establishments: &[Establishment],
) -> Result<Vec<Statement>, EngineError> {
    if releases.is_empty() {
        return Err(EngineError::NoReleases);
    }

    // Last write wins on duplicate names; names are expected unique.
    let catalog: HashMap<&str, &Establishment> = establishments
        .iter()
        .map(|establishment| (establishment.name.as_str(), establishment))
        .collect();

    let mut statements: Vec<Statement> = Vec::new();
    let mut groups: HashMap<(NaiveDate, String, PaymentMethod), usize> = HashMap::new();

    for release in releases {
        let establishment = catalog
            .get(release.establishment_name.as_str())
            .ok_or_else(|| EngineError::Integrity(release.establishment_name.clone()))?;

        let key = (
            release.date,
            establishment.kind.clone(),
            release.payment_method,
        );
        match groups.get(&key) {
            Some(&at) => statements[at].total_amount += release.amount,
            None => {
                groups.insert(key, statements.len());
                statements.push(Statement {
                    date: release.date,
                    payment_method: release.payment_method,
                    kind: establishment.kind.clone(),
                    total_amount: release.amount,
                });
            }
        }
    }

    Ok(statements)
}

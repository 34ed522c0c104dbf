//! Wire types shared by the HTTP server and its clients.
//!
//! JSON uses camelCase field names; the establishment category travels as
//! `type` on the wire.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod response {
    use super::*;

    /// Error/report envelope: `{"statusCode": ..., "message": ...}`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseDetails {
        pub status_code: u16,
        pub message: String,
    }
}

pub mod establishment {
    use super::*;

    /// Request body for creating or replacing an establishment.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EstablishmentBody {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
    }

    /// An establishment as returned by the API.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EstablishmentView {
        pub id: String,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod release {
    use super::*;

    /// Payment instrument, as it appears on the wire.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentMethod {
        Cash,
        Credit,
        Debit,
    }

    impl PaymentMethod {
        /// Unaccented label, as the historical data carries it.
        pub fn label(self) -> &'static str {
            match self {
                Self::Cash => "Dinheiro",
                Self::Credit => "Credito",
                Self::Debit => "Debito",
            }
        }

        /// Localized display label. Cosmetic only: restores the accent the
        /// stored label drops (`Credito` → `Crédito`).
        pub fn display_label(self) -> String {
            match self {
                Self::Cash => self.label().to_string(),
                Self::Credit | Self::Debit => self.label().replacen('e', "é", 1),
            }
        }
    }

    /// Request body for creating or replacing a release.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReleaseBody {
        pub date: NaiveDate,
        pub payment_method: PaymentMethod,
        pub establishment_name: String,
        pub amount: Decimal,
    }

    /// A release as returned by the API.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReleaseView {
        pub id: String,
        pub date: NaiveDate,
        pub payment_method: PaymentMethod,
        pub establishment_name: String,
        pub amount: Decimal,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }
}

pub mod statement {
    use super::release::PaymentMethod;
    use super::*;

    /// A statement row: one (date, category, payment method) group.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct StatementView {
        pub date: NaiveDate,
        pub payment_method: PaymentMethod,
        pub payment_method_display: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub total_amount: Decimal,
    }
}

/// Renders a monetary amount with exactly two decimal places.
///
/// Presentation only; stored precision is whatever the caller recorded.
pub fn render_amount(amount: Decimal) -> Decimal {
    let mut rendered = amount;
    rendered.rescale(2);
    rendered
}

#[cfg(test)]
mod tests {
    use super::release::PaymentMethod;
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_labels_restore_the_accent() {
        assert_eq!(PaymentMethod::Credit.display_label(), "Crédito");
        assert_eq!(PaymentMethod::Debit.display_label(), "Débito");
        assert_eq!(PaymentMethod::Cash.display_label(), "Dinheiro");
    }

    #[test]
    fn amounts_render_with_two_decimal_places() {
        assert_eq!(render_amount(dec!(15.5)).to_string(), "15.50");
        assert_eq!(render_amount(dec!(10)).to_string(), "10.00");
        assert_eq!(render_amount(dec!(3.14159)).to_string(), "3.14");
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let envelope = response::ResponseDetails {
            status_code: 404,
            message: "not here".to_string(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["message"], "not here");
    }

    #[test]
    fn release_body_reads_camel_case_fields() {
        let body: release::ReleaseBody = serde_json::from_value(serde_json::json!({
            "date": "2024-01-01",
            "paymentMethod": "credit",
            "establishmentName": "Padaria Stn",
            "amount": "34.88",
        }))
        .unwrap();
        assert_eq!(body.payment_method, PaymentMethod::Credit);
        assert_eq!(body.amount, dec!(34.88));
    }
}

//! Normalized transaction record.

use serde::{Deserialize, Serialize};

/// A partner transaction in the canonical output shape.
///
/// Field names are stable regardless of how the API nests them. `day` is the
/// window the record was retrieved under and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction global id.
    pub id: Option<String>,
    /// Day window (`YYYY-MM-DD`) the record was retrieved under.
    pub day: String,
    /// GraphQL type name, e.g. `AppSubscriptionSale`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Creation timestamp as reported by the API.
    pub created_at: Option<String>,
    /// Net amount paid to the partner.
    pub net_amount: Option<String>,
    /// Currency of `net_amount`.
    pub net_currency: Option<String>,
    /// Gross amount charged.
    pub gross_amount: Option<String>,
    /// Currency of `gross_amount`.
    pub gross_currency: Option<String>,
    /// Fee retained by Shopify.
    pub shopify_fee: Option<String>,
    /// Currency of `shopify_fee`.
    pub shopify_fee_currency: Option<String>,
    /// Charge id for app charges.
    pub charge_id: Option<String>,
    /// App global id.
    pub app_id: Option<String>,
    /// App name.
    pub app_name: Option<String>,
    /// Shop global id.
    pub shop_id: Option<String>,
    /// Shop name.
    pub shop_name: Option<String>,
    /// Shop `myshopify.com` domain.
    pub shop_domain: Option<String>,
}

impl Transaction {
    /// Creates an empty record tagged with `day`.
    #[must_use]
    pub fn for_day(day: impl Into<String>) -> Self {
        Self {
            id: None,
            day: day.into(),
            kind: None,
            created_at: None,
            net_amount: None,
            net_currency: None,
            gross_amount: None,
            gross_currency: None,
            shopify_fee: None,
            shopify_fee_currency: None,
            charge_id: None,
            app_id: None,
            app_name: None,
            shop_id: None,
            shop_name: None,
            shop_domain: None,
        }
    }

    /// Returns the stable field names in output order.
    #[must_use]
    pub const fn field_names() -> &'static [&'static str] {
        &[
            "id",
            "day",
            "type",
            "created_at",
            "net_amount",
            "net_currency",
            "gross_amount",
            "gross_currency",
            "shopify_fee",
            "shopify_fee_currency",
            "charge_id",
            "app_id",
            "app_name",
            "shop_id",
            "shop_name",
            "shop_domain",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let mut tx = Transaction::for_day("2022-03-01");
        tx.id = Some("gid://partners/AppSubscriptionSale/1".to_string());
        tx.kind = Some("AppSubscriptionSale".to_string());

        let value = serde_json::to_value(&tx).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), Transaction::field_names().len());
        for name in Transaction::field_names() {
            assert!(object.contains_key(*name), "missing {name}");
        }
        assert_eq!(object["type"], "AppSubscriptionSale");
        assert_eq!(object["day"], "2022-03-01");
        assert!(object["net_amount"].is_null());
    }
}

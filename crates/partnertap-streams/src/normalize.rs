//! Raw edge to [`Transaction`] mapping.

use partnertap_types::Transaction;
use serde_json::Value;

/// Signature shared by every stream normalizer.
pub type Normalizer = fn(&str, &Value) -> Transaction;

/// Normalizes one transaction edge retrieved under `day`.
///
/// Accepts the GraphQL edge shape (`{"node": {...}}`) or a bare node. Fields
/// the API did not return come out as `None`.
#[must_use]
pub fn normalize_transaction(day: &str, edge: &Value) -> Transaction {
    let node = edge.get("node").unwrap_or(edge);

    // Referral and tax transactions report a single `amount`
    let net = node.get("netAmount").or_else(|| node.get("amount"));
    let gross = node.get("grossAmount");
    let fee = node.get("shopifyFee");
    let app = node.get("app");
    let shop = node.get("shop");

    Transaction {
        id: text(node.get("id")),
        day: day.to_string(),
        kind: text(node.get("__typename")),
        created_at: text(node.get("createdAt")),
        net_amount: text(net.and_then(|m| m.get("amount"))),
        net_currency: text(net.and_then(|m| m.get("currencyCode"))),
        gross_amount: text(gross.and_then(|m| m.get("amount"))),
        gross_currency: text(gross.and_then(|m| m.get("currencyCode"))),
        shopify_fee: text(fee.and_then(|m| m.get("amount"))),
        shopify_fee_currency: text(fee.and_then(|m| m.get("currencyCode"))),
        charge_id: text(node.get("chargeId")),
        app_id: text(app.and_then(|a| a.get("id"))),
        app_name: text(app.and_then(|a| a.get("name"))),
        shop_id: text(shop.and_then(|s| s.get("id"))),
        shop_name: text(shop.and_then(|s| s.get("name"))),
        shop_domain: text(shop.and_then(|s| s.get("myshopifyDomain"))),
    }
}

/// Renders scalars as strings; objects, arrays and nulls map to `None`.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

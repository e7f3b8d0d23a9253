//! GraphQL query templates.
//!
//! Templates carry [`FROM_DATE`] and [`TO_DATE`] placeholders which are
//! replaced with the window boundaries before each request.

/// Placeholder for the window start timestamp.
pub const FROM_DATE: &str = ":fromdate:";

/// Placeholder for the window end timestamp.
pub const TO_DATE: &str = ":todate:";

/// Transactions created inside one window.
pub const TRANSACTIONS: &str = r#"{
  transactions(createdAtMin: ":fromdate:", createdAtMax: ":todate:", first: 100) {
    edges {
      cursor
      node {
        id
        createdAt
        __typename
        ... on AppOneTimeSale {
          netAmount { amount currencyCode }
          grossAmount { amount currencyCode }
          shopifyFee { amount currencyCode }
          chargeId
          app { id name }
          shop { id name myshopifyDomain }
        }
        ... on AppSubscriptionSale {
          netAmount { amount currencyCode }
          grossAmount { amount currencyCode }
          shopifyFee { amount currencyCode }
          chargeId
          app { id name }
          shop { id name myshopifyDomain }
        }
        ... on AppUsageSale {
          netAmount { amount currencyCode }
          grossAmount { amount currencyCode }
          shopifyFee { amount currencyCode }
          chargeId
          app { id name }
          shop { id name myshopifyDomain }
        }
        ... on AppSaleAdjustment {
          netAmount { amount currencyCode }
          grossAmount { amount currencyCode }
          shopifyFee { amount currencyCode }
          chargeId
          app { id name }
          shop { id name myshopifyDomain }
        }
        ... on AppSaleCredit {
          netAmount { amount currencyCode }
          app { id name }
          shop { id name myshopifyDomain }
        }
        ... on ServiceSale {
          netAmount { amount currencyCode }
          grossAmount { amount currencyCode }
          shopifyFee { amount currencyCode }
          shop { id name myshopifyDomain }
        }
        ... on ReferralTransaction {
          amount { amount currencyCode }
          shop { id name myshopifyDomain }
        }
        ... on TaxTransaction {
          amount { amount currencyCode }
        }
      }
    }
  }
}
"#;

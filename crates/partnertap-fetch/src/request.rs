//! Request composition for the Shopify Partners GraphQL endpoint.

use partnertap_streams::queries::{FROM_DATE, TO_DATE};
use partnertap_types::{ExtractionWindow, Result, TapError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Partners API version the queries are written against.
pub const API_VERSION: &str = "2022-01";

/// Placeholder for the organization id in [`URL_TEMPLATE`].
pub const ORGANIZATION_PLACEHOLDER: &str = ":organization_id:";

/// Placeholder for the access token in [`HEADER_TEMPLATE`].
pub const TOKEN_PLACEHOLDER: &str = ":token:";

/// Endpoint URL template.
pub const URL_TEMPLATE: &str =
    "https://partners.shopify.com/:organization_id:/api/2022-01/graphql.json";

/// Header template sent with every request.
pub const HEADER_TEMPLATE: [(&str, &str); 2] = [
    ("Content-Type", "application/graphql"),
    ("X-Shopify-Access-Token", TOKEN_PLACEHOLDER),
];

/// Builds the GraphQL endpoint URL for a partner organization.
///
/// # Example
///
/// ```
/// use partnertap_fetch::request::endpoint_url;
///
/// assert_eq!(
///     endpoint_url("1234567"),
///     "https://partners.shopify.com/1234567/api/2022-01/graphql.json"
/// );
/// ```
#[must_use]
pub fn endpoint_url(organization_id: &str) -> String {
    URL_TEMPLATE.replace(ORGANIZATION_PLACEHOLDER, organization_id)
}

/// Builds a fresh header map with `token` substituted into the template.
///
/// # Errors
///
/// Returns [`TapError::Config`] if the token is not a valid header value.
pub fn auth_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(HEADER_TEMPLATE.len());

    for (name, template) in HEADER_TEMPLATE {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TapError::Config(format!("invalid header name {name}: {e}")))?;
        let is_secret = template.contains(TOKEN_PLACEHOLDER);
        let mut value = HeaderValue::from_str(&template.replace(TOKEN_PLACEHOLDER, token))
            .map_err(|_| TapError::Config(format!("invalid value for header {name}")))?;
        value.set_sensitive(is_secret);
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Substitutes the window boundaries into a query template.
#[must_use]
pub fn request_body(template: &str, window: &ExtractionWindow) -> String {
    template
        .replace(FROM_DATE, &window.start_timestamp())
        .replace(TO_DATE, &window.end_timestamp())
}

/// A fully composed request for one day window.
#[derive(Debug, Clone)]
pub struct DayRequest {
    /// Day marker of the window.
    pub day: String,
    /// Target URL.
    pub url: String,
    /// Request headers, including the access token.
    pub headers: HeaderMap,
    /// GraphQL query sent as the raw body.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use partnertap_streams::StreamName;

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("1234567");
        assert_eq!(
            url,
            "https://partners.shopify.com/1234567/api/2022-01/graphql.json"
        );
        assert!(url.contains(API_VERSION));
        assert!(!url.contains(ORGANIZATION_PLACEHOLDER));
    }

    #[test]
    fn test_request_body_substitution() {
        let template = StreamName::Transactions.query_template();
        let mut date = NaiveDate::from_ymd_opt(2023, 12, 30).unwrap();

        // Crosses a year boundary and a leap day
        for _ in 0..70 {
            let window = ExtractionWindow::new(date);
            let day = window.day();
            let body = request_body(template, &window);

            assert!(body.contains(&format!("{day}T00:00:00.000000Z")));
            assert!(body.contains(&format!("{day}T23:59:59.999999Z")));
            assert!(!body.contains(FROM_DATE));
            assert!(!body.contains(TO_DATE));

            date += TimeDelta::days(1);
        }
    }

    #[test]
    fn test_auth_headers() {
        let headers = auth_headers("prtapi_abc").unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["content-type"], "application/graphql");
        assert_eq!(headers["x-shopify-access-token"], "prtapi_abc");
        assert!(headers["x-shopify-access-token"].is_sensitive());
        assert!(!headers["content-type"].is_sensitive());
    }

    #[test]
    fn test_auth_headers_independent() {
        let first = auth_headers("token-one").unwrap();
        let second = auth_headers("token-two").unwrap();
        let again = auth_headers("token-one").unwrap();

        assert_eq!(first["x-shopify-access-token"], "token-one");
        assert_eq!(second["x-shopify-access-token"], "token-two");
        assert_eq!(first, again);
        assert_eq!(HEADER_TEMPLATE[1], ("X-Shopify-Access-Token", ":token:"));
    }

    #[test]
    fn test_auth_headers_invalid_token() {
        assert!(matches!(
            auth_headers("bad\ntoken"),
            Err(TapError::Config(_))
        ));
    }
}

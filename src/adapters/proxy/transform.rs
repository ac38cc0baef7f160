//! Outbound request transformation.
//!
//! Pure header enrichment: never contacts the network, never mutates its
//! inputs. Original headers pass through unchanged; trusted identity context
//! and gateway metadata are layered on top.

use chrono::Utc;
use http::header::{HeaderMap, HeaderName, HeaderValue, CONNECTION, CONTENT_LENGTH, HOST, TRANSFER_ENCODING};
use uuid::Uuid;

use crate::domain::{CorrelationId, UserContext};

/// Identity headers trusted by the backends.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const COMPANY_ID_HEADER: &str = "x-company-id";

/// Correlation and hop metadata.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const GATEWAY_TIMESTAMP_HEADER: &str = "x-gateway-timestamp";
pub const REQUEST_SOURCE_HEADER: &str = "x-request-source";

const REQUEST_SOURCE: &str = "api-gateway";

/// Builds the outbound header map for a backend dispatch.
///
/// The correlation id spans the whole end-user operation; the generated
/// request id identifies this specific hop and is fresh per call. Hop-scoped
/// transport headers (`Host`, `Content-Length`, `Connection`,
/// `Transfer-Encoding`) are owned by the dispatching client and not copied.
pub fn transform_headers(
    original: &HeaderMap,
    user: Option<&UserContext>,
    correlation_id: &CorrelationId,
) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(original.len() + 8);

    for (name, value) in original {
        if name == HOST || name == CONTENT_LENGTH || name == CONNECTION || name == TRANSFER_ENCODING
        {
            continue;
        }
        // Identity headers are asserted by the gateway, never by the caller.
        if matches!(
            name.as_str(),
            USER_ID_HEADER | USER_EMAIL_HEADER | USER_ROLE_HEADER | COMPANY_ID_HEADER
        ) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    if let Some(user) = user {
        insert_str(&mut headers, USER_ID_HEADER, &user.user_id);
        insert_str(&mut headers, USER_EMAIL_HEADER, &user.email);
        insert_str(&mut headers, USER_ROLE_HEADER, &user.role);
        if let Some(company_id) = &user.company_id {
            insert_str(&mut headers, COMPANY_ID_HEADER, company_id);
        }
    }

    insert_str(&mut headers, CORRELATION_ID_HEADER, correlation_id.as_str());
    insert_str(&mut headers, REQUEST_ID_HEADER, &Uuid::new_v4().to_string());
    insert_str(
        &mut headers,
        GATEWAY_TIMESTAMP_HEADER,
        &Utc::now().to_rfc3339(),
    );
    insert_str(&mut headers, REQUEST_SOURCE_HEADER, REQUEST_SOURCE);

    headers
}

/// Inserts a header, replacing any inbound value of the same name so callers
/// cannot spoof identity headers past the gateway.
fn insert_str(headers: &mut HeaderMap, name: &'static str, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(HeaderName::from_static(name), value);
        }
        Err(_) => {
            tracing::warn!(header = name, "dropping header with non-ASCII value");
        }
    }
}

//! Shared test helpers for runs against a mocked TAG registry

#![allow(dead_code)]

use std::time::Duration;

use httpmock::prelude::*;
use httpmock::Mock;

pub const LOOKUP_PATH: &str = "/registry/lookup";

pub const ACTIVE_PAGE: &str =
    "<html><body><p>Status: <strong>\n    Active.\n</strong></p></body></html>";
pub const INACTIVE_PAGE: &str =
    "<html><body><p>Status: <strong> Inactive. </strong></p></body></html>";

/// Lookup endpoint served by `server`
pub fn lookup_url(server: &MockServer) -> String {
    server.url(LOOKUP_PATH)
}

/// Answer `GET /registry/lookup?q=<authority_id>` with `status` and `body`.
pub async fn mock_authority<'a>(
    server: &'a MockServer,
    authority_id: &str,
    status: u16,
    body: &str,
) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(LOOKUP_PATH)
                .query_param("q", authority_id);
            then.status(status)
                .header("content-type", "text/html")
                .body(body);
        })
        .await
}

/// Client that never routes loopback traffic through a proxy from the environment.
pub fn direct_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .expect("build client")
}

//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every proxied `/api` path, the health checks, the
//! response envelope schema, and the two ways a caller may present a bearer
//! token. The document is served by Swagger UI in debug builds and printed by
//! the `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::EnvelopeSchema;

/// Register the bearer header and the `accessToken` cookie.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        components.add_security_scheme(
            "AccessTokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "accessToken",
                "Used when no Authorization header is sent.",
            ))),
        );
    }
}

/// OpenAPI document for the gateway.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "oncare admin gateway",
        description = "Proxies admin calls to the oncare backend and normalises every answer into one envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = []), ("AccessTokenCookie" = [])),
    paths(
        crate::inbound::http::notices::list_notices,
        crate::inbound::http::notices::create_notice,
        crate::inbound::http::notices::update_notice,
        crate::inbound::http::notices::delete_notice,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::reset_password,
        crate::inbound::http::feeds::list_feeds,
        crate::inbound::http::feeds::feed_detail,
        crate::inbound::http::feeds::create_feed,
        crate::inbound::http::feeds::update_feed,
        crate::inbound::http::feeds::delete_feed,
        crate::inbound::http::feeds::toggle_like,
        crate::inbound::http::feeds::toggle_bookmark,
        crate::inbound::http::feeds::list_comments,
        crate::inbound::http::feeds::create_comment,
        crate::inbound::http::feeds::delete_comment,
        crate::inbound::http::summaries::search_summaries,
        crate::inbound::http::dashboard::init_stat,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(EnvelopeSchema)),
    tags(
        (name = "notices", description = "Notice board management"),
        (name = "categories", description = "Category code management"),
        (name = "users", description = "Member administration"),
        (name = "feeds", description = "Community feed moderation"),
        (name = "summaries", description = "AI summary search"),
        (name = "dashboard", description = "Headline counters"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! HTTP inbound adapter exposing the proxied admin API under `/api`.
//!
//! Handlers stay thin: each one names its [`ProxyRoute`](crate::domain::ProxyRoute),
//! lets [`proxy_call`] lift the Actix request into a
//! [`ProxyRequest`](crate::domain::ProxyRequest), and returns whatever the
//! route proxy produced.

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod error;
pub mod feeds;
pub mod health;
pub mod notices;
pub mod proxy_call;
pub mod state;
pub mod summaries;
pub mod users;

pub use error::not_found;

use actix_web::web;

/// Register every proxied resource on `cfg`.
///
/// Literal feed paths are registered ahead of `/feeds/{feed_id}`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use oncare_gateway::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(notices::list_notices)
        .service(notices::create_notice)
        .service(notices::update_notice)
        .service(notices::delete_notice)
        .service(categories::list_categories)
        .service(categories::create_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(users::list_users)
        .service(users::update_user)
        .service(users::reset_password)
        .service(feeds::list_feeds)
        .service(feeds::create_feed)
        .service(feeds::update_feed)
        .service(feeds::delete_feed)
        .service(feeds::toggle_like)
        .service(feeds::toggle_bookmark)
        .service(feeds::list_comments)
        .service(feeds::create_comment)
        .service(feeds::delete_comment)
        .service(feeds::feed_detail)
        .service(summaries::search_summaries)
        .service(dashboard::init_stat);
}

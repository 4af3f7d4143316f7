//! Reqwest-backed gateway client.
//!
//! Rebuilds the inbound gateway call for a [`ProxyRequest`]: the `/api` path,
//! the identifier in the query or path, the body in its original encoding,
//! and the caller's token. The gateway answers failures with HTTP 500 and a
//! failure envelope, so the status is not treated as an error here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::ports::GatewayApi;
use crate::domain::routes::IdParam;
use crate::domain::{Envelope, Error, HttpMethod, InboundBody, ProxyRequest, ProxyRoute};
use crate::outbound::multipart::multipart_form;

const TRANSPORT_PREFIX: &str = "API 요청 실패";

/// [`GatewayApi`] over HTTP.
#[derive(Clone)]
pub struct GatewayHttpClient {
    client: Client,
    base: Url,
}

impl GatewayHttpClient {
    /// Client for the gateway served at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base,
        })
    }

    /// Gateway URL for `request`.
    fn url_for(&self, request: &ProxyRequest) -> Url {
        let route = request.route;
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        let id = request
            .target_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(route.gateway_path().split('/').filter(|part| !part.is_empty()));
            if let (Some(IdParam::Path), Some(id)) = (route.id_param(), id) {
                segments.push(id);
            }
        }
        let mut query = request.query.clone();
        if let (Some(IdParam::Query(name)), Some(id)) = (route.id_param(), id) {
            query.insert(name, id);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        url
    }
}

fn method_for(route: ProxyRoute) -> Method {
    match route.method() {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn attach_body(builder: RequestBuilder, body: InboundBody) -> Result<RequestBuilder, Error> {
    Ok(match body {
        InboundBody::Empty => builder,
        InboundBody::Json(value) => builder.json(&value),
        InboundBody::Raw(bytes) => builder.header(CONTENT_TYPE, "application/json").body(bytes),
        InboundBody::Multipart {
            content_type,
            bytes,
        } => builder.header(CONTENT_TYPE, content_type).body(bytes),
        InboundBody::Form(payload) => builder.multipart(
            multipart_form(payload).map_err(|err| Error::validation(err.to_string()))?,
        ),
    })
}

#[async_trait]
impl GatewayApi for GatewayHttpClient {
    async fn call(&self, request: ProxyRequest) -> Result<Envelope<Value>, Error> {
        let route = request.route;
        let url = self.url_for(&request);
        debug!(route = route.name(), url = %url, "calling gateway");
        let mut builder = self
            .client
            .request(method_for(route), url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, token.header_value());
        }
        let builder = attach_body(builder, request.body)?;

        let response = builder
            .send()
            .await
            .map_err(|err| Error::transport(format!("{TRANSPORT_PREFIX}: {err}")))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| Error::transport(format!("{TRANSPORT_PREFIX}: {err}")))?;
        serde_json::from_slice(&body).map_err(|err| {
            Error::unexpected(route.messages().unexpected).with_details(Value::String(err.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchParams;
    use rstest::{fixture, rstest};

    #[fixture]
    fn client() -> GatewayHttpClient {
        GatewayHttpClient::new(Url::parse("http://gateway.test/").expect("url"), None)
            .expect("client")
    }

    #[rstest]
    fn list_url_has_no_query(client: GatewayHttpClient) {
        let url = client.url_for(&ProxyRequest::new(ProxyRoute::NoticeList));
        assert_eq!(url.as_str(), "http://gateway.test/api/notices");
    }

    #[rstest]
    fn query_identifier_is_added(client: GatewayHttpClient) {
        let request = ProxyRequest::new(ProxyRoute::NoticeDelete).with_target("h 1");
        assert_eq!(
            client.url_for(&request).as_str(),
            "http://gateway.test/api/notices?view_hash=h+1"
        );
    }

    #[rstest]
    fn path_identifier_is_a_segment(client: GatewayHttpClient) {
        let request = ProxyRequest::new(ProxyRoute::FeedDetail).with_target("7");
        assert_eq!(client.url_for(&request).as_str(), "http://gateway.test/api/feeds/7");
    }

    #[rstest]
    fn filters_are_forwarded(client: GatewayHttpClient) {
        let request = ProxyRequest::new(ProxyRoute::FeedList)
            .with_query(SearchParams::new().with("limit", 15_u32).with("offset", 0_u32));
        assert_eq!(
            client.url_for(&request).as_str(),
            "http://gateway.test/api/feeds?limit=15&offset=0"
        );
    }

    #[rstest]
    fn literal_paths_are_kept(client: GatewayHttpClient) {
        let request = ProxyRequest::new(ProxyRoute::DashboardStats);
        assert_eq!(
            client.url_for(&request).as_str(),
            "http://gateway.test/api/dashboard/init-stat"
        );
    }
}

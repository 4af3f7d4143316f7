//! Debounced search inputs on the notice and feed stores, run on a paused
//! tokio clock.

use std::sync::Arc;
use std::time::Duration;

use oncare_gateway::domain::BackendRoutes;
use oncare_gateway::domain::RouteProxy;
use oncare_gateway::domain::debounce::{Debouncer, SEARCH_DEBOUNCE};
use oncare_gateway::domain::models::{FeedSearch, NoticeFilter};
use oncare_gateway::domain::stores::{FeedStore, NoticeStore, StoreGateway};
use oncare_gateway::outbound::gateway::InProcessGateway;
use oncare_gateway::test_support::{StubBackend, ok_envelope};
use rstest::{fixture, rstest};
use serde_json::json;
use url::Url;

const KEYSTROKE_GAP: Duration = Duration::from_millis(100);

#[fixture]
fn backend() -> StubBackend {
    StubBackend::always(ok_envelope(json!([
        { "id": 1, "title": "휴원 안내", "category_text": "공지", "created_at": "2024-03-01T09:00:00Z" },
        { "id": 2, "title": "급식 메뉴", "category_text": "식단", "created_at": "2024-03-02T09:00:00Z" }
    ])))
}

fn gateway_over(backend: &StubBackend) -> StoreGateway {
    let base = Url::parse("http://backend.test").expect("base url");
    let proxy = RouteProxy::new(Arc::new(backend.clone()), BackendRoutes::new(base));
    StoreGateway::new(Arc::new(InProcessGateway::new(Arc::new(proxy))))
}

fn title(text: &str) -> NoticeFilter {
    NoticeFilter {
        title: Some(text.to_owned()),
        ..NoticeFilter::default()
    }
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn rapid_notice_filters_issue_one_read(backend: StubBackend) {
    let store = Arc::new(NoticeStore::new(gateway_over(&backend)));

    for text in ["휴", "휴원", "휴원 안"] {
        store.search(title(text));
        tokio::time::sleep(KEYSTROKE_GAP).await;
    }
    assert!(backend.requests().is_empty());
    tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

    assert_eq!(backend.urls(), vec!["http://backend.test/notices/list"]);
    let state = store.state();
    assert_eq!(state.filter, title("휴원 안"));
    assert_eq!(state.notices.len(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn spaced_filters_each_run(backend: StubBackend) {
    let store = Arc::new(NoticeStore::new(gateway_over(&backend)));

    store.search(title("휴원"));
    tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;
    store.search(title("급식"));
    tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

    assert_eq!(backend.requests().len(), 2);
    assert_eq!(store.state().filter, title("급식"));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn detaching_cancels_a_pending_search(backend: StubBackend) {
    let store = Arc::new(NoticeStore::new(gateway_over(&backend)));

    store.search(title("휴원"));
    store.detach();
    tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

    assert!(backend.requests().is_empty());
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn feed_search_restarts_from_the_first_page(backend: StubBackend) {
    let debouncer = Debouncer::new(Duration::from_millis(50));
    let store = Arc::new(FeedStore::with_debouncer(gateway_over(&backend), debouncer));

    for text in ["소", "소풍"] {
        store.search(FeedSearch {
            title: Some(text.to_owned()),
            ..FeedSearch::default()
        });
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    let urls = backend.urls();
    assert_eq!(urls.len(), 1);
    let url = Url::parse(urls.first().expect("one call")).expect("url");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("offset".to_owned(), "0".to_owned())));
    assert!(pairs.contains(&("title".to_owned(), "소풍".to_owned())));
}

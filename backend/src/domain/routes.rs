//! Route table for the proxy.
//!
//! Each [`ProxyRoute`] pins down everything the proxy needs to forward one
//! inbound call: the backend method and path, where the target identifier
//! lives, how the body is treated, which query parameters pass through, and
//! the fixed confirmation and fallback messages.
//!
//! ```text
//! GET  /api/notices                    -> GET  {base}/notices/list
//! PUT  /api/notices?view_hash=h        -> PUT  {base}/notices/update/h
//! GET  /api/feeds/{feed_id}            -> GET  {base}/feeds/detail/{feed_id}
//! GET  /api/feeds?limit=15&offset=0    -> GET  {base}/feeds/list?limit=15&offset=0
//! DELETE /api/feeds/comments?comment_hash=c -> DELETE {base}/feeds/comments/c
//! ```

use std::fmt;

use url::Url;

use super::SearchParams;

/// HTTP methods the proxy forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a route treats the inbound body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// The body is ignored and nothing is forwarded.
    Empty,
    /// The body is parsed as JSON. When `required`, an empty body, `null`,
    /// or `{}` is rejected before any backend call.
    Json {
        /// Whether an empty payload is a validation error.
        required: bool,
    },
    /// The body is `multipart/form-data` forwarded unmodified.
    Multipart,
}

/// Which inbound query parameters reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPolicy {
    /// Nothing is forwarded.
    Drop,
    /// Every non-empty parameter is forwarded.
    Any,
    /// Only the listed names are forwarded.
    Only(&'static [&'static str]),
}

/// Where the target identifier of a route is carried on the inbound side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdParam {
    /// A query parameter, such as `view_hash`.
    Query(&'static str),
    /// The trailing path segment, such as `/api/feeds/{feed_id}`.
    Path,
}

/// Fixed strings attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMessages {
    /// Confirmation sent with every successful call.
    pub success: &'static str,
    /// Used when the backend says `success: false` without a reason.
    pub failure: &'static str,
    /// Used for failures that carry no usable message at all.
    pub unexpected: &'static str,
}

const FEED_LIST_QUERY: &[&str] = &[
    "limit",
    "offset",
    "title",
    "nickname",
    "start_date",
    "end_date",
    "sort_by",
];

const COMMENT_LIST_QUERY: &[&str] = &["feed_id", "limit", "offset"];

const SUMMARY_QUERY: &[&str] = &[
    "user_hash",
    "model",
    "startDate",
    "endDate",
    "nickname",
    "search_type",
    "search_value",
    "limit",
    "offset",
];

/// Message returned when a notice call lacks its `view_hash`.
pub const MISSING_NOTICE_ID: &str = "공지사항 ID가 제공되지 않았습니다.";
/// Message returned when a feed detail call lacks its identifier.
pub const MISSING_FEED_ID: &str = "피드 ID가 제공되지 않았습니다.";
/// Message returned when a comment delete lacks its `comment_hash`.
pub const MISSING_COMMENT_ID: &str = "댓글 ID가 제공되지 않았습니다.";

/// Every operation the proxy knows how to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyRoute {
    /// List notices.
    NoticeList,
    /// Create a notice.
    NoticeCreate,
    /// Update notice fields.
    NoticeUpdate,
    /// Flip a notice between active and inactive.
    NoticeToggleStatus,
    /// Delete a notice.
    NoticeDelete,
    /// List category codes grouped by type.
    CategoryList,
    /// Create a category code.
    CategoryCreate,
    /// Update a category code.
    CategoryUpdate,
    /// Delete a category code.
    CategoryDelete,
    /// Page through users.
    UserList,
    /// Change a user's active flag.
    UserUpdate,
    /// Reset a user's password.
    UserResetPassword,
    /// Infinite-scroll feed listing.
    FeedList,
    /// One feed with its comments.
    FeedDetail,
    /// Create a feed with an optional image.
    FeedCreate,
    /// Update a feed with an optional image.
    FeedUpdate,
    /// Delete a feed.
    FeedDelete,
    /// Toggle the caller's like on a feed.
    FeedLike,
    /// Toggle the caller's bookmark on a feed.
    FeedBookmark,
    /// Comments of one feed.
    FeedCommentList,
    /// Post a comment or a reply.
    FeedCommentCreate,
    /// Remove a comment.
    FeedCommentDelete,
    /// Search AI summaries.
    SummarySearch,
    /// Dashboard headline counters.
    DashboardStats,
}

impl ProxyRoute {
    /// All routes, in table order.
    pub const ALL: [Self; 24] = [
        Self::NoticeList,
        Self::NoticeCreate,
        Self::NoticeUpdate,
        Self::NoticeToggleStatus,
        Self::NoticeDelete,
        Self::CategoryList,
        Self::CategoryCreate,
        Self::CategoryUpdate,
        Self::CategoryDelete,
        Self::UserList,
        Self::UserUpdate,
        Self::UserResetPassword,
        Self::FeedList,
        Self::FeedDetail,
        Self::FeedCreate,
        Self::FeedUpdate,
        Self::FeedDelete,
        Self::FeedLike,
        Self::FeedBookmark,
        Self::FeedCommentList,
        Self::FeedCommentCreate,
        Self::FeedCommentDelete,
        Self::SummarySearch,
        Self::DashboardStats,
    ];

    /// Stable snake-case name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoticeList => "notice_list",
            Self::NoticeCreate => "notice_create",
            Self::NoticeUpdate => "notice_update",
            Self::NoticeToggleStatus => "notice_toggle_status",
            Self::NoticeDelete => "notice_delete",
            Self::CategoryList => "category_list",
            Self::CategoryCreate => "category_create",
            Self::CategoryUpdate => "category_update",
            Self::CategoryDelete => "category_delete",
            Self::UserList => "user_list",
            Self::UserUpdate => "user_update",
            Self::UserResetPassword => "user_reset_password",
            Self::FeedList => "feed_list",
            Self::FeedDetail => "feed_detail",
            Self::FeedCreate => "feed_create",
            Self::FeedUpdate => "feed_update",
            Self::FeedDelete => "feed_delete",
            Self::FeedLike => "feed_like",
            Self::FeedBookmark => "feed_bookmark",
            Self::FeedCommentList => "feed_comment_list",
            Self::FeedCommentCreate => "feed_comment_create",
            Self::FeedCommentDelete => "feed_comment_delete",
            Self::SummarySearch => "summary_search",
            Self::DashboardStats => "dashboard_stats",
        }
    }

    /// Method used both inbound and towards the backend.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::NoticeList
            | Self::CategoryList
            | Self::UserList
            | Self::FeedList
            | Self::FeedDetail
            | Self::FeedCommentList
            | Self::SummarySearch
            | Self::DashboardStats => HttpMethod::Get,
            Self::NoticeCreate
            | Self::CategoryCreate
            | Self::FeedCreate
            | Self::FeedLike
            | Self::FeedBookmark
            | Self::FeedCommentCreate => HttpMethod::Post,
            Self::NoticeUpdate
            | Self::NoticeToggleStatus
            | Self::CategoryUpdate
            | Self::UserUpdate
            | Self::UserResetPassword
            | Self::FeedUpdate => HttpMethod::Put,
            Self::NoticeDelete
            | Self::CategoryDelete
            | Self::FeedDelete
            | Self::FeedCommentDelete => HttpMethod::Delete,
        }
    }

    /// Backend path segments before the optional identifier.
    #[must_use]
    pub const fn backend_segments(self) -> &'static [&'static str] {
        match self {
            Self::NoticeList => &["notices", "list"],
            Self::NoticeCreate => &["notices", "create"],
            Self::NoticeUpdate => &["notices", "update"],
            Self::NoticeToggleStatus => &["notices", "toggle_status"],
            Self::NoticeDelete => &["notices", "delete"],
            Self::CategoryList => &["categories_codes", "list"],
            Self::CategoryCreate => &["categories_codes", "create"],
            Self::CategoryUpdate => &["categories_codes", "update"],
            Self::CategoryDelete => &["categories_codes", "delete"],
            Self::UserList => &["users", "list"],
            Self::UserUpdate => &["users", "update"],
            Self::UserResetPassword => &["users", "reset", "password"],
            Self::FeedList => &["feeds", "list"],
            Self::FeedDetail => &["feeds", "detail"],
            Self::FeedCreate => &["feeds", "create"],
            Self::FeedUpdate => &["feeds", "update"],
            Self::FeedDelete => &["feeds", "delete"],
            Self::FeedLike => &["feeds", "like"],
            Self::FeedBookmark => &["feeds", "bookmark"],
            Self::FeedCommentList => &["feeds", "comments", "list"],
            Self::FeedCommentCreate => &["feeds", "comments", "create"],
            Self::FeedCommentDelete => &["feeds", "comments"],
            Self::SummarySearch => &["summaries", "search"],
            Self::DashboardStats => &["dashboard", "init", "stat"],
        }
    }

    /// Gateway path the route is served under.
    #[must_use]
    pub const fn gateway_path(self) -> &'static str {
        match self {
            Self::NoticeList
            | Self::NoticeCreate
            | Self::NoticeUpdate
            | Self::NoticeToggleStatus
            | Self::NoticeDelete => "/api/notices",
            Self::CategoryList
            | Self::CategoryCreate
            | Self::CategoryUpdate
            | Self::CategoryDelete => "/api/category-codes",
            Self::UserList | Self::UserUpdate => "/api/users",
            Self::UserResetPassword => "/api/users/password-reset",
            Self::FeedList
            | Self::FeedDetail
            | Self::FeedCreate
            | Self::FeedUpdate
            | Self::FeedDelete => "/api/feeds",
            Self::FeedLike => "/api/feeds/like",
            Self::FeedBookmark => "/api/feeds/bookmark",
            Self::FeedCommentList | Self::FeedCommentCreate | Self::FeedCommentDelete => {
                "/api/feeds/comments"
            }
            Self::SummarySearch => "/api/summaries",
            Self::DashboardStats => "/api/dashboard/init-stat",
        }
    }

    /// Where the target identifier travels, for routes that need one.
    #[must_use]
    pub const fn id_param(self) -> Option<IdParam> {
        match self {
            Self::NoticeUpdate | Self::NoticeToggleStatus | Self::NoticeDelete => {
                Some(IdParam::Query("view_hash"))
            }
            Self::FeedDetail => Some(IdParam::Path),
            Self::FeedCommentDelete => Some(IdParam::Query("comment_hash")),
            _ => None,
        }
    }

    /// Validation message for a missing identifier.
    #[must_use]
    pub const fn missing_id_message(self) -> &'static str {
        match self {
            Self::FeedDetail => MISSING_FEED_ID,
            Self::FeedCommentDelete => MISSING_COMMENT_ID,
            _ => MISSING_NOTICE_ID,
        }
    }

    /// Body handling for this route.
    #[must_use]
    pub const fn body_policy(self) -> BodyPolicy {
        match self {
            Self::NoticeList
            | Self::NoticeDelete
            | Self::CategoryList
            | Self::UserList
            | Self::FeedList
            | Self::FeedDetail
            | Self::FeedCommentList
            | Self::SummarySearch
            | Self::DashboardStats => BodyPolicy::Empty,
            Self::NoticeCreate
            | Self::CategoryCreate
            | Self::FeedLike
            | Self::FeedBookmark
            | Self::FeedCommentCreate => BodyPolicy::Json { required: true },
            Self::NoticeUpdate
            | Self::NoticeToggleStatus
            | Self::CategoryUpdate
            | Self::CategoryDelete
            | Self::UserUpdate
            | Self::UserResetPassword
            | Self::FeedDelete
            | Self::FeedCommentDelete => BodyPolicy::Json { required: false },
            Self::FeedCreate | Self::FeedUpdate => BodyPolicy::Multipart,
        }
    }

    /// Which inbound query parameters pass through to the backend.
    #[must_use]
    pub const fn query_policy(self) -> QueryPolicy {
        match self {
            Self::UserList => QueryPolicy::Any,
            Self::FeedList => QueryPolicy::Only(FEED_LIST_QUERY),
            Self::FeedCommentList => QueryPolicy::Only(COMMENT_LIST_QUERY),
            Self::SummarySearch => QueryPolicy::Only(SUMMARY_QUERY),
            _ => QueryPolicy::Drop,
        }
    }

    /// Apply [`ProxyRoute::query_policy`] to inbound parameters.
    #[must_use]
    pub fn forwarded_query(self, query: &SearchParams) -> SearchParams {
        match self.query_policy() {
            QueryPolicy::Drop => SearchParams::new(),
            QueryPolicy::Any => query.clone(),
            QueryPolicy::Only(allowed) => query.clone().retain_keys(allowed),
        }
    }

    /// Fixed messages for this route.
    #[must_use]
    pub const fn messages(self) -> RouteMessages {
        let (success, failure, unexpected) = match self {
            Self::NoticeList => (
                "공지사항 조회 성공하였습니다",
                "공지사항 조회에 실패했습니다.",
                "공지사항 조회 중 오류가 발생했습니다.",
            ),
            Self::NoticeCreate => (
                "공지사항 생성에 성공하였습니다",
                "공지사항 생성에 실패했습니다.",
                "공지사항 생성 중 오류가 발생했습니다.",
            ),
            Self::NoticeUpdate | Self::NoticeToggleStatus => (
                "공지사항 정보 변경하였습니다",
                "공지사항 정보 변경에 실패했습니다.",
                "공지사항 정보 변경 중 오류가 발생했습니다.",
            ),
            Self::NoticeDelete => (
                "공지사항 삭제에 성공하였습니다",
                "공지사항 삭제에 실패했습니다.",
                "공지사항 삭제 중 오류가 발생했습니다.",
            ),
            Self::CategoryList => (
                "카테고리 코드 조회 성공하였습니다",
                "카테고리 코드 조회에 실패했습니다.",
                "카테고리 코드 조회 중 오류가 발생했습니다.",
            ),
            Self::CategoryCreate => (
                "카테고리 코드 생성 성공하였습니다",
                "카테고리 코드 생성에 실패했습니다.",
                "카테고리 코드 생성 중 오류가 발생했습니다.",
            ),
            Self::CategoryUpdate => (
                "카테고리 코드 수정 성공하였습니다",
                "카테고리 코드 수정에 실패했습니다.",
                "카테고리 코드 수정 중 오류가 발생했습니다.",
            ),
            Self::CategoryDelete => (
                "카테고리 코드 삭제 성공하였습니다",
                "카테고리 코드 삭제에 실패했습니다.",
                "카테고리 코드 삭제 중 오류가 발생했습니다.",
            ),
            Self::UserList => (
                "회원 목록 조회 성공하였습니다",
                "회원 목록 조회에 실패했습니다.",
                "회원 목록 조회 중 오류가 발생했습니다.",
            ),
            Self::UserUpdate => (
                "회원 상태 변경 성공하였습니다",
                "상태 변경에 실패했습니다.",
                "회원 상태 변경 중 오류가 발생했습니다.",
            ),
            Self::UserResetPassword => (
                "비밀번호 초기화 성공하였습니다",
                "비밀번호 초기화에 실패했습니다.",
                "비밀번호 초기화 중 오류가 발생했습니다.",
            ),
            Self::FeedList => (
                "피드 조회 성공",
                "피드 조회에 실패했습니다.",
                "피드 조회 중 오류가 발생했습니다.",
            ),
            Self::FeedDetail => (
                "피드 상세 조회 성공",
                "피드 상세 조회에 실패했습니다.",
                "피드 상세 조회 중 오류가 발생했습니다.",
            ),
            Self::FeedCreate => (
                "피드 생성 성공",
                "피드 생성에 실패했습니다.",
                "피드 생성 중 오류가 발생했습니다.",
            ),
            Self::FeedUpdate => (
                "피드 수정 성공",
                "피드 수정에 실패했습니다.",
                "피드 수정 중 오류가 발생했습니다.",
            ),
            Self::FeedDelete => (
                "피드 삭제 성공",
                "피드 삭제에 실패했습니다.",
                "피드 삭제 중 오류가 발생했습니다.",
            ),
            Self::FeedLike => (
                "좋아요 처리 성공",
                "좋아요 처리에 실패했습니다.",
                "좋아요 처리 중 오류가 발생했습니다.",
            ),
            Self::FeedBookmark => (
                "찜하기 처리 성공",
                "찜하기 처리에 실패했습니다.",
                "찜하기 처리 중 오류가 발생했습니다.",
            ),
            Self::FeedCommentList => (
                "댓글 조회 성공",
                "댓글 조회에 실패했습니다.",
                "댓글 조회 중 오류가 발생했습니다.",
            ),
            Self::FeedCommentCreate => (
                "댓글 등록 성공",
                "댓글 등록에 실패했습니다.",
                "댓글 등록 중 오류가 발생했습니다.",
            ),
            Self::FeedCommentDelete => (
                "댓글 삭제 성공",
                "댓글 삭제에 실패했습니다.",
                "댓글 삭제 중 오류가 발생했습니다.",
            ),
            Self::SummarySearch => (
                "요약정보 조회에 성공하였습니다",
                "요약정보 조회에 실패했습니다.",
                "요약정보 조회 중 오류가 발생했습니다.",
            ),
            Self::DashboardStats => (
                "대시보드 통계 조회 성공",
                "대시보드 통계 조회에 실패했습니다.",
                "대시보드 통계 조회 중 오류가 발생했습니다.",
            ),
        };
        RouteMessages {
            success,
            failure,
            unexpected,
        }
    }
}

impl fmt::Display for ProxyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds backend URLs from the configured base.
///
/// # Examples
/// ```
/// use oncare_gateway::domain::{BackendRoutes, ProxyRoute, SearchParams};
/// use url::Url;
///
/// let routes = BackendRoutes::new(Url::parse("http://localhost:8000").expect("url"));
/// let url = routes.url_for(ProxyRoute::NoticeList, None, &SearchParams::new());
/// assert_eq!(url.as_str(), "http://localhost:8000/notices/list");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRoutes {
    base: Url,
}

impl BackendRoutes {
    /// Wrap the resolved backend base URL.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// The configured base URL.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Full backend URL for `route`.
    ///
    /// `target_id` is appended as a single percent-encoded segment. The query
    /// string is only attached when at least one parameter survives, so a call
    /// without filters ends at the template suffix.
    #[must_use]
    pub fn url_for(&self, route: ProxyRoute, target_id: Option<&str>, query: &SearchParams) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(route.backend_segments());
            if let Some(id) = target_id {
                segments.push(id);
            }
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.pairs());
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn routes() -> BackendRoutes {
        BackendRoutes::new(Url::parse("https://backend.test/v1/").expect("url"))
    }

    #[rstest]
    fn list_routes_end_at_template_suffix(routes: BackendRoutes) {
        for route in ProxyRoute::ALL
            .into_iter()
            .filter(|route| route.method() == HttpMethod::Get && route.id_param().is_none())
        {
            let url = routes.url_for(route, None, &SearchParams::new());
            assert!(url.query().is_none(), "{route} should carry no query");
            assert!(!url.as_str().contains('?'), "{route} should not end with '?'");
        }
    }

    #[rstest]
    #[case::notice_update(ProxyRoute::NoticeUpdate, "h1", "https://backend.test/v1/notices/update/h1")]
    #[case::toggle(ProxyRoute::NoticeToggleStatus, "h1", "https://backend.test/v1/notices/toggle_status/h1")]
    #[case::feed_detail(ProxyRoute::FeedDetail, "7", "https://backend.test/v1/feeds/detail/7")]
    #[case::comment(ProxyRoute::FeedCommentDelete, "c9", "https://backend.test/v1/feeds/comments/c9")]
    #[case::encoded(ProxyRoute::NoticeDelete, "a/b c", "https://backend.test/v1/notices/delete/a%2Fb%20c")]
    fn identifiers_become_one_segment(
        routes: BackendRoutes,
        #[case] route: ProxyRoute,
        #[case] id: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(routes.url_for(route, Some(id), &SearchParams::new()).as_str(), expected);
    }

    #[rstest]
    fn feed_list_forwards_only_known_filters(routes: BackendRoutes) {
        let inbound = SearchParams::new()
            .with("limit", 15_u32)
            .with("offset", 30_u32)
            .with("title", "")
            .with("debug", "yes");
        let query = ProxyRoute::FeedList.forwarded_query(&inbound);
        let url = routes.url_for(ProxyRoute::FeedList, None, &query);
        assert_eq!(url.as_str(), "https://backend.test/v1/feeds/list?limit=15&offset=30");
    }

    #[rstest]
    fn comment_list_forwards_the_feed_and_window(routes: BackendRoutes) {
        let inbound = SearchParams::new()
            .with("feed_id", 7_u32)
            .with("limit", 20_u32)
            .with("title", "x");
        let query = ProxyRoute::FeedCommentList.forwarded_query(&inbound);
        let url = routes.url_for(ProxyRoute::FeedCommentList, None, &query);
        assert_eq!(
            url.as_str(),
            "https://backend.test/v1/feeds/comments/list?feed_id=7&limit=20"
        );
    }

    #[test]
    fn every_route_has_distinct_messages() {
        for route in ProxyRoute::ALL {
            let messages = route.messages();
            assert_ne!(messages.success, messages.failure, "{route}");
            assert_ne!(messages.failure, messages.unexpected, "{route}");
        }
    }

    #[test]
    fn json_required_routes_are_writes() {
        for route in ProxyRoute::ALL {
            if matches!(route.body_policy(), BodyPolicy::Json { required: true }) {
                assert_eq!(route.method(), HttpMethod::Post, "{route}");
            }
        }
    }
}

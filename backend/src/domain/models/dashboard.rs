//! Dashboard counters.

use serde::{Deserialize, Serialize};

/// `data` of `GET /dashboard/init/stat`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub last_regist_feed_time: Option<String>,
    pub last_regist_user_time: Option<String>,
    pub last_regist_notice_time: Option<String>,
    pub total_feeds: u64,
    pub total_users: u64,
    pub total_hotdeals: u64,
}

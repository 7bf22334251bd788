//! 门户运行时配置
//!
//! WASM 前端没有进程环境变量，配置在构建时通过 `option_env!` 注入，
//! 未定义时使用默认值。

use std::time::Duration;

/// 这些是默认值，构建时如果没有定义对应的环境变量，则使用这些值
const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DEFAULT_SESSION_KEY: &str = "internhub_session";
const DEFAULT_TOAST_SECS: u64 = 4;
const DEFAULT_FEED_CAPACITY: usize = 50;

/// 门户配置结构体
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    /// 后端 API 根地址（无尾部斜杠）
    pub api_base_url: String,
    /// LocalStorage 中持久化会话 `{ user, token }` 的键
    pub session_key: String,
    /// 通知自动消失时间
    pub toast_duration: Duration,
    /// 通知列表最多保留的条数
    pub feed_capacity: usize,
}

impl PortalConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("INTERNHUB_API_URL"),
            option_env!("INTERNHUB_SESSION_KEY"),
            option_env!("INTERNHUB_TOAST_SECS"),
            option_env!("INTERNHUB_FEED_CAPACITY"),
        )
    }

    fn from_values(
        api_url: Option<&str>,
        session_key: Option<&str>,
        toast_secs: Option<&str>,
        feed_capacity: Option<&str>,
    ) -> Self {
        Self {
            api_base_url: non_empty(api_url)
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            session_key: non_empty(session_key)
                .unwrap_or(DEFAULT_SESSION_KEY)
                .to_string(),
            toast_duration: Duration::from_secs(
                non_empty(toast_secs)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TOAST_SECS),
            ),
            feed_capacity: non_empty(feed_capacity)
                .and_then(|v| v.parse().ok())
                .filter(|&c: &usize| c > 0)
                .unwrap_or(DEFAULT_FEED_CAPACITY),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::from_values(None, None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.session_key, "internhub_session");
        assert_eq!(config.toast_duration, Duration::from_secs(4));
        assert_eq!(config.feed_capacity, 50);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = PortalConfig::from_values(
            Some("https://portal.example.edu/api///"),
            Some("  "),
            Some("ten"),
            Some("0"),
        );
        assert_eq!(config.api_base_url, "https://portal.example.edu/api");
        assert_eq!(config.session_key, "internhub_session");
        assert_eq!(config.toast_duration, Duration::from_secs(4));
        assert_eq!(config.feed_capacity, 50);
    }
}

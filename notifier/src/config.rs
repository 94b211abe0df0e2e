use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::env;
use std::time::Duration;

/// Process configuration, read once at startup and immutable afterwards.
///
/// Missing required secrets are a fatal startup error; every tick-level
/// knob has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub luma_api_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,

    /// Guest names that get the VIP marker and trigger mentions.
    pub vip_guests: Vec<String>,
    /// Handles appended to VIP notifications.
    pub mention_users: Vec<String>,

    pub poll_interval_secs: u64,
    pub checkin_window_secs: u64,
    /// The first cycle after startup uses `window * multiplier` to cover
    /// check-ins that happened while the process was down.
    pub startup_window_multiplier: u32,
    pub tick_timeout_secs: u64,

    /// Zone check-in times are rendered in for notifications.
    pub display_timezone: Tz,

    pub luma_api_base: String,
    pub telegram_api_base: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            luma_api_key: env::var("LUMA_API_KEY").context("LUMA_API_KEY must be set")?,
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .context("TELEGRAM_BOT_TOKEN must be set")?,
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID")
                .context("TELEGRAM_CHAT_ID must be set")?,
            vip_guests: parse_name_list(&env::var("VIP_GUESTS").unwrap_or_default()),
            mention_users: parse_name_list(&env::var("MENTION_USERS").unwrap_or_default()),
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .context("POLL_INTERVAL_SECS must be a valid number")?,
            checkin_window_secs: env::var("CHECKIN_WINDOW_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .context("CHECKIN_WINDOW_SECS must be a valid number")?,
            startup_window_multiplier: env::var("STARTUP_WINDOW_MULTIPLIER")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .context("STARTUP_WINDOW_MULTIPLIER must be a valid number")?,
            tick_timeout_secs: env::var("TICK_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("TICK_TIMEOUT_SECS must be a valid number")?,
            display_timezone: env::var("DISPLAY_TIMEZONE")
                .unwrap_or_else(|_| "Asia/Seoul".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("DISPLAY_TIMEZONE must be a valid IANA zone: {e}"))?,
            luma_api_base: env::var("LUMA_API_BASE")
                .unwrap_or_else(|_| "https://api.lu.ma".to_string()),
            telegram_api_base: env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
        })
    }

    /// Window used by every cycle after the first.
    pub fn steady_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.checkin_window_secs as i64)
    }

    /// Widened window for the first cycle after startup.
    pub fn startup_window(&self) -> chrono::Duration {
        self.steady_window() * self.startup_window_multiplier as i32
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Hard ceiling on a single cycle; an overrun is abandoned.
    pub fn tick_ceiling(&self) -> Duration {
        Duration::from_secs(self.tick_timeout_secs)
    }
}

fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        luma_api_key: "test-luma-key".to_string(),
        telegram_bot_token: "test-bot-token".to_string(),
        telegram_chat_id: "test-chat".to_string(),
        vip_guests: Vec::new(),
        mention_users: Vec::new(),
        poll_interval_secs: 300,
        checkin_window_secs: 300,
        startup_window_multiplier: 4,
        tick_timeout_secs: 60,
        display_timezone: chrono_tz::Asia::Seoul,
        luma_api_base: "http://localhost".to_string(),
        telegram_api_base: "http://localhost".to_string(),
    }
}

use rust_decimal::Decimal;
use std::time::Duration;

/// Runtime configuration for the order core
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Database and log directory |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | Default tracing filter |
/// | LOG_JSON | false | Emit JSON log lines |
/// | VOID_WINDOW_SECS | 86400 | How long a payment stays voidable |
/// | CASH_SHORTFALL_TOLERANCE | 0.00 | Cash below total still accepted |
/// | BOARD_REFRESH_SECS | 30 | Kitchen/cashier board refresh tick |
/// | PRIORITY_MEDIUM_MINUTES | 10 | Wait before an item is `media` |
/// | PRIORITY_HIGH_MINUTES | 20 | Wait before an item is `alta` |
/// | PRIORITY_URGENT_MINUTES | 30 | Wait before an item is `urgente` |
/// | EVENT_CHANNEL_CAPACITY | 1024 | Order event broadcast buffer |
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub void_window_secs: u64,
    pub cash_shortfall_tolerance: Decimal,
    pub board_refresh_secs: u64,
    pub priority: PriorityThresholds,
    pub event_channel_capacity: usize,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present)
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON", false),
            void_window_secs: env_parse("VOID_WINDOW_SECS", 86_400),
            cash_shortfall_tolerance: env_parse("CASH_SHORTFALL_TOLERANCE", Decimal::ZERO),
            board_refresh_secs: env_parse("BOARD_REFRESH_SECS", 30),
            priority: PriorityThresholds {
                medium_minutes: env_parse("PRIORITY_MEDIUM_MINUTES", 10),
                high_minutes: env_parse("PRIORITY_HIGH_MINUTES", 20),
                urgent_minutes: env_parse("PRIORITY_URGENT_MINUTES", 30),
            },
            event_channel_capacity: env_parse("EVENT_CHANNEL_CAPACITY", 1024),
        }
    }

    /// redb file under the work directory
    pub fn database_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("orders.redb")
    }

    pub fn log_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("logs")
    }

    pub fn board_refresh(&self) -> Duration {
        Duration::from_secs(self.board_refresh_secs.max(1))
    }

    pub fn order_policy(&self) -> OrderPolicy {
        OrderPolicy {
            void_window_secs: self.void_window_secs,
            cash_shortfall_tolerance: self.cash_shortfall_tolerance,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: "./data".into(),
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            void_window_secs: 86_400,
            cash_shortfall_tolerance: Decimal::ZERO,
            board_refresh_secs: 30,
            priority: PriorityThresholds::default(),
            event_channel_capacity: 1024,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Payment rules applied by the order engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderPolicy {
    /// Inclusive: a payment exactly this old can still be voided
    pub void_window_secs: u64,
    pub cash_shortfall_tolerance: Decimal,
}

impl OrderPolicy {
    pub fn void_window_millis(&self) -> i64 {
        i64::try_from(self.void_window_secs.saturating_mul(1000)).unwrap_or(i64::MAX)
    }
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self {
            void_window_secs: 86_400,
            cash_shortfall_tolerance: Decimal::ZERO,
        }
    }
}

/// Wait-time thresholds for kitchen priority, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityThresholds {
    pub medium_minutes: i64,
    pub high_minutes: i64,
    pub urgent_minutes: i64,
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            medium_minutes: 10,
            high_minutes: 20,
            urgent_minutes: 30,
        }
    }
}

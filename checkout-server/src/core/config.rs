/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/checkout | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | LOG_LEVEL | info | Tracing level filter |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | PAYMENT_BASE_URL | http://localhost:4242 | Hosted checkout provider |
/// | PAYMENT_API_KEY | (empty) | Provider API key |
/// | CHECKOUT_SUCCESS_URL | http://localhost:3000/checkout/success | Redirect after payment |
/// | CHECKOUT_CANCEL_URL | http://localhost:3000/checkout/cancel | Redirect after cancel |
/// | STALE_ORDER_EXPIRY_MINUTES | 0 | Auto-delete unpaid orders older than this (0 = never) |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the embedded database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Tracing level filter
    pub log_level: String,
    /// Runtime environment: development | staging | production
    pub environment: String,

    // === Payment provider ===
    /// Base URL of the hosted checkout provider
    pub payment_base_url: String,
    /// Provider API key
    pub payment_api_key: String,
    /// Redirect URL after a successful payment
    pub checkout_success_url: String,
    /// Redirect URL after a cancelled payment
    pub checkout_cancel_url: String,

    // === Maintenance ===
    /// Delete unpaid pending orders older than this many minutes.
    /// 0 disables the sweep; unpaid orders then stay pending forever,
    /// which is the historical behavior.
    pub stale_order_expiry_minutes: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/checkout".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            payment_base_url: std::env::var("PAYMENT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4242".into()),
            payment_api_key: std::env::var("PAYMENT_API_KEY").unwrap_or_default(),
            checkout_success_url: std::env::var("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|_| "http://localhost:3000/checkout/success".into()),
            checkout_cancel_url: std::env::var("CHECKOUT_CANCEL_URL")
                .unwrap_or_else(|_| "http://localhost:3000/checkout/cancel".into()),

            stale_order_expiry_minutes: std::env::var("STALE_ORDER_EXPIRY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Whether running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

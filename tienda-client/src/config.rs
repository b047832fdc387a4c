//! Client configuration

use std::path::PathBuf;

/// Default backend URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// EmailJS credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

/// Firebase project used for Google sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub project_id: String,
}

/// Client configuration for connecting to the Tienda backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted key/value profile
    pub storage_dir: Option<PathBuf>,

    /// EmailJS integration; `None` means e-mails are simulated
    pub email: Option<EmailConfig>,

    /// Firebase integration; `None` means Google sign-in uses mock users
    pub firebase: Option<FirebaseConfig>,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            storage_dir: None,
            email: None,
            firebase: None,
        }
    }

    /// Read configuration from the environment (and `.env`, when present)
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TIENDA_API_URL` | `http://localhost:8080` |
    /// | `TIENDA_TIMEOUT_SECS` | `10` |
    /// | `TIENDA_STORAGE_DIR` | unset (in-memory storage) |
    /// | `EMAILJS_SERVICE_ID`, `EMAILJS_TEMPLATE_ID`, `EMAILJS_PUBLIC_KEY` | unset |
    /// | `FIREBASE_API_KEY`, `FIREBASE_PROJECT_ID` | unset |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::new(var("TIENDA_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()));
        config.timeout = var("TIENDA_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        config.storage_dir = var("TIENDA_STORAGE_DIR").map(PathBuf::from);

        if let (Some(service_id), Some(template_id), Some(public_key)) = (
            var("EMAILJS_SERVICE_ID"),
            var("EMAILJS_TEMPLATE_ID"),
            var("EMAILJS_PUBLIC_KEY"),
        ) {
            config.email = Some(EmailConfig {
                service_id,
                template_id,
                public_key,
            });
        }

        if let (Some(api_key), Some(project_id)) = (var("FIREBASE_API_KEY"), var("FIREBASE_PROJECT_ID")) {
            config.firebase = Some(FirebaseConfig { api_key, project_id });
        }

        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist storage under `dir`
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Enable EmailJS delivery
    pub fn with_email(mut self, email: EmailConfig) -> Self {
        self.email = Some(email);
        self
    }

    /// Enable Firebase Google sign-in
    pub fn with_firebase(mut self, firebase: FirebaseConfig) -> Self {
        self.firebase = Some(firebase);
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

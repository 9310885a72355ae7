/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except
/// `DATABASE_URL`, which `main` reads separately.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`; deck generation is slow).
    pub request_timeout_secs: u64,
    /// Maximum pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// Number of slides generated when a request omits `slide_count` (default: `7`).
    pub default_slide_count: u32,
    /// Upper bound accepted for `slide_count` (default: `20`).
    pub max_slide_count: u32,
    /// Content generation service settings.
    pub generation: GenerationConfig,
}

/// Settings for the chat-completions service used to draft slides.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `HOST`                    | `0.0.0.0`                   |
    /// | `PORT`                    | `3000`                      |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS`    | `120`                       |
    /// | `DB_MAX_CONNECTIONS`      | `20`                        |
    /// | `DEFAULT_SLIDE_COUNT`     | `7`                         |
    /// | `MAX_SLIDE_COUNT`         | `20`                        |
    /// | `GENERATION_API_URL`      | `https://api.openai.com/v1` |
    /// | `GENERATION_API_KEY`      | (empty)                     |
    /// | `GENERATION_MODEL`        | `gpt-4o-mini`               |
    /// | `GENERATION_TIMEOUT_SECS` | `90`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let default_slide_count: u32 = std::env::var("DEFAULT_SLIDE_COUNT")
            .unwrap_or_else(|_| "7".into())
            .parse()
            .expect("DEFAULT_SLIDE_COUNT must be a valid u32");

        let max_slide_count: u32 = std::env::var("MAX_SLIDE_COUNT")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("MAX_SLIDE_COUNT must be a valid u32");

        let generation = GenerationConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            default_slide_count,
            max_slide_count,
            generation,
        }
    }
}

impl GenerationConfig {
    pub fn from_env() -> Self {
        let api_url = std::env::var("GENERATION_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let api_key = std::env::var("GENERATION_API_KEY").unwrap_or_default();
        let model = std::env::var("GENERATION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

        let timeout_secs: u64 = std::env::var("GENERATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("GENERATION_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            api_key,
            model,
            timeout_secs,
        }
    }
}

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing key for bearer tokens. Must be non-empty.
    pub jwt_secret: String,
    pub token_ttl_minutes: u32,
    pub min_password_length: usize,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    /// Exact frontend origin, e.g. "https://files.example.com".
    /// Empty string means permissive CORS (local development).
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: Option<CorsConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        let defaults: &str = include_str!("../config/default.toml");
        match ::config::Config::builder()
            .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => {
                    eprintln!("FATAL: Failed to deserialize default config: {}", e);
                    panic!("Failed to deserialize default config: {}", e);
                }
            },
            Err(e) => {
                eprintln!("FATAL: Failed to parse default config: {}", e);
                panic!("Failed to parse default config: {}", e);
            }
        }
    }
}

impl AppConfig {
    /// The frontend origin CORS should be restricted to, if configured.
    pub fn cors_origin(&self) -> Option<&str> {
        self.cors
            .as_ref()
            .and_then(|c| c.allowed_origin.as_deref())
            .filter(|o| !o.is_empty())
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let defaults: &str = include_str!("../config/default.toml");
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(defaults, ::config::FileFormat::Toml))
        // Optional local file: mediashelf.toml (in CWD)
        .add_source(::config::File::with_name("mediashelf").required(false));

    if let Ok(custom_path) = std::env::var("MEDIASHELF_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("MEDIASHELF").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Server
    if cfg.server.port == 0 {
        return Err(anyhow::anyhow!("invalid server.port: {}", cfg.server.port));
    }
    // Warn for privileged ports on Unix-like systems
    #[cfg(unix)]
    if cfg.server.port < 1024 {
        tracing::warn!("Using privileged port {} - may require elevated permissions", cfg.server.port);
    }

    // Auth
    if cfg.auth.jwt_secret.is_empty() {
        return Err(anyhow::anyhow!(
            "auth.jwt_secret must be set (MEDIASHELF__AUTH__JWT_SECRET)"
        ));
    }
    if cfg.auth.jwt_secret.len() < 16 {
        tracing::warn!("auth.jwt_secret is shorter than 16 bytes - use a stronger secret");
    }
    if cfg.auth.token_ttl_minutes == 0 {
        return Err(anyhow::anyhow!("auth.token_ttl_minutes must be > 0"));
    }
    if cfg.auth.min_password_length == 0 {
        return Err(anyhow::anyhow!("auth.min_password_length must be > 0"));
    }

    // CORS
    if let Some(origin) = cfg.cors_origin() {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(anyhow::anyhow!("cors.allowed_origin must be an http(s) origin: {}", origin));
        }
    }

    Ok(())
}

pub fn ensure_sqlite_parent_dir(url: &str) -> anyhow::Result<()> {
    if let Some(path) = url.strip_prefix("sqlite://") {
        let p = std::path::Path::new(path);
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub minio: MinIOConfig,
    pub vision: VisionConfig,
    pub geolocation: GeolocationConfig,
    pub geocoding: GeocodingConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub jwks_cache_ttl: Duration,
    pub jwt_leeway: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// MinIO/S3 storage configuration for report images
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL for stored images (optional, defaults to endpoint)
    pub public_endpoint: String,
    /// Access key for authentication
    pub access_key: String,
    /// Secret key for authentication
    pub secret_key: String,
    /// Bucket name for report images
    pub bucket: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
}

/// Generative vision endpoint used for report classification
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Hard cutoff for one classification call
    pub request_timeout: Duration,
}

/// Geolocation resolution policies and the fixed fallback coordinate
#[derive(Debug, Clone)]
pub struct GeolocationConfig {
    /// Optional HTTP position provider; unset means positions cannot be
    /// resolved server-side and every resolution falls back or errors
    pub provider_url: Option<String>,
    pub precise_timeout: Duration,
    pub quick_timeout: Duration,
    /// Budget the submission pipeline allows for location resolution
    pub submission_budget: Duration,
    pub default_latitude: f64,
    pub default_longitude: f64,
}

/// Reverse geocoding endpoint (Nominatim-compatible)
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub user_agent: String,
}

/// Spreadsheet export webhook
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Unset disables exports; starting one then fails with a validation error
    pub webhook_url: Option<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            minio: MinIOConfig::from_env()?,
            vision: VisionConfig::from_env()?,
            geolocation: GeolocationConfig::from_env()?,
            geocoding: GeocodingConfig::from_env()?,
            export: ExportConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Conservative pool defaults for small-medium deployments
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 3600; // 1 hour
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60; // 1 minute

    pub fn from_env() -> Result<Self, String> {
        let issuer = env::var("OIDC_ISSUER")
            .map_err(|_| "OIDC_ISSUER environment variable is required".to_string())?;

        let audience = env::var("OIDC_AUDIENCE")
            .map_err(|_| "OIDC_AUDIENCE environment variable is required".to_string())?;

        let jwks_cache_ttl_secs = env::var("JWKS_CACHE_TTL")
            .unwrap_or_else(|_| Self::DEFAULT_JWKS_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWKS_CACHE_TTL must be a valid number".to_string())?;

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            issuer,
            audience,
            jwks_cache_ttl: Duration::from_secs(jwks_cache_ttl_secs),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "CleanCity API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for CleanCity".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MinIOConfig {
    pub fn from_env() -> Result<Self, String> {
        let endpoint =
            env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint =
            env::var("MINIO_PUBLIC_ENDPOINT").unwrap_or_else(|_| endpoint.clone());

        let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let bucket = env::var("MINIO_BUCKET").unwrap_or_else(|_| "waste-images".to_string());

        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Ok(Self {
            endpoint,
            public_endpoint,
            access_key,
            secret_key,
            bucket,
            region,
        })
    }
}

impl VisionConfig {
    const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";
    const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| "GEMINI_API_KEY environment variable is required".to_string())?;

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        let base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let request_timeout_secs = env::var("GEMINI_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "GEMINI_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            api_key,
            model,
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

impl GeolocationConfig {
    const DEFAULT_PRECISE_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_QUICK_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_SUBMISSION_BUDGET_SECS: u64 = 5;
    // Fallback coordinate used whenever resolution degrades (Delhi)
    const DEFAULT_LATITUDE: f64 = 28.7041;
    const DEFAULT_LONGITUDE: f64 = 77.1025;

    pub fn from_env() -> Result<Self, String> {
        let provider_url = env::var("GEOLOCATION_PROVIDER_URL")
            .ok()
            .filter(|s| !s.is_empty());

        let precise_timeout_secs = env::var("GEOLOCATION_PRECISE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_PRECISE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "GEOLOCATION_PRECISE_TIMEOUT_SECS must be a valid number".to_string())?;

        let quick_timeout_secs = env::var("GEOLOCATION_QUICK_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_QUICK_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "GEOLOCATION_QUICK_TIMEOUT_SECS must be a valid number".to_string())?;

        let submission_budget_secs = env::var("GEOLOCATION_SUBMISSION_BUDGET_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SUBMISSION_BUDGET_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "GEOLOCATION_SUBMISSION_BUDGET_SECS must be a valid number".to_string())?;

        let default_latitude = env::var("GEOLOCATION_DEFAULT_LAT")
            .unwrap_or_else(|_| Self::DEFAULT_LATITUDE.to_string())
            .parse::<f64>()
            .map_err(|_| "GEOLOCATION_DEFAULT_LAT must be a valid number".to_string())?;

        let default_longitude = env::var("GEOLOCATION_DEFAULT_LNG")
            .unwrap_or_else(|_| Self::DEFAULT_LONGITUDE.to_string())
            .parse::<f64>()
            .map_err(|_| "GEOLOCATION_DEFAULT_LNG must be a valid number".to_string())?;

        Ok(Self {
            provider_url,
            precise_timeout: Duration::from_secs(precise_timeout_secs),
            quick_timeout: Duration::from_secs(quick_timeout_secs),
            submission_budget: Duration::from_secs(submission_budget_secs),
            default_latitude,
            default_longitude,
        })
    }
}

impl GeocodingConfig {
    const DEFAULT_BASE_URL: &'static str = "https://nominatim.openstreetmap.org";

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("GEOCODING_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let user_agent = env::var("GEOCODING_USER_AGENT")
            .unwrap_or_else(|_| format!("cleancity-core/{}", env!("CARGO_PKG_VERSION")));

        Ok(Self {
            base_url,
            user_agent,
        })
    }
}

impl ExportConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let webhook_url = env::var("EXPORT_WEBHOOK_URL").ok().filter(|s| !s.is_empty());

        let request_timeout_secs = env::var("EXPORT_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "EXPORT_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            webhook_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

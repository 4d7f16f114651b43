use std::env;
use std::path::PathBuf;

/// Target box for a generated thumbnail.
///
/// `force` resizes to fill the box and crops the overflow so the thumbnail is
/// exactly `width`x`height`; otherwise the aspect ratio is kept and the image
/// only shrinks to fit inside the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
    pub force: bool,
}

impl ThumbnailSize {
    pub const fn forced(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            force: true,
        }
    }

    /// Parses `WIDTHxHEIGHT`, with a trailing `!` for a forced crop (e.g. `600x400!`).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let (dims, force) = match value.strip_suffix('!') {
            Some(rest) => (rest, true),
            None => (value, false),
        };
        let (w, h) = dims.split_once(['x', 'X'])?;
        let width: u32 = w.trim().parse().ok()?;
        let height: u32 = h.trim().parse().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            force,
        })
    }
}

/// Outbound mail settings for the password-recovery flow.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub use_ssl: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl MailConfig {
    fn from_env() -> Option<Self> {
        let server = env::var("MAIL_SERVER").ok()?;
        Some(Self {
            server,
            port: env::var("MAIL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(465),
            use_ssl: env::var("MAIL_USE_SSL")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
            username: env::var("MAIL_USERNAME").ok(),
            password: env::var("MAIL_PASSWORD").ok(),
        })
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string (default: local SQLite file)
    pub database_url: String,

    /// Directory holding uploaded originals and their thumbnails (default: "static/files")
    pub upload_dir: PathBuf,

    /// Maximum accepted image size in bytes (default: 16 MB)
    pub max_file_size: usize,

    /// Extensions accepted by the image upload field
    pub allowed_extensions: Vec<String>,

    /// Key used to sign session tokens
    pub secret_key: String,

    /// Session lifetime in hours (default: 24)
    pub session_hours: i64,

    /// Thumbnail box for project images (default: 600x400, forced)
    pub projeto_thumbnail: ThumbnailSize,

    /// Thumbnail box for photos (default: 120x80, forced)
    pub foto_thumbnail: ThumbnailSize,

    /// Bootstrap admin account, created at startup when both are set
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,

    pub mail: Option<MailConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://sample_db.sqlite?mode=rwc".to_string(),
            upload_dir: PathBuf::from("static/files"),
            max_file_size: 16 * 1024 * 1024, // 16 MB
            allowed_extensions: default_extensions(),
            secret_key: "secret".to_string(),
            session_hours: 24,
            projeto_thumbnail: ThumbnailSize::forced(600, 400),
            foto_thumbnail: ThumbnailSize::forced(120, 80),
            admin_email: None,
            admin_password: None,
            mail: None,
        }
    }
}

fn default_extensions() -> Vec<String> {
    ["gif", "jpg", "jpeg", "png", "tiff"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),

            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            allowed_extensions: env::var("ALLOWED_EXTENSIONS")
                .ok()
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(default.allowed_extensions),

            secret_key: env::var("SECRET_KEY").unwrap_or(default.secret_key), // Dev fallback, production() refuses it

            session_hours: env::var("SESSION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.session_hours),

            projeto_thumbnail: env::var("PROJETO_THUMBNAIL_SIZE")
                .ok()
                .and_then(|v| ThumbnailSize::parse(&v))
                .unwrap_or(default.projeto_thumbnail),

            foto_thumbnail: env::var("FOTO_THUMBNAIL_SIZE")
                .ok()
                .and_then(|v| ThumbnailSize::parse(&v))
                .unwrap_or(default.foto_thumbnail),

            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),

            mail: MailConfig::from_env(),
        }
    }

    /// Create config for development (in-memory database, temp-friendly upload dir)
    pub fn development() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            upload_dir: env::temp_dir().join("portfolio-backend-files"),
            ..Self::default()
        }
    }

    /// Create config for production. Requires `SECRET_KEY`.
    pub fn production() -> anyhow::Result<Self> {
        let config = Self::from_env();
        if env::var("SECRET_KEY").is_err() {
            anyhow::bail!("CRITICAL: SECRET_KEY must be set");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.max_file_size, 16 * 1024 * 1024);
        assert_eq!(config.projeto_thumbnail, ThumbnailSize::forced(600, 400));
        assert_eq!(config.foto_thumbnail, ThumbnailSize::forced(120, 80));
        assert!(config.allowed_extensions.contains(&"jpg".to_string()));
        assert!(config.mail.is_none());
    }

    #[test]
    fn test_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.session_hours, 24);
    }

    #[test]
    fn test_thumbnail_size_parse() {
        assert_eq!(
            ThumbnailSize::parse("600x400!"),
            Some(ThumbnailSize::forced(600, 400))
        );
        assert_eq!(
            ThumbnailSize::parse("400X300"),
            Some(ThumbnailSize {
                width: 400,
                height: 300,
                force: false
            })
        );
        assert_eq!(ThumbnailSize::parse("0x10"), None);
        assert_eq!(ThumbnailSize::parse("wide"), None);
    }
}

use anyhow::{bail, Context, Result};

const DEFAULT_JWT_EXPIRY: &str = "7d";
const DEFAULT_BCRYPT_COST: u32 = 10;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;
const MAX_JWT_EXPIRY_SECS: i64 = 100 * 365 * 24 * 60 * 60;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL, or `memory://` for the in-process document store.
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiry_secs: i64,
    pub bcrypt_cost: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let jwt_expiry =
            std::env::var("JWT_EXPIRY").unwrap_or_else(|_| DEFAULT_JWT_EXPIRY.to_string());
        let bcrypt_cost = match std::env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .parse::<u32>()
                .context("BCRYPT_COST must be an integer")?,
            Err(_) => DEFAULT_BCRYPT_COST,
        };
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_expiry_secs: parse_expiry(&jwt_expiry)
                .with_context(|| format!("JWT_EXPIRY '{jwt_expiry}' is not a valid duration"))?,
            bcrypt_cost,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// True when `DATABASE_URL` selects the in-process store.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory:")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses a token lifetime such as `7d`, `12h`, `30m`, `45s` or bare seconds.
pub fn parse_expiry(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.chars().last() {
        Some('s') => (&raw[..raw.len() - 1], 1),
        Some('m') => (&raw[..raw.len() - 1], 60),
        Some('h') => (&raw[..raw.len() - 1], 60 * 60),
        Some('d') => (&raw[..raw.len() - 1], 24 * 60 * 60),
        Some(c) if c.is_ascii_digit() => (raw, 1),
        _ => bail!("empty or unrecognised duration"),
    };
    let value = digits
        .trim()
        .parse::<i64>()
        .context("duration must start with a whole number")?;
    if value <= 0 {
        bail!("duration must be positive");
    }
    let secs = value
        .checked_mul(multiplier)
        .context("duration is too large")?;
    if secs > MAX_JWT_EXPIRY_SECS {
        bail!("duration must not exceed 100 years");
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expiry_days() {
        assert_eq!(parse_expiry("7d").unwrap(), 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_parse_expiry_units() {
        assert_eq!(parse_expiry("45s").unwrap(), 45);
        assert_eq!(parse_expiry("30m").unwrap(), 1800);
        assert_eq!(parse_expiry("2h").unwrap(), 7200);
    }

    #[test]
    fn test_parse_expiry_bare_seconds() {
        assert_eq!(parse_expiry("3600").unwrap(), 3600);
    }

    #[test]
    fn test_parse_expiry_rejects_garbage() {
        assert!(parse_expiry("").is_err());
        assert!(parse_expiry("soon").is_err());
        assert!(parse_expiry("7w").is_err());
        assert!(parse_expiry("0d").is_err());
        assert!(parse_expiry("-5m").is_err());
    }

    #[test]
    fn test_parse_expiry_rejects_huge_values() {
        assert!(parse_expiry("9223372036854775807").is_err());
        assert!(parse_expiry("36501d").is_err());
        assert_eq!(parse_expiry("36500d").unwrap(), MAX_JWT_EXPIRY_SECS);
    }

    #[test]
    fn test_memory_store_selection() {
        let config = Config {
            database_url: "memory://".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expiry_secs: 60,
            bcrypt_cost: 4,
            port: 8080,
            rust_log: "info".to_string(),
        };
        assert!(config.uses_memory_store());

        let pg = Config {
            database_url: "postgres://localhost/journal".to_string(),
            ..config
        };
        assert!(!pg.uses_memory_store());
    }
}

use std::env;

use anyhow::{Context, Result, anyhow, bail};
use axum::http::HeaderValue;
use sqlx::postgres::PgConnectOptions;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone)]
pub enum StoreSettings {
    Postgres {
        connect_options: PgConnectOptions,
        max_connections: u32,
    },
    Memory,
}

impl StoreSettings {
    pub fn backend(&self) -> &'static str {
        match self {
            StoreSettings::Postgres { .. } => "postgres",
            StoreSettings::Memory => "memory",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

#[derive(Clone)]
pub struct Settings {
    pub store: StoreSettings,
    pub port: u16,
    pub allowed_origins: AllowedOrigins,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store = match lookup("RECORD_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => StoreSettings::Postgres {
                connect_options: connect_options(&lookup)?,
                max_connections: match lookup("DB_MAX_CONNECTIONS") {
                    Some(raw) => raw
                        .trim()
                        .parse()
                        .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {raw}"))?,
                    None => DEFAULT_MAX_CONNECTIONS,
                },
            },
            Some("memory") => StoreSettings::Memory,
            Some(other) => bail!("unknown RECORD_STORE backend: {other}"),
        };

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let allowed_origins = parse_origins(lookup("CORS_ALLOWED_ORIGINS").as_deref())?;

        Ok(Self {
            store,
            port,
            allowed_origins,
        })
    }
}

/// `DATABASE_URL` wins; otherwise the options are assembled from the `DB_*` parts. Parts are
/// set field by field, so credentials may contain URL delimiters such as `@`, `/` or `:`.
fn connect_options(lookup: &impl Fn(&str) -> Option<String>) -> Result<PgConnectOptions> {
    if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
        return url
            .trim()
            .parse::<PgConnectOptions>()
            .context("DATABASE_URL is not a valid Postgres connection URL");
    }

    let part = |key: &str| {
        lookup(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| anyhow!("{key} env var is missing (or set DATABASE_URL)"))
    };
    let user = part("DB_USER")?;
    let password = part("DB_PASSWORD")?;
    let address = part("DB_URL")?;
    let name = part("DB_NAME")?;

    let options = PgConnectOptions::new()
        .username(&user)
        .password(&password)
        .database(&name);

    let options = match address.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => {
            let port = port
                .parse()
                .with_context(|| format!("DB_URL has an invalid port: {address}"))?;
            options.host(host).port(port)
        }
        _ => options.host(&address),
    };

    Ok(options)
}

fn parse_origins(raw: Option<&str>) -> Result<AllowedOrigins> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty() && *raw != "*") else {
        return Ok(AllowedOrigins::Any);
    };

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid origin in CORS_ALLOWED_ORIGINS: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AllowedOrigins::List(origins))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    fn options_of(settings: &Settings) -> &PgConnectOptions {
        match &settings.store {
            StoreSettings::Postgres {
                connect_options, ..
            } => connect_options,
            StoreSettings::Memory => panic!("expected postgres settings"),
        }
    }

    #[test]
    fn database_url_takes_precedence() {
        let settings = settings(&[
            ("DATABASE_URL", "postgres://reader@direct:6543/db"),
            ("DB_USER", "ignored"),
        ])
        .unwrap();
        let options = options_of(&settings);
        assert_eq!(options.get_host(), "direct");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "reader");
        assert_eq!(options.get_database(), Some("db"));
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.allowed_origins, AllowedOrigins::Any);
    }

    #[test]
    fn url_is_composed_from_parts() {
        let settings = settings(&[
            ("DB_USER", "school"),
            ("DB_PASSWORD", "secret"),
            ("DB_URL", "db.internal:5432"),
            ("DB_NAME", "records"),
        ])
        .unwrap();
        let options = options_of(&settings);
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "school");
        assert_eq!(options.get_database(), Some("records"));
    }

    #[test]
    fn credentials_with_url_delimiters_do_not_shift_the_host() {
        let settings = settings(&[
            ("DB_USER", "ad:min"),
            ("DB_PASSWORD", "p@ss/w:rd"),
            ("DB_URL", "db.internal:6432"),
            ("DB_NAME", "records"),
        ])
        .unwrap();
        let options = options_of(&settings);
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6432);
        assert_eq!(options.get_username(), "ad:min");
        assert_eq!(options.get_database(), Some("records"));
    }

    #[test]
    fn invalid_port_in_address_is_rejected() {
        let err = settings(&[
            ("DB_USER", "school"),
            ("DB_PASSWORD", "secret"),
            ("DB_URL", "db.internal:postgres"),
            ("DB_NAME", "records"),
        ])
        .err()
        .unwrap();
        assert!(err.to_string().contains("invalid port"));
    }

    #[test]
    fn missing_part_is_named() {
        let err = settings(&[("DB_USER", "school"), ("DB_PASSWORD", "secret")])
            .err()
            .unwrap();
        assert!(err.to_string().contains("DB_URL"));
    }

    #[test]
    fn memory_backend_needs_no_database() {
        let settings = settings(&[("RECORD_STORE", "memory"), ("PORT", "8081")]).unwrap();
        assert_eq!(settings.store.backend(), "memory");
        assert_eq!(settings.port, 8081);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(settings(&[("RECORD_STORE", "mongo")]).is_err());
    }

    #[test]
    fn origins_list_is_split_on_commas() {
        let settings = settings(&[
            ("RECORD_STORE", "memory"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert_eq!(
            settings.allowed_origins,
            AllowedOrigins::List(vec![
                HeaderValue::from_static("https://a.example"),
                HeaderValue::from_static("https://b.example"),
            ])
        );
    }

    #[test]
    fn star_means_any_origin() {
        let settings = settings(&[("RECORD_STORE", "memory"), ("CORS_ALLOWED_ORIGINS", "*")])
            .unwrap();
        assert_eq!(settings.allowed_origins, AllowedOrigins::Any);
    }
}

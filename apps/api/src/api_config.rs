use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use confide_core::AppError;
use tracing_subscriber::EnvFilter;

const MIN_JWT_SECRET_LENGTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub storage_backend: StorageBackend,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    pub api_host: String,
    pub api_port: u16,
    pub rate_limit_sweep_seconds: u64,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    pub fn from_lookup(
        migrate_only: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let storage_backend = match optional("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_owned())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => StorageBackend::Postgres {
                database_url: optional("DATABASE_URL").ok_or_else(|| {
                    AppError::Validation(
                        "DATABASE_URL is required when STORAGE_BACKEND is 'postgres'".to_owned(),
                    )
                })?,
                max_connections: parse_or_default(
                    "DATABASE_MAX_CONNECTIONS",
                    optional("DATABASE_MAX_CONNECTIONS"),
                    10,
                )?,
            },
            "memory" => StorageBackend::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "STORAGE_BACKEND must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        if migrate_only && storage_backend == StorageBackend::Memory {
            return Err(AppError::Validation(
                "the migrate command requires STORAGE_BACKEND=postgres".to_owned(),
            ));
        }

        let jwt_secret = optional("JWT_SECRET")
            .ok_or_else(|| AppError::Validation("JWT_SECRET is required".to_owned()))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::Validation(format!(
                "JWT_SECRET must be at least {MIN_JWT_SECRET_LENGTH} characters"
            )));
        }

        let cors_origins = optional("CORS_ORIGIN")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let api_host = optional("API_HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let api_port = parse_or_default(
            "API_PORT",
            optional("API_PORT").or_else(|| optional("PORT")),
            3000,
        )?;
        let rate_limit_sweep_seconds = parse_or_default(
            "RATE_LIMIT_SWEEP_SECONDS",
            optional("RATE_LIMIT_SWEEP_SECONDS"),
            300,
        )?;

        Ok(Self {
            migrate_only,
            storage_backend,
            jwt_secret,
            cors_origins,
            api_host,
            api_port,
            rate_limit_sweep_seconds,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_or_default<T>(name: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use confide_core::AppError;

    use super::{ApiConfig, StorageBackend};

    fn load(migrate_only: bool, pairs: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(migrate_only, |name| values.get(name).cloned())
    }

    const SECRET: (&str, &str) = ("JWT_SECRET", "a-long-enough-secret");

    #[test]
    fn memory_backend_uses_defaults() {
        let config = load(false, &[("STORAGE_BACKEND", "memory"), SECRET])
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.api_port, 3000);
        assert_eq!(config.rate_limit_sweep_seconds, 300);
        assert_eq!(
            config
                .socket_address()
                .map(|address| address.to_string())
                .unwrap_or_default(),
            "0.0.0.0:3000"
        );
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let result = load(false, &[SECRET]);
        assert!(matches!(result, Err(AppError::Validation(_))));

        let config = load(
            false,
            &[
                ("DATABASE_URL", "postgres://localhost/confide"),
                ("DATABASE_MAX_CONNECTIONS", "4"),
                SECRET,
            ],
        )
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(
            config.storage_backend,
            StorageBackend::Postgres {
                database_url: "postgres://localhost/confide".to_owned(),
                max_connections: 4,
            }
        );
    }

    #[test]
    fn short_or_missing_jwt_secret_is_rejected() {
        assert!(load(false, &[("STORAGE_BACKEND", "memory")]).is_err());
        assert!(load(false, &[("STORAGE_BACKEND", "memory"), ("JWT_SECRET", "short")]).is_err());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(
            false,
            &[
                ("STORAGE_BACKEND", "memory"),
                ("CORS_ORIGIN", " https://app.example.com , ,http://localhost:5173"),
                SECRET,
            ],
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            config.cors_origins,
            ["https://app.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn port_falls_back_to_platform_variable() {
        let config = load(
            false,
            &[("STORAGE_BACKEND", "memory"), ("PORT", "8080"), SECRET],
        )
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.api_port, 8080);

        let config = load(
            false,
            &[
                ("STORAGE_BACKEND", "memory"),
                ("API_PORT", "9000"),
                ("PORT", "8080"),
                SECRET,
            ],
        )
        .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.api_port, 9000);
    }

    #[test]
    fn migrate_requires_postgres() {
        let result = load(true, &[("STORAGE_BACKEND", "memory"), SECRET]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let result = load(false, &[("STORAGE_BACKEND", "sqlite"), SECRET]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

use std::env;

const PRODUCTION_ENV: &str = "production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub app_env: String,
    pub cors_allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "lumen-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case(PRODUCTION_ENV)
    }

    /// Reads `APP_ENV` directly, for code paths that have no `Config` at hand
    /// (error rendering).
    pub fn app_env_is_production() -> bool {
        env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case(PRODUCTION_ENV))
            .unwrap_or(false)
    }

    /// Validate that production-critical configuration is set
    /// Panics if the database still points at the local default
    pub fn validate_for_production(&self) {
        if !self.is_production() {
            return;
        }

        if self.mongo_conn_string == "mongodb://localhost:27017" {
            panic!(
                "FATAL: MONGO_CONN_STRING is using the local default in production! Set MONGO_CONN_STRING."
            );
        }

        if self.mongo_db_name == "lumen-local" {
            panic!("FATAL: MONGO_DB_NAME is using the local default in production! Set MONGO_DB_NAME.");
        }
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "lumen-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            app_env: "test".to_string(),
            cors_allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.web_server_port > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_conn_string, "mongodb://localhost:27017");
        assert_eq!(config.mongo_db_name, "lumen-test");
        assert!(!config.is_production());
    }

    #[test]
    fn test_is_production_is_case_insensitive() {
        let mut config = Config::test_config();
        config.app_env = "Production".to_string();
        assert!(config.is_production());
    }

    #[test]
    #[should_panic(expected = "MONGO_CONN_STRING")]
    fn test_validate_for_production_rejects_local_database() {
        let mut config = Config::test_config();
        config.app_env = "production".to_string();
        config.validate_for_production();
    }
}

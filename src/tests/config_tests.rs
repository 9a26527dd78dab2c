#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::NamedTempFile;

    use crate::config::{self, AppConfig, MIN_JWT_SECRET_LEN};
    use crate::tests::common::TEST_SECRET;

    fn write_temp_config(content: &str) -> NamedTempFile {
        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        fs::write(temp_file.path(), content).unwrap();
        temp_file
    }

    fn valid_config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.auth.jwt_secret = TEST_SECRET.to_string();
        cfg
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite://data/vitrine.db");
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.uploads.dir, "uploads");
        assert_eq!(config.uploads.max_file_size, 5 * 1024 * 1024);
        assert!(config.uploads.allowed_extensions.iter().any(|e| e == "png"));
        assert!(!config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_defaults_alone_do_not_validate() {
        // No secret ships with the defaults
        let err = config::validate(&AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("jwt_secret"));
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut cfg = valid_config();
        cfg.auth.jwt_secret = "x".repeat(MIN_JWT_SECRET_LEN - 1);
        assert!(config::validate(&cfg).is_err());
        cfg.auth.jwt_secret = "x".repeat(MIN_JWT_SECRET_LEN);
        assert!(config::validate(&cfg).is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut cfg = valid_config();
        cfg.server.port = 0;
        assert!(config::validate(&cfg).unwrap_err().to_string().contains("invalid server.port"));

        let mut cfg = valid_config();
        cfg.auth.token_ttl_hours = 0;
        assert!(config::validate(&cfg).is_err());

        let mut cfg = valid_config();
        cfg.database.max_connections = 0;
        assert!(config::validate(&cfg).is_err());

        let mut cfg = valid_config();
        cfg.uploads.allowed_extensions.clear();
        assert!(config::validate(&cfg).is_err());

        let mut cfg = valid_config();
        cfg.uploads.max_file_size = 0;
        assert!(config::validate(&cfg).is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let file = write_temp_config(&format!(
            r#"
[auth]
jwt_secret = "{TEST_SECRET}"
token_ttl_hours = 2

[uploads]
dir = "media"
"#
        ));

        let cfg = config::load_from(file.path().to_str()).unwrap();
        assert_eq!(cfg.auth.token_ttl_hours, 2);
        assert_eq!(cfg.uploads.dir, "media");
        // Untouched keys keep their defaults
        assert_eq!(cfg.uploads.max_file_size, 5 * 1024 * 1024);
        assert_eq!(cfg.auth.admin_password, "admin123");
    }

    #[test]
    fn test_ensure_sqlite_parent_dir_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("vitrine.db");
        let url = format!("sqlite://{}", db_path.display());

        config::ensure_sqlite_parent_dir(&url).unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}

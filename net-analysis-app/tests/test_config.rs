#[cfg(test)]
mod config_tests {
    use net_analysis_app::config::*;
    use net_analysis_app::{AppError, Config};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const FULL: &str = r#"
mcp:
  name: AI-MCP-NET-ANALYSIS
  version: 1.0.0
  description: Network analysis server
logging:
  name: net-analysis
  level: DEBUG
  type: file
  console:
    enabled: true
    format: "%(levelname)s %(message)s"
  file:
    enabled: true
    path: /var/log/net-analysis/server.log
    max_size_mb: 20
    backup_count: 3
    format: "%(asctime)s %(message)s"
scanner:
  binary: /usr/local/bin/nmap
  exec_timeout_s: 300
"#;

    const MINIMAL: &str = r#"
mcp:
  name: AI-MCP-NET-ANALYSIS
  version: 1.0.0
  description: Network analysis server
logging:
  name: net-analysis
  level: INFO
  type: file
  file:
    enabled: true
"#;

    fn assert_invalid(yaml: &str, needle: &str) {
        match Config::from_yaml(yaml) {
            Err(AppError::ConfigInvalid(msg)) => {
                assert!(msg.contains(needle), "`{}` does not mention `{}`", msg, needle)
            }
            Err(other) => panic!("Expected ConfigInvalid, got {:?}", other),
            Ok(_) => panic!("Expected ConfigInvalid for:\n{}", yaml),
        }
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_yaml(FULL).unwrap();

        assert_eq!(config.mcp.name, "AI-MCP-NET-ANALYSIS");
        assert_eq!(config.mcp.version, "1.0.0");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.kind, LoggerKind::File);
        assert!(config.logging.console_enabled());
        assert_eq!(config.logging.console_format(), "%(levelname)s %(message)s");
        assert_eq!(
            config.logging.file_path(),
            PathBuf::from("/var/log/net-analysis/server.log")
        );
        assert_eq!(config.logging.file.max_bytes(), 20 * 1024 * 1024);
        assert_eq!(config.logging.file.backup_count, 3);
        assert_eq!(config.logging.file_format(), "%(asctime)s %(message)s");
        assert_eq!(config.scanner.binary, "/usr/local/bin/nmap");
        assert_eq!(config.scanner.exec_timeout().as_secs(), 300);
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml(MINIMAL).unwrap();

        assert!(!config.logging.console_enabled());
        assert_eq!(config.logging.file.max_size_mb, DEFAULT_MAX_SIZE_MB);
        assert_eq!(config.logging.file.backup_count, DEFAULT_BACKUP_COUNT);
        assert_eq!(config.logging.file_format(), DEFAULT_LOG_FORMAT);
        assert_eq!(config.logging.console_format(), DEFAULT_LOG_FORMAT);
        assert_eq!(
            config.logging.file_path(),
            Path::new("logs").join("net-analysis.log")
        );
        assert_eq!(config.scanner.binary, "nmap");
        assert_eq!(config.scanner.exec_timeout().as_secs(), 60);
    }

    #[test]
    fn test_every_level_name() {
        for (name, level) in [
            ("DEBUG", LogLevel::Debug),
            ("INFO", LogLevel::Info),
            ("WARNING", LogLevel::Warning),
            ("ERROR", LogLevel::Error),
            ("CRITICAL", LogLevel::Critical),
        ] {
            let config = Config::from_yaml(&MINIMAL.replace("INFO", name)).unwrap();
            assert_eq!(config.logging.level, level);
        }
        assert_invalid(&MINIMAL.replace("INFO", "info"), "Invalid YAML");
        assert_invalid(&MINIMAL.replace("INFO", "TRACE"), "Invalid YAML");
    }

    #[test]
    fn test_schema_violations() {
        assert_invalid(&MINIMAL.replace("type: file", "type: syslog"), "Invalid YAML");
        assert_invalid(&format!("{}extra: 1\n", MINIMAL), "extra");
        assert_invalid(
            &MINIMAL.replace("    enabled: true", "    enabled: true\n    rotate: daily"),
            "rotate",
        );
        assert_invalid(&MINIMAL.replace("  version: 1.0.0\n", ""), "version");
        assert_invalid(
            &MINIMAL.replace("    enabled: true", "    enabled: true\n    max_size_mb: 0"),
            "max_size_mb",
        );
        assert_invalid(
            &MINIMAL.replace("    enabled: true", "    enabled: true\n    backup_count: -1"),
            "Invalid YAML",
        );
        assert_invalid(
            &MINIMAL.replace("    enabled: true", "    enabled: true\n    format: \"\""),
            "logging.file.format",
        );
        assert_invalid(
            &MINIMAL.replace("    enabled: true", "    enabled: true\n    path: \"\""),
            "logging.file.path",
        );
        assert_invalid(
            &MINIMAL.replace("  type: file", "  type: file\n  console:\n    enabled: true\n    format: \" \""),
            "logging.console.format",
        );
        assert_invalid(&MINIMAL.replace("name: net-analysis", "name: \"\""), "logging.name");
    }

    #[test]
    fn test_scanner_timeout_is_validated() {
        let yaml = format!("{}scanner:\n  exec_timeout_s: 0\n", MINIMAL);
        assert_invalid(&yaml, "scanner.exec_timeout_s");

        let yaml = format!("{}scanner:\n  exec_timeout_s: 3601\n", MINIMAL);
        assert_invalid(&yaml, "between 1s and 3600s");

        let yaml = format!("{}scanner:\n  binary: \"\"\n", MINIMAL);
        assert_invalid(&yaml, "scanner.binary");
    }

    #[test]
    fn test_empty_and_malformed() {
        assert_invalid("", "empty");
        assert_invalid("   \n\n", "empty");
        assert_invalid("mcp: [unclosed", "Invalid YAML");
        assert_invalid("- just\n- a list\n", "Invalid YAML");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, FULL).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.name, "net-analysis");
    }

    #[test]
    fn test_missing_file() {
        match Config::load("/nonexistent/config.yaml") {
            Err(AppError::ConfigInvalid(msg)) => assert!(msg.contains("Config file not found")),
            other => panic!("Expected ConfigInvalid, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config/config.yaml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.logging.kind, LoggerKind::File);
        assert!(config.logging.file.enabled);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = Config::resolve_path(Some(PathBuf::from("custom.yaml")));
        assert_eq!(path, PathBuf::from("custom.yaml"));
    }
}

// The factory holds process-wide state, so everything runs in one test.
#[cfg(test)]
mod logger_factory_tests {
    use net_analysis_app::{AppError, Config, LoggerFactory};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn config(dir: &std::path::Path, name: &str) -> Config {
        Config::from_yaml(&format!(
            r#"
mcp:
  name: test
  version: 0.0.1
  description: test server
logging:
  name: {name}
  level: INFO
  type: file
  file:
    enabled: true
    path: {path}
"#,
            name = name,
            path = dir.join(format!("{}.log", name)).display(),
        ))
        .unwrap()
    }

    #[test]
    fn test_factory_builds_once() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            LoggerFactory::get(None),
            Err(AppError::LoggerNotConfigured)
        ));

        let first = LoggerFactory::get(Some(&config(dir.path(), "first"))).unwrap();
        assert_eq!(first.name(), "first");

        let again = LoggerFactory::get(None).unwrap();
        assert!(Arc::ptr_eq(&first, &again));

        let other = LoggerFactory::get(Some(&config(dir.path(), "second"))).unwrap();
        assert!(Arc::ptr_eq(&first, &other));
        assert!(!dir.path().join("second.log").exists());

        first.info("logged once");
        first.shutdown();
        let content = std::fs::read_to_string(dir.path().join("first.log")).unwrap();
        assert!(content.contains("first - INFO - logged once"));
    }
}

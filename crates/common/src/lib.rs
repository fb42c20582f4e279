pub mod types;
pub mod utils;
pub mod env;
pub mod uptime;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_database_indicator() {
        let h = types::Health {
            status: "OK".into(),
            environment: "test".into(),
            timestamp: "2024-01-01T00:00:00Z".into(),
            database: types::DatabaseIndicator::from_configured(false).as_str().into(),
            uptime: 1.5,
        };
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["status"], "OK");
        assert_eq!(v["database"], "Disconnected");
        assert_eq!(v["uptime"], 1.5);
    }

    #[test]
    fn info_omits_missing_author() {
        let info = types::Info {
            app: "app".into(),
            version: "1.0.0".into(),
            environment: "development".into(),
            author: None,
        };
        let v = serde_json::to_value(&info).unwrap();
        assert!(v.get("author").is_none());
        assert_eq!(v["app"], "app");
    }
}

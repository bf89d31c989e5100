use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "CliniCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/CliniCare/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("CliniCare")
}

/// Database file path. `CLINICCARE_DB` overrides (used in dev and
/// container deployments).
pub fn database_path() -> PathBuf {
    match std::env::var("CLINICCARE_DB") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_data_dir().join("cliniccare.db"),
    }
}

/// Address the HTTP server binds to. `CLINICCARE_ADDR` overrides.
pub fn bind_addr() -> SocketAddr {
    std::env::var("CLINICCARE_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080)))
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "cliniccare=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("CliniCare"));
    }

    #[test]
    fn app_name_is_cliniccare() {
        assert_eq!(APP_NAME, "CliniCare");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn default_bind_addr_is_loopback() {
        let addr = bind_addr();
        assert!(addr.ip().is_loopback() || std::env::var("CLINICCARE_ADDR").is_ok());
    }
}

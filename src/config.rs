use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Sturzdoku";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display limit for the narrative counter. Not enforced by truncation.
pub const MAX_NARRATIVE_LENGTH: usize = 5000;

/// Port the mobile client expects the backend on.
pub const DEFAULT_PORT: u16 = 4000;

const DEFAULT_FACILITY_NAME: &str = "Sturzdoku Care Facility";
const DEFAULT_FACILITY_ADDRESS: &str = "Address not configured";

/// Care facility identity printed on every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub name: String,
    pub address: String,
}

impl Facility {
    /// Single-line form used inside the report's facility field.
    pub fn display(&self) -> String {
        format!("{}, {}", self.name, self.address)
    }
}

/// Get the application data directory.
/// `$STURZDOKU_DATA_DIR` when set, otherwise ~/Sturzdoku/.
/// Falls back to the working directory when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = env_non_empty("STURZDOKU_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Directory generated PDF reports are written to and served from.
pub fn reports_dir() -> PathBuf {
    app_data_dir().join("public").join("reports")
}

/// SQLite database holding residents and incident reports.
pub fn database_path() -> PathBuf {
    app_data_dir().join("database").join("sturzdoku.db")
}

/// Listen address: `$STURZDOKU_BIND` if it parses, else 0.0.0.0:4000.
pub fn bind_addr() -> SocketAddr {
    env_non_empty("STURZDOKU_BIND")
        .and_then(|raw| match raw.parse::<SocketAddr>() {
            Ok(addr) => Some(addr),
            Err(e) => {
                tracing::warn!(value = %raw, "Ignoring invalid STURZDOKU_BIND: {e}");
                None
            }
        })
        .unwrap_or(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT))
}

/// Facility identity from the environment, with placeholders.
pub fn facility() -> Facility {
    Facility {
        name: env_non_empty("STURZDOKU_FACILITY_NAME")
            .unwrap_or_else(|| DEFAULT_FACILITY_NAME.to_string()),
        address: env_non_empty("STURZDOKU_FACILITY_ADDRESS")
            .unwrap_or_else(|| DEFAULT_FACILITY_ADDRESS.to_string()),
    }
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "sturzdoku=info,sturzdoku_lib=info,tower_http=info"
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

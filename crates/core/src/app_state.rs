use directories::ProjectDirs;

/// Qualifier/organization/application triple passed to
/// `directories::ProjectDirs` for platform data-dir resolution.
const QUALIFIER: &str = "";
const ORGANIZATION: &str = "picomc";
const APPLICATION: &str = "picomc";

/// Application root directory resolution.
///
/// Stateless: every call resolves the platform data directory fresh from
/// `directories::ProjectDirs`, so there is no global to initialize first and
/// nothing for callers to get wrong by calling methods out of order.
pub struct AppState;

impl AppState {
    /// Application root directory (the on-disk layout root: `instances/`,
    /// `versions/`, `libraries/`, `assets/`), honoring the `PICOMC_ROOT`
    /// override before falling back to the platform data directory.
    pub fn app_root() -> std::path::PathBuf {
        if let Ok(root) = std::env::var("PICOMC_ROOT") {
            return std::path::PathBuf::from(root);
        }
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join(APPLICATION))
    }

    /// Constant launcher identifier substituted into `launcher_name`.
    pub fn get_app_name() -> &'static str {
        crate::LAUNCHER_NAME
    }

    /// Constant launcher version substituted into `launcher_version`.
    pub fn get_app_version() -> &'static str {
        crate::LAUNCHER_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn honors_picomc_root_override() {
        std::env::set_var("PICOMC_ROOT", "/tmp/picomc-test-root");
        assert_eq!(
            AppState::app_root(),
            std::path::PathBuf::from("/tmp/picomc-test-root")
        );
        std::env::remove_var("PICOMC_ROOT");
    }

    #[test]
    fn app_root_never_panics_without_picomc_root() {
        std::env::remove_var("PICOMC_ROOT");
        let _ = AppState::app_root();
    }
}

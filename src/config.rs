//! Startup configuration.
//!
//! Only the dataset location is configurable: the first argument, else
//! `SPECTRA_DATASET`, else `ASD_Data.csv` in the working directory. Logging is
//! configured separately through `RUST_LOG`.

use std::path::PathBuf;

use clap::Parser;

/// Environment variable naming the dataset when no argument is given.
pub const DATASET_ENV: &str = "SPECTRA_DATASET";

/// File looked for in the working directory by default.
pub const DEFAULT_DATASET: &str = "ASD_Data.csv";

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "spectra-dashboard",
    version,
    about = "Explore healthy vs stressed crop spectral signatures"
)]
pub struct AppConfig {
    /// ';'-separated reflectance export (comma decimals, first row headers).
    #[arg(env = DATASET_ENV, default_value = DEFAULT_DATASET)]
    pub dataset_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self::parse();
        log::info!("Dataset path: {}", config.dataset_path.display());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_argument_sets_path() {
        let cfg = AppConfig::try_parse_from(["spectra-dashboard", "data/field_2024.csv"]).unwrap();
        assert_eq!(cfg.dataset_path, PathBuf::from("data/field_2024.csv"));
    }

    // The only test touching SPECTRA_DATASET, so no other test races on it.
    #[test]
    fn env_then_default_when_no_argument() {
        std::env::remove_var(DATASET_ENV);
        let cfg = AppConfig::try_parse_from(["spectra-dashboard"]).unwrap();
        assert_eq!(cfg.dataset_path, PathBuf::from(DEFAULT_DATASET));

        std::env::set_var(DATASET_ENV, "field/from_env.csv");
        let from_env = AppConfig::try_parse_from(["spectra-dashboard"]);
        let with_arg = AppConfig::try_parse_from(["spectra-dashboard", "arg.csv"]);
        std::env::remove_var(DATASET_ENV);

        assert_eq!(from_env.unwrap().dataset_path, PathBuf::from("field/from_env.csv"));
        assert_eq!(with_arg.unwrap().dataset_path, PathBuf::from("arg.csv"));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(AppConfig::try_parse_from(["spectra-dashboard", "a.csv", "b.csv"]).is_err());
    }
}

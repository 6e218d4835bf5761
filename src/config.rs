use std::{
    env,
    path::{Path, PathBuf},
};

use config::{Config, ConfigError, File, FileFormat};

/// Read hierarchical configuration (system -> local override)
///
/// System-wide settings live in `$XDG_CONFIG_HOME/perf-bench-report/config.toml`
/// (or `~/.config/...`); a `.perfreportconfig` found in the current directory
/// or any parent overrides them.
pub fn read_hierarchical_config() -> Result<Config, ConfigError> {
    let mut builder = Config::builder();

    if let Some(system_config_path) = system_config_path() {
        builder = builder.add_source(
            File::from(system_config_path)
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    if let Some(local_path) = find_local_config_path() {
        builder = builder.add_source(
            File::from(local_path)
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    builder.build()
}

fn system_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
        return Some(
            Path::new(&xdg_config_home)
                .join("perf-bench-report")
                .join("config.toml"),
        );
    }
    dirs_next::home_dir().map(|home| {
        home.join(".config")
            .join("perf-bench-report")
            .join("config.toml")
    })
}

fn find_local_config_path() -> Option<PathBuf> {
    if let Ok(mut current_dir) = env::current_dir() {
        loop {
            let candidate = current_dir.join(".perfreportconfig");
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current_dir.pop() {
                break;
            }
        }
    }
    None
}

/// Configured report title, if any.
pub fn report_title() -> Option<String> {
    read_config_string("report.title")
}

/// Configured number of fractional digits for formatted statistics.
pub fn report_sig_figs() -> Option<u8> {
    let config = read_config_or_log()?;
    match config.get_int("report.sig_figs") {
        Ok(v) => u8::try_from(v)
            .map_err(|_| {
                log::warn!("Ignoring out-of-range report.sig_figs value: {}", v);
            })
            .ok(),
        Err(_) => None,
    }
}

/// Configured base directory the report folder is created in.
pub fn report_dir() -> Option<PathBuf> {
    read_config_string("report.directory").map(PathBuf::from)
}

fn read_config_string(key: &str) -> Option<String> {
    read_config_or_log()?.get_string(key).ok()
}

fn read_config_or_log() -> Option<Config> {
    match read_hierarchical_config() {
        Ok(config) => Some(config),
        Err(e) => {
            // Expected when no config exists anywhere.
            log::debug!("Could not read hierarchical config: {}", e);
            None
        }
    }
}

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
mod asset_keys;

pub use app::{
    run_app, Applet, AppError, Device, DrawCommand, KeyPad, KeyPadEvent, LogicalKey, LoopConfig,
    MenuEvent, MenuWidget, PlacedMenu, Rect, Renderer, Scheduler, Screen, Vec2,
};
pub use asset_keys::{validate_asset_key, AssetKeyError};

pub const ROOT_ENV_VAR: &str = "HAMLET_BREW_ROOT";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub sprite_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error(
        "HAMLET_BREW_ROOT is set but does not point to a valid project root: {path}\n\
A valid root must contain Cargo.toml and either crates/ or assets/."
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "Could not detect project root by walking upward from executable directory: {start_dir}\n\
Expected a directory containing Cargo.toml and either crates/ or assets/.\n\
Set {env_var} explicitly, for example:\n\
export {env_var}=\"/path/to/hamlet-brew\""
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    Ok(app_paths_for_root(root))
}

fn app_paths_for_root(root: PathBuf) -> AppPaths {
    let sprite_dir = root.join("assets").join("sprites");
    AppPaths { root, sprite_dir }
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => validate_env_root(Path::new(&value)),
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;
            find_root_above(&exe_dir).ok_or_else(|| StartupError::RootNotFound {
                start_dir: normalize_path(&exe_dir),
                env_var: ROOT_ENV_VAR,
            })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn validate_env_root(raw: &Path) -> Result<PathBuf, StartupError> {
    let normalized = normalize_path(raw);
    if is_repo_marker(&normalized) {
        Ok(normalized)
    } else {
        Err(StartupError::InvalidEnvRoot { path: normalized })
    }
}

fn find_root_above(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find(|candidate| is_repo_marker(candidate))
        .map(normalize_path)
}

fn is_repo_marker(path: &Path) -> bool {
    let cargo_toml = path.join("Cargo.toml").is_file();
    let has_crates = path.join("crates").is_dir();
    let has_assets = path.join("assets").is_dir();

    cargo_toml && (has_crates || has_assets)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
mod asset_keys;

pub use app::{
    run_app, run_fixed_timestep, AppError, Clock, FixedTimestep, FontSize, Graphics, InputState,
    Key, LoopConfig, LoopControl, LoopCounters, LoopDriver, LoopReport, LoopSummary, MouseButton,
    Point, Rect, ResourceLoadError, Rgba, Scene, SceneCommand, SceneError, SystemClock, TextStyle,
    Texture, TextureId, TextureStore, TimestepConfig, MOUSE_BUTTON_COUNT, TPS_ENV_VAR,
};
pub use asset_keys::AssetKeyError;

pub const ROOT_ENV_VAR: &str = "TANK_ROOT";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub levels_dir: PathBuf,
    pub asset_root: PathBuf,
}

impl AppPaths {
    pub fn from_root(root: PathBuf) -> Self {
        let levels_dir = root.join("levels");
        let asset_root = root.clone();
        Self {
            root,
            levels_dir,
            asset_root,
        }
    }
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
        "TANK_ROOT is set but does not point to a valid game root: {path}\n\
A valid root must contain Cargo.toml and either levels/ or res/."
    )]
    InvalidEnvRoot { path: PathBuf },
    #[error(
        "Could not detect game root by walking upward from executable directory: {start_dir}\n\
Expected a directory containing Cargo.toml and either levels/ or res/.\n\
Set {env_var} explicitly, for example:\n\
Bash/zsh: export {env_var}=\"/path/to/tank-game\""
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    resolve_root().map(AppPaths::from_root)
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let normalized = normalize_path(&PathBuf::from(value));
            if is_root_marker(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot { path: normalized })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;

            exe_dir
                .ancestors()
                .find(|candidate| is_root_marker(candidate))
                .map(normalize_path)
                .ok_or_else(|| StartupError::RootNotFound {
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

fn is_root_marker(path: &Path) -> bool {
    let cargo_toml = path.join("Cargo.toml").is_file();
    let has_levels = path.join("levels").is_dir();
    let has_assets = path.join("res").is_dir();

    cargo_toml && (has_levels || has_assets)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn root_marker_requires_cargo_toml() {
        let temp = TempDir::new().expect("temp");
        fs::create_dir_all(temp.path().join("levels")).expect("mkdir");
        assert!(!is_root_marker(temp.path()));

        fs::write(temp.path().join("Cargo.toml"), "[workspace]\n").expect("write");
        assert!(is_root_marker(temp.path()));
    }

    #[test]
    fn root_marker_accepts_assets_without_levels() {
        let temp = TempDir::new().expect("temp");
        fs::write(temp.path().join("Cargo.toml"), "[workspace]\n").expect("write");
        fs::create_dir_all(temp.path().join("res")).expect("mkdir");
        assert!(is_root_marker(temp.path()));
    }

    #[test]
    fn app_paths_derive_levels_dir_from_root() {
        let paths = AppPaths::from_root(PathBuf::from("/games/tank"));
        assert_eq!(paths.levels_dir, PathBuf::from("/games/tank/levels"));
        assert_eq!(paths.asset_root, PathBuf::from("/games/tank"));
    }
}

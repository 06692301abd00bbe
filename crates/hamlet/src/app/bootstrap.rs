use std::env;
use std::path::PathBuf;

use brew::{Applet, LoopConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::capture::{CaptureHarness, CueScript, CueScriptError};
use super::story::NarrativeEngine;

const WINDOW_SCALE_ENV_VAR: &str = "HAMLET_BREW_WINDOW_SCALE";
const CAPTURE_ENV_VAR: &str = "HAMLET_BREW_CAPTURE";
const CUES_ENV_VAR: &str = "HAMLET_BREW_CUES";
const MAX_WINDOW_SCALE: u32 = 8;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) applet: Box<dyn Applet>,
}

pub(crate) fn build_app() -> Result<AppWiring, CueScriptError> {
    init_tracing();
    info!("=== Hamlet Brew Startup ===");

    let defaults = LoopConfig::default();
    let window_scale = parse_window_scale(
        env::var(WINDOW_SCALE_ENV_VAR).ok().as_deref(),
        defaults.window_scale,
    );
    let config = LoopConfig {
        window_scale,
        ..defaults
    };

    let engine = NarrativeEngine::new();
    let applet: Box<dyn Applet> = if parse_flag(env::var(CAPTURE_ENV_VAR).ok().as_deref()) {
        let script = match env::var_os(CUES_ENV_VAR).map(PathBuf::from) {
            Some(path) => {
                info!(path = %path.display(), "capture_script_loading");
                CueScript::load(&path)?
            }
            None => CueScript::default(),
        };
        Box::new(CaptureHarness::new(engine, script))
    } else {
        Box::new(engine)
    };

    Ok(AppWiring { config, applet })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn parse_window_scale(raw: Option<&str>, fallback: u32) -> u32 {
    let Some(raw) = raw else {
        return fallback;
    };
    match raw.trim().parse::<u32>() {
        Ok(scale) if (1..=MAX_WINDOW_SCALE).contains(&scale) => scale,
        _ => {
            warn!(
                var = WINDOW_SCALE_ENV_VAR,
                value = raw,
                fallback,
                "invalid_window_scale_using_default"
            );
            fallback
        }
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    raw.map(|value| {
        matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
    .unwrap_or(false)
}

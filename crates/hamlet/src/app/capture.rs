use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use brew::{Applet, KeyPad, LogicalKey, Screen};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::story::NarrativeEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CueAction {
    Key(LogicalKey),
    ResetToChoices,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Cue {
    pub(crate) label: String,
    pub(crate) action: CueAction,
}

impl Cue {
    fn key(label: &str, key: LogicalKey) -> Self {
        Self {
            label: label.to_string(),
            action: CueAction::Key(key),
        }
    }

    fn reset(label: &str) -> Self {
        Self {
            label: label.to_string(),
            action: CueAction::ResetToChoices,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum CueScriptError {
    #[error("failed to read cue script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse cue script {path} at {json_path}: {source}")]
    Parse {
        path: PathBuf,
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("cue script {path} has no cues")]
    Empty { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CueScript {
    cues: Vec<Cue>,
    next_index: usize,
}

impl Default for CueScript {
    fn default() -> Self {
        Self::from_cues(vec![
            Cue::key("Press 1 for outdoor", LogicalKey::Num1),
            Cue::key("Press 2 for outdoor", LogicalKey::Num2),
            Cue::key("Press 3 for outdoor", LogicalKey::Num3),
            Cue::key("Press 4 for wall", LogicalKey::Num4),
            Cue::key("Press 5 for wall", LogicalKey::Num5),
            Cue::key("Press 6 for wall", LogicalKey::Num6),
            Cue::key("Press OK for Polonius", LogicalKey::Ok),
            Cue::reset("Reset for Kenny"),
            Cue::key("Press Down for Kenny", LogicalKey::ArrowDown),
            Cue::key("Press OK for Kenny", LogicalKey::Ok),
            Cue::reset("Reset for Splinter"),
            Cue::key("Press Down to Kenny for Splinter", LogicalKey::ArrowDown),
            Cue::key("Press Down for Splinter", LogicalKey::ArrowDown),
            Cue::key("Press OK for Splinter", LogicalKey::Ok),
        ])
    }
}

impl CueScript {
    pub(crate) fn from_cues(cues: Vec<Cue>) -> Self {
        Self {
            cues,
            next_index: 0,
        }
    }

    pub(crate) fn load(path: &Path) -> Result<Self, CueScriptError> {
        let raw = fs::read_to_string(path).map_err(|source| CueScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, CueScriptError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let cues: Vec<Cue> = serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
            let json_path = error.path().to_string();
            CueScriptError::Parse {
                path: path.to_path_buf(),
                json_path,
                source: error.into_inner(),
            }
        })?;
        if cues.is_empty() {
            return Err(CueScriptError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::from_cues(cues))
    }

    pub(crate) fn len(&self) -> usize {
        self.cues.len()
    }

    pub(crate) fn peek(&self) -> Option<&Cue> {
        self.cues.get(self.next_index)
    }

    pub(crate) fn take_next(&mut self) -> Option<Cue> {
        let cue = self.cues.get(self.next_index).cloned()?;
        self.next_index += 1;
        Some(cue)
    }

    pub(crate) fn display_label(&self) -> String {
        match self.peek() {
            Some(cue) => format!("Up Next: {}", cue.label),
            None => "(N/A)".to_string(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct CaptureHarness {
    engine: NarrativeEngine,
    script: CueScript,
}

impl CaptureHarness {
    pub(crate) fn new(engine: NarrativeEngine, script: CueScript) -> Self {
        Self { engine, script }
    }

    #[cfg(test)]
    fn engine(&self) -> &NarrativeEngine {
        &self.engine
    }
}

impl Applet for CaptureHarness {
    fn start(&mut self, screen: &mut Screen) {
        info!(cue_count = self.script.len(), "capture_enabled");
        self.engine.start(screen);
    }

    fn key_pressed(&mut self, key: LogicalKey, screen: &mut Screen) {
        self.engine.handle_key(key, screen);
    }

    fn update(&mut self, dt: Duration, screen: &mut Screen) {
        self.engine.advance(dt, screen);
    }

    fn cue_requested(&mut self, keypad: &mut KeyPad, screen: &mut Screen) {
        let Some(cue) = self.script.take_next() else {
            debug!("capture_script_exhausted");
            return;
        };
        info!(label = %cue.label, action = ?cue.action, "capture_cue_triggered");
        match cue.action {
            CueAction::Key(key) => {
                self.engine.handle_key(key, screen);
                keypad.force_highlight(key);
            }
            CueAction::ResetToChoices => self.engine.force_to_choices(screen),
        }
    }

    fn debug_title(&self) -> Option<String> {
        Some(self.script.display_label())
    }
}

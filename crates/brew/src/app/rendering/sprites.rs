use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use image::ImageReader;
use tracing::warn;

use crate::asset_keys::validate_asset_key;

pub(crate) struct LoadedSprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub(crate) struct SpriteCache {
    sprite_dir: PathBuf,
    sprites: HashMap<String, Option<LoadedSprite>>,
    warned_keys: HashSet<String>,
}

impl SpriteCache {
    pub(crate) fn new(sprite_dir: PathBuf) -> Self {
        Self {
            sprite_dir,
            sprites: HashMap::new(),
            warned_keys: HashSet::new(),
        }
    }

    pub(crate) fn get(&mut self, key: &str) -> Option<&LoadedSprite> {
        self.get_with_missing_policy(key, true)
    }

    pub(crate) fn get_optional(&mut self, key: &str) -> Option<&LoadedSprite> {
        self.get_with_missing_policy(key, false)
    }

    fn get_with_missing_policy(&mut self, key: &str, warn_on_missing: bool) -> Option<&LoadedSprite> {
        if !self.sprites.contains_key(key) {
            let sprite = match resolve_sprite_path(&self.sprite_dir, key) {
                Ok(path) => match load_sprite_rgba(&path) {
                    Ok(sprite) => Some(sprite),
                    Err(reason) => {
                        if warn_on_missing {
                            warn_sprite_load_once(&mut self.warned_keys, key, Some(&path), &reason);
                        }
                        None
                    }
                },
                Err(reason) => {
                    if warn_on_missing {
                        warn_sprite_load_once(&mut self.warned_keys, key, None, &reason);
                    }
                    None
                }
            };
            self.sprites.insert(key.to_string(), sprite);
        }
        self.sprites.get(key).and_then(Option::as_ref)
    }

    #[cfg(test)]
    fn warned_count(&self) -> usize {
        self.warned_keys.len()
    }
}

pub(crate) fn resolve_sprite_path(sprite_dir: &Path, key: &str) -> Result<PathBuf, String> {
    validate_asset_key(key).map_err(|error| format!("invalid_key:{error}"))?;
    Ok(sprite_dir.join(format!("{key}.png")))
}

fn load_sprite_rgba(path: &Path) -> Result<LoadedSprite, String> {
    let reader = ImageReader::open(path).map_err(|error| format!("file_open_failed:{error}"))?;
    let decoded = reader
        .decode()
        .map_err(|error| format!("decode_failed:{error}"))?;
    let image = decoded.to_rgba8();
    Ok(LoadedSprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

fn warn_sprite_load_once(
    warned_keys: &mut HashSet<String>,
    key: &str,
    resolved_path: Option<&Path>,
    reason: &str,
) {
    if !warned_keys.insert(key.to_string()) {
        return;
    }
    let path_display = resolved_path
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<unresolved>".to_string());
    warn!(
        sprite_key = key,
        path = %path_display,
        reason = reason,
        "renderer_sprite_load_failed_using_placeholder"
    );
}

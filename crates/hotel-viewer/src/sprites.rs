//! Sprite sheet discovery and loading.
//!
//! Every image is optional: files are probed on disk first and only the ones
//! present are handed to the `AssetServer`. The renderer falls back to flat
//! shapes for anything missing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use hotel_logic::constants::{assets, guests};
use hotel_logic::render::{AssetCatalog, AssetKey};

#[derive(Resource, Default)]
pub struct SpriteSheets {
    interiors: Option<Handle<Image>>,
    ui: Option<Handle<Image>>,
    characters: HashMap<u32, Handle<Image>>,
}

impl SpriteSheets {
    pub fn handle(&self, key: AssetKey) -> Option<&Handle<Image>> {
        match key {
            AssetKey::Interiors => self.interiors.as_ref(),
            AssetKey::Ui => self.ui.as_ref(),
            AssetKey::Character(id) => self.characters.get(&id),
        }
    }

    pub fn loaded_count(&self) -> usize {
        usize::from(self.interiors.is_some())
            + usize::from(self.ui.is_some())
            + self.characters.len()
    }
}

impl AssetCatalog for SpriteSheets {
    fn has(&self, key: AssetKey) -> bool {
        self.handle(key).is_some()
    }
}

/// Same lookup order the file asset reader uses.
fn asset_root() -> PathBuf {
    let base = if let Ok(dir) = std::env::var("BEVY_ASSET_ROOT") {
        PathBuf::from(dir)
    } else if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        PathBuf::from(dir)
    } else {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_default()
    };
    base.join("assets")
}

fn probe(server: &AssetServer, root: &Path, relative: &str) -> Option<Handle<Image>> {
    if root.join(relative).exists() {
        Some(server.load(relative.to_string()))
    } else {
        warn!("Missing asset {}, using fallback shapes", relative);
        None
    }
}

pub fn load_sprite_sheets(mut commands: Commands, server: Res<AssetServer>) {
    let root = asset_root();
    let mut sheets = SpriteSheets {
        interiors: probe(&server, &root, assets::INTERIORS),
        ui: probe(&server, &root, assets::UI),
        characters: HashMap::new(),
    };
    for id in 1..=guests::CHARACTER_SPRITES {
        if let Some(handle) = probe(&server, &root, &assets::character(id)) {
            sheets.characters.insert(id, handle);
        }
    }

    info!(
        "Loaded {} sprite sheets from {}",
        sheets.loaded_count(),
        root.display()
    );
    commands.insert_resource(sheets);
}

//! The asset index: which sprite/sound/backdrop/widget names exist.
//!
//! Consumed as a lookup service; the editor keeps it in sync with the
//! project's resource files. Lookups are exact-name and advisory — a
//! failed lookup is "not found", never an error.

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

/// The category of a named asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Sprite,
    Sound,
    Backdrop,
    Widget,
    /// Entity-relative: owned by one sprite.
    Costume,
    /// Entity-relative: owned by one sprite.
    Animation,
}

/// An opaque, structured reference to one asset.
///
/// Only produced by [`AssetIndex::lookup`]; never synthesized elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResourceUri(SmolStr);

impl ResourceUri {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-sprite assets.
#[derive(Clone, Debug, Default)]
struct SpriteAssets {
    costumes: IndexSet<SmolStr>,
    animations: IndexSet<SmolStr>,
}

/// Exact-name index of every asset the project declares.
///
/// Insertion order is preserved so lookups and listings stay
/// deterministic across requests.
#[derive(Clone, Debug, Default)]
pub struct AssetIndex {
    sprites: IndexMap<SmolStr, SpriteAssets>,
    sounds: IndexSet<SmolStr>,
    backdrops: IndexSet<SmolStr>,
    widgets: IndexSet<SmolStr>,
}

impl AssetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sprite(&mut self, name: impl Into<SmolStr>) {
        self.sprites.entry(name.into()).or_default();
    }

    pub fn add_costume(&mut self, sprite: &str, name: impl Into<SmolStr>) {
        self.sprites
            .entry(sprite.into())
            .or_default()
            .costumes
            .insert(name.into());
    }

    pub fn add_animation(&mut self, sprite: &str, name: impl Into<SmolStr>) {
        self.sprites
            .entry(sprite.into())
            .or_default()
            .animations
            .insert(name.into());
    }

    pub fn add_sound(&mut self, name: impl Into<SmolStr>) {
        self.sounds.insert(name.into());
    }

    pub fn add_backdrop(&mut self, name: impl Into<SmolStr>) {
        self.backdrops.insert(name.into());
    }

    pub fn add_widget(&mut self, name: impl Into<SmolStr>) {
        self.widgets.insert(name.into());
    }

    pub fn has_sprite(&self, name: &str) -> bool {
        self.sprites.contains_key(name)
    }

    /// Exact-name lookup. Entity-relative categories (costume, animation)
    /// require the owning sprite.
    pub fn lookup(
        &self,
        kind: ResourceKind,
        name: &str,
        owner: Option<&str>,
    ) -> Option<ResourceUri> {
        let uri = match kind {
            ResourceKind::Sprite => self
                .sprites
                .contains_key(name)
                .then(|| format!("spx://resources/sprites/{name}")),
            ResourceKind::Sound => self
                .sounds
                .contains(name)
                .then(|| format!("spx://resources/sounds/{name}")),
            ResourceKind::Backdrop => self
                .backdrops
                .contains(name)
                .then(|| format!("spx://resources/backdrops/{name}")),
            ResourceKind::Widget => self
                .widgets
                .contains(name)
                .then(|| format!("spx://resources/widgets/{name}")),
            ResourceKind::Costume => {
                let sprite = self.sprites.get(owner?)?;
                sprite.costumes.contains(name).then(|| {
                    format!("spx://resources/sprites/{}/costumes/{name}", owner.unwrap_or(""))
                })
            }
            ResourceKind::Animation => {
                let sprite = self.sprites.get(owner?)?;
                sprite.animations.contains(name).then(|| {
                    format!("spx://resources/sprites/{}/animations/{name}", owner.unwrap_or(""))
                })
            }
        };
        uri.map(|u| ResourceUri(SmolStr::from(u)))
    }
}

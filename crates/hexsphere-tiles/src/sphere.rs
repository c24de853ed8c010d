//! A named, buildable hexsphere: settings, tiles, and tile events.

use crossbeam_channel::Receiver;
use hexsphere_config::SphereConfig;
use tracing::{debug, info};

use crate::builder::TileSetOptions;
use crate::error::{BuildError, TileError};
use crate::events::{TileEvent, TileEventBus};
use crate::tile::TileId;
use crate::tile_set::{SphereMesh, TileSet};

/// One sphere owned by an orchestrator.
///
/// Tiles exist only between [`build`](Self::build) and
/// [`delete_tiles`](Self::delete_tiles). Every build bumps the generation so
/// work started against an older tile set can be recognized and dropped.
#[derive(Debug)]
pub struct Hexsphere {
    name: String,
    settings: SphereConfig,
    tiles: Option<TileSet>,
    combined: Option<SphereMesh>,
    generation: u64,
    events: TileEventBus,
}

impl Hexsphere {
    /// Creates an unbuilt sphere with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(name, SphereConfig::default())
    }

    /// Creates an unbuilt sphere with the given settings.
    pub fn from_config(name: impl Into<String>, settings: SphereConfig) -> Self {
        Self {
            name: name.into(),
            settings,
            tiles: None,
            combined: None,
            generation: 0,
            events: TileEventBus::new(),
        }
    }

    /// The sphere's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current settings. Changes take effect on the next build.
    #[must_use]
    pub fn settings(&self) -> &SphereConfig {
        &self.settings
    }

    /// Mutable settings. Changes take effect on the next build.
    pub fn settings_mut(&mut self) -> &mut SphereConfig {
        &mut self.settings
    }

    /// Builds (or rebuilds) the tiles from the current settings.
    ///
    /// On failure the previous tiles are kept and the generation is unchanged.
    pub fn build(&mut self) -> Result<&TileSet, BuildError> {
        let options = TileSetOptions::from(&self.settings);
        let tiles = TileSet::from_detail_level(self.settings.detail_level, &options)?;

        self.combined = self.settings.single_mesh.then(|| tiles.combined_mesh());
        self.generation += 1;
        info!(
            sphere = %self.name,
            generation = self.generation,
            detail_level = self.settings.detail_level,
            "hexsphere built"
        );
        Ok(self.tiles.insert(tiles))
    }

    /// Drops every tile.
    pub fn delete_tiles(&mut self) {
        if self.tiles.take().is_some() {
            debug!(sphere = %self.name, "deleted tiles");
        }
        self.combined = None;
    }

    /// True once built and not deleted since.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.tiles.is_some()
    }

    /// The tiles, if built.
    #[must_use]
    pub fn tiles(&self) -> Option<&TileSet> {
        self.tiles.as_ref()
    }

    /// The tiles for editing, if built.
    pub fn tiles_mut(&mut self) -> Option<&mut TileSet> {
        self.tiles.as_mut()
    }

    fn built_mut(&mut self) -> Result<&mut TileSet, TileError> {
        self.tiles.as_mut().ok_or(TileError::NotBuilt)
    }

    /// Number of successful builds so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Changes the world scale of the built tiles and of future builds.
    pub fn set_world_scale(&mut self, scale: f32) -> Result<(), BuildError> {
        if let Some(tiles) = &mut self.tiles {
            tiles.set_scale(scale)?;
            if self.combined.is_some() {
                self.combined = Some(tiles.combined_mesh());
            }
        } else if !(scale.is_finite() && scale > 0.0) {
            return Err(BuildError::InvalidScale(scale));
        }
        self.settings.planet_scale = scale;
        Ok(())
    }

    /// The merged planet mesh, present when built with `single_mesh`.
    #[must_use]
    pub fn combined_mesh(&self) -> Option<&SphereMesh> {
        self.combined.as_ref()
    }

    /// Registers a listener for this sphere's tile events.
    pub fn subscribe(&mut self) -> Receiver<TileEvent> {
        self.events.subscribe()
    }

    /// Extrudes a tile and announces the new height.
    pub fn extrude(&mut self, id: TileId, height_delta: f32) -> Result<(), TileError> {
        let tiles = self.built_mut()?;
        tiles.extrude(id, height_delta)?;
        let height = tiles.tile(id).extruded_height();
        self.refresh_combined();
        self.events.publish(TileEvent::Extruded { tile: id, height });
        Ok(())
    }

    /// Sets a tile's navigability and announces it.
    pub fn set_navigable(&mut self, id: TileId, navigable: bool) -> Result<(), TileError> {
        self.built_mut()?.set_navigable(id, navigable)?;
        self.events
            .publish(TileEvent::NavigabilityChanged { tile: id, navigable });
        Ok(())
    }

    /// Forwards a click on `id` to subscribers.
    pub fn notify_clicked(&mut self, id: TileId) -> usize {
        self.events.publish(TileEvent::Clicked(id))
    }

    /// Forwards the pointer entering `id` to subscribers.
    pub fn notify_pointer_entered(&mut self, id: TileId) -> usize {
        self.events.publish(TileEvent::PointerEntered(id))
    }

    /// Forwards the pointer leaving `id` to subscribers.
    pub fn notify_pointer_exited(&mut self, id: TileId) -> usize {
        self.events.publish(TileEvent::PointerExited(id))
    }

    fn refresh_combined(&mut self) {
        if let (Some(combined), Some(tiles)) = (&mut self.combined, &self.tiles) {
            *combined = tiles.combined_mesh();
        }
    }
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tank_engine::{Graphics, InputState, MouseButton, Point, Rect, Texture};
use thiserror::Error;
use tracing::info;

use crate::app::assets::Assets;
use crate::app::capacity::CapacityExceeded;

use super::entity::{EntityId, EntityStore, MAX_ENTITIES};
use super::nodes::{NodeKind, NodeStore};
use super::parser::{parse_level, LevelDefinition, LevelParseError};

const PROMPT_TEXTURE: &str = "res/lvl/prompt.png";
const PROMPT_SIZE: i32 = 32;
const NODE_SIZE: i32 = 36;
const PLACE_NODE_BUTTON: MouseButton = MouseButton::Left;

#[derive(Debug, Error)]
pub(crate) enum LevelLoadError {
    #[error("failed to read level file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid level file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: LevelParseError,
    },
    #[error("level {path} does not fit: {source}")]
    Capacity {
        path: PathBuf,
        #[source]
        source: CapacityExceeded,
    },
}

pub(crate) fn level_path(levels_dir: &Path, id: u32) -> PathBuf {
    levels_dir.join(format!("level{id}.txt"))
}

/// A loaded level: walls and other entities, the placed tank nodes and the
/// textures used to draw them.
#[derive(Debug)]
pub(crate) struct Level {
    id: u32,
    source: PathBuf,
    start: Point,
    entities: EntityStore,
    nodes: NodeStore,
    node_textures: Vec<Texture>,
    prompt_texture: Texture,
}

impl Level {
    pub(crate) fn load(
        levels_dir: &Path,
        id: u32,
        gfx: &mut dyn Graphics,
        assets: &mut Assets,
    ) -> Result<Self, LevelLoadError> {
        let path = level_path(levels_dir, id);
        let text = fs::read_to_string(&path).map_err(|source| LevelLoadError::Read {
            path: path.clone(),
            source,
        })?;
        let definition = parse_level(&text).map_err(|source| LevelLoadError::Parse {
            path: path.clone(),
            source,
        })?;
        Self::from_definition(id, path, definition, gfx, assets)
    }

    pub(crate) fn from_definition(
        id: u32,
        source: PathBuf,
        definition: LevelDefinition,
        gfx: &mut dyn Graphics,
        assets: &mut Assets,
    ) -> Result<Self, LevelLoadError> {
        let mut entities = EntityStore::new(MAX_ENTITIES);
        for spawn in definition.entities {
            if let Err(error) = entities.add(gfx, assets, spawn) {
                entities.destroy(gfx);
                return Err(LevelLoadError::Capacity {
                    path: source,
                    source: error,
                });
            }
        }

        let node_textures = NodeKind::ALL
            .iter()
            .map(|kind| {
                assets.load_or_placeholder(
                    gfx,
                    kind.texture_key(),
                    NODE_SIZE as u32,
                    NODE_SIZE as u32,
                )
            })
            .collect();
        let prompt_texture =
            assets.load_or_placeholder(gfx, PROMPT_TEXTURE, PROMPT_SIZE as u32, PROMPT_SIZE as u32);

        info!(
            level_id = id,
            path = %source.display(),
            entity_count = entities.live_count(),
            damageable = entities.iter_live().filter(|(_, entity)| entity.can_damage).count(),
            node_capacity = definition.node_capacity,
            "level_loaded"
        );

        Ok(Self {
            id,
            source,
            start: definition.start,
            entities,
            nodes: NodeStore::new(definition.node_capacity),
            node_textures,
            prompt_texture,
        })
    }

    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn source(&self) -> &Path {
        &self.source
    }

    pub(crate) fn start(&self) -> Point {
        self.start
    }

    pub(crate) fn entities(&self) -> &EntityStore {
        &self.entities
    }

    #[allow(dead_code)]
    pub(crate) fn entities_mut(&mut self) -> &mut EntityStore {
        &mut self.entities
    }

    pub(crate) fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    #[allow(dead_code)]
    pub(crate) fn remove_entity(&mut self, gfx: &mut dyn Graphics, id: EntityId) -> bool {
        self.entities.remove(gfx, id)
    }

    pub(crate) fn tick(&mut self) {}

    /// Draws the cursor prompt, handles node placement for this frame, then
    /// draws live entities and placed nodes.
    pub(crate) fn render(&mut self, input: &InputState, gfx: &mut dyn Graphics) {
        let cursor = input.cursor();
        gfx.draw_textured_rect(
            &self.prompt_texture,
            None,
            Rect::new(cursor.x, cursor.y, PROMPT_SIZE, PROMPT_SIZE),
            0.0,
        );

        self.nodes
            .update_placement(input.is_mouse_down(PLACE_NODE_BUTTON), cursor);

        self.entities.render(gfx);

        for node in self.nodes.nodes() {
            let Some(texture) = self.node_textures.get(node.kind.index()) else {
                continue;
            };
            gfx.draw_textured_rect(
                texture,
                None,
                Rect::new(node.x, node.y, NODE_SIZE, NODE_SIZE),
                f64::from(node.orientation),
            );
        }
    }

    pub(crate) fn destroy(self, gfx: &mut dyn Graphics) {
        self.entities.destroy(gfx);
        for texture in self.node_textures {
            gfx.release(texture);
        }
        gfx.release(self.prompt_texture);
    }
}

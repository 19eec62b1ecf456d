use std::collections::{HashMap, HashSet};
use std::io;
use std::path::PathBuf;

use tank_engine::{
    Graphics, Rect, ResourceLoadError, Rgba, TextStyle, Texture, TextureId,
};

const IMAGE_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DrawCall {
    pub(crate) label: String,
    pub(crate) source: Option<Rect>,
    pub(crate) dest: Rect,
    pub(crate) rotation: f64,
}

/// In-memory `Graphics` that remembers what every live texture is and
/// records each draw.
#[derive(Debug, Default)]
pub(crate) struct RecordingGraphics {
    next_id: u64,
    live: HashMap<TextureId, String>,
    missing: HashSet<String>,
    pub(crate) draws: Vec<DrawCall>,
    pub(crate) releases: usize,
}

impl RecordingGraphics {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_missing(mut self, key: &str) -> Self {
        self.missing.insert(key.to_string());
        self
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live.len()
    }

    pub(crate) fn label_of(&self, texture: &Texture) -> Option<&str> {
        self.live.get(&texture.id()).map(String::as_str)
    }

    pub(crate) fn live_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.live.values().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    pub(crate) fn drawn_labels(&self) -> Vec<&str> {
        self.draws.iter().map(|draw| draw.label.as_str()).collect()
    }

    pub(crate) fn draws_of(&self, label: &str) -> Vec<&DrawCall> {
        self.draws.iter().filter(|draw| draw.label == label).collect()
    }

    pub(crate) fn clear_draws(&mut self) {
        self.draws.clear();
    }

    fn mint(&mut self, label: String, width: u32, height: u32) -> Texture {
        self.next_id += 1;
        let id = TextureId(self.next_id);
        self.live.insert(id, label);
        Texture::from_raw(id, width, height)
    }
}

impl Graphics for RecordingGraphics {
    fn load_image(&mut self, key: &str) -> Result<Texture, ResourceLoadError> {
        if self.missing.contains(key) {
            return Err(ResourceLoadError::Open {
                path: PathBuf::from(key),
                source: io::Error::new(io::ErrorKind::NotFound, "missing in test"),
            });
        }
        Ok(self.mint(key.to_string(), IMAGE_SIZE, IMAGE_SIZE))
    }

    fn render_text(&mut self, text: &str, _style: TextStyle) -> Texture {
        self.mint(format!("text:{text}"), text.len().max(1) as u32, 1)
    }

    fn create_solid(&mut self, width: u32, height: u32, _color: Rgba) -> Texture {
        self.mint("solid".to_string(), width, height)
    }

    fn release(&mut self, texture: Texture) {
        assert!(
            self.live.remove(&texture.id()).is_some(),
            "released unknown texture {:?}",
            texture.id()
        );
        self.releases += 1;
    }

    fn draw_textured_rect(
        &mut self,
        texture: &Texture,
        source: Option<Rect>,
        dest: Rect,
        rotation_degrees: f64,
    ) {
        let label = self
            .live
            .get(&texture.id())
            .cloned()
            .unwrap_or_else(|| panic!("drew released texture {:?}", texture.id()));
        self.draws.push(DrawCall {
            label,
            source,
            dest,
            rotation: rotation_degrees,
        });
    }
}

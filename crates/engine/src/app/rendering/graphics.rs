use std::path::PathBuf;

use thiserror::Error;

use crate::app::Rect;
use crate::AssetKeyError;

pub type Rgba = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Owned handle to a texture living in a [`Graphics`] backend.
///
/// Not `Clone`: whoever holds the handle owns the texture and gives it back
/// through [`Graphics::release`], which consumes it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    /// Mints a handle. Only `Graphics` implementations should call this.
    pub fn from_raw(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub const fn point_size(self) -> u32 {
        match self {
            FontSize::Small => 16,
            FontSize::Medium => 32,
            FontSize::Large => 72,
        }
    }
}

/// `background: None` renders solid text on a transparent surface,
/// `Some` renders shaded text on a filled box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size: FontSize,
    pub foreground: Rgba,
    pub background: Option<Rgba>,
}

#[derive(Debug, Error)]
pub enum ResourceLoadError {
    #[error("invalid asset key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: AssetKeyError,
    },
    #[error("failed to open image {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Rendering and texture capability handed to scenes.
pub trait Graphics {
    fn load_image(&mut self, key: &str) -> Result<Texture, ResourceLoadError>;
    fn render_text(&mut self, text: &str, style: TextStyle) -> Texture;
    fn create_solid(&mut self, width: u32, height: u32, color: Rgba) -> Texture;
    fn release(&mut self, texture: Texture);
    /// Draws `source` (whole texture when `None`) into `dest`, rotated
    /// clockwise by `rotation_degrees` about the centre of `dest`.
    fn draw_textured_rect(
        &mut self,
        texture: &Texture,
        source: Option<Rect>,
        dest: Rect,
        rotation_degrees: f64,
    );
}

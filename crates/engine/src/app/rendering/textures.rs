use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::ImageReader;
use tracing::{debug, warn};

use crate::asset_keys::validate_asset_key;

use super::font::text_surface;
use super::graphics::{ResourceLoadError, Rgba, TextStyle, Texture, TextureId};

/// CPU-side RGBA8 pixels backing a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Surface {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba: Vec<u8>,
}

impl Surface {
    pub(crate) fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            rgba.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Clipped to the surface bounds.
    pub(crate) fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let right = x.saturating_add(w).min(self.width);
        let bottom = y.saturating_add(h).min(self.height);
        for py in y..bottom {
            for px in x..right {
                let offset = (py as usize * self.width as usize + px as usize) * 4;
                self.rgba[offset..offset + 4].copy_from_slice(&color);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(self.rgba.get(offset..offset + 4)?);
        Some(out)
    }
}

/// Owns every live texture surface and mints the handles that refer to them.
pub struct TextureStore {
    asset_root: PathBuf,
    surfaces: HashMap<TextureId, Surface>,
    next_id: u64,
}

impl TextureStore {
    pub fn new(asset_root: PathBuf) -> Self {
        Self {
            asset_root,
            surfaces: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    pub fn load_image(&mut self, key: &str) -> Result<Texture, ResourceLoadError> {
        validate_asset_key(key).map_err(|source| ResourceLoadError::InvalidKey {
            key: key.to_string(),
            source,
        })?;
        let path = self.asset_root.join(key);
        let surface = load_surface(&path)?;
        debug!(key, width = surface.width, height = surface.height, "texture_loaded");
        Ok(self.insert(surface))
    }

    pub fn render_text(&mut self, text: &str, style: TextStyle) -> Texture {
        self.insert(text_surface(text, style))
    }

    pub fn create_solid(&mut self, width: u32, height: u32, color: Rgba) -> Texture {
        self.insert(Surface::filled(width.max(1), height.max(1), color))
    }

    pub fn release(&mut self, texture: Texture) {
        if self.surfaces.remove(&texture.id()).is_none() {
            warn!(texture_id = texture.id().0, "texture_release_unknown");
        }
    }

    pub fn live_count(&self) -> usize {
        self.surfaces.len()
    }

    pub(crate) fn surface(&self, id: TextureId) -> Option<&Surface> {
        self.surfaces.get(&id)
    }

    fn insert(&mut self, surface: Surface) -> Texture {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        let texture = Texture::from_raw(id, surface.width, surface.height);
        self.surfaces.insert(id, surface);
        texture
    }
}

fn load_surface(path: &Path) -> Result<Surface, ResourceLoadError> {
    let reader = ImageReader::open(path).map_err(|source| ResourceLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| ResourceLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decoded.to_rgba8();
    Ok(Surface {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FontSize;
    use image::{Rgba as ImageRgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(root: &Path, key: &str, width: u32, height: u32, color: [u8; 4]) {
        let path = root.join(key);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
        RgbaImage::from_pixel(width, height, ImageRgba(color))
            .save(&path)
            .expect("save png");
    }

    #[test]
    fn loads_png_relative_to_asset_root() {
        let temp = TempDir::new().expect("temp");
        write_png(temp.path(), "res/ent/wall.png", 4, 2, [10, 20, 30, 255]);
        let mut store = TextureStore::new(temp.path().to_path_buf());

        let texture = store.load_image("res/ent/wall.png").expect("load");

        assert_eq!((texture.width(), texture.height()), (4, 2));
        let surface = store.surface(texture.id()).expect("surface");
        assert_eq!(surface.pixel(3, 1), Some([10, 20, 30, 255]));
        assert_eq!(store.live_count(), 1);
    }

    #[test]
    fn missing_file_reports_open_error() {
        let temp = TempDir::new().expect("temp");
        let mut store = TextureStore::new(temp.path().to_path_buf());

        let error = store.load_image("res/missing.png").expect_err("missing");

        assert!(matches!(error, ResourceLoadError::Open { .. }));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn corrupt_file_reports_decode_error() {
        let temp = TempDir::new().expect("temp");
        std::fs::create_dir_all(temp.path().join("res")).expect("dirs");
        std::fs::write(temp.path().join("res/bad.png"), b"not a png").expect("write");
        let mut store = TextureStore::new(temp.path().to_path_buf());

        let error = store.load_image("res/bad.png").expect_err("corrupt");

        assert!(matches!(error, ResourceLoadError::Decode { .. }));
    }

    #[test]
    fn invalid_key_is_rejected_before_touching_disk() {
        let temp = TempDir::new().expect("temp");
        let mut store = TextureStore::new(temp.path().to_path_buf());

        let error = store.load_image("../etc/passwd").expect_err("traversal");

        assert!(matches!(error, ResourceLoadError::InvalidKey { .. }));
    }

    #[test]
    fn release_frees_surface_and_ids_are_not_reused() {
        let temp = TempDir::new().expect("temp");
        let mut store = TextureStore::new(temp.path().to_path_buf());
        let first = store.create_solid(2, 2, [1, 2, 3, 255]);
        let first_id = first.id();

        store.release(first);
        let second = store.render_text("ok", TextStyle {
            size: FontSize::Small,
            foreground: [255, 255, 255, 255],
            background: None,
        });

        assert_eq!(store.live_count(), 1);
        assert!(store.surface(first_id).is_none());
        assert_ne!(second.id(), first_id);
    }

    #[test]
    fn zero_sized_solid_is_clamped_to_one_pixel() {
        let temp = TempDir::new().expect("temp");
        let mut store = TextureStore::new(temp.path().to_path_buf());
        let texture = store.create_solid(0, 0, [0, 0, 0, 255]);
        assert_eq!((texture.width(), texture.height()), (1, 1));
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut surface = Surface::filled(2, 2, [0, 0, 0, 0]);
        surface.fill_rect(1, 1, 5, 5, [9, 9, 9, 255]);
        assert_eq!(surface.pixel(1, 1), Some([9, 9, 9, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(2, 2), None);
    }
}

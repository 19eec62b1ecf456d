use std::path::PathBuf;
use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use tracing::warn;
use winit::window::Window;

use crate::app::{Point, Rect};

use super::blit::{blit_rotated, clear};
use super::graphics::{Graphics, ResourceLoadError, Rgba, TextStyle, Texture};
use super::textures::TextureStore;

const CLEAR_COLOR: Rgba = [0, 0, 0, 255];

/// Software renderer over a fixed-size `pixels` frame buffer.
///
/// The logical buffer never changes size; window resizes only rescale the
/// presentation surface, so scene coordinates stay in buffer pixels.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    buffer_width: u32,
    buffer_height: u32,
    textures: TextureStore,
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        buffer_width: u32,
        buffer_height: u32,
        asset_root: PathBuf,
    ) -> Result<Self, Error> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(buffer_width, buffer_height, surface)?;
        Ok(Self {
            window,
            pixels,
            buffer_width,
            buffer_height,
            textures: TextureStore::new(asset_root),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }

    pub fn begin_frame(&mut self) {
        clear(self.pixels.frame_mut(), CLEAR_COLOR);
    }

    pub fn present(&mut self) -> Result<(), Error> {
        self.pixels.render()
    }

    /// Maps a physical window position into buffer pixels, clamping positions
    /// that fall in the letterbox border.
    pub fn window_to_buffer(&self, x: f64, y: f64) -> Point {
        let (bx, by) = match self.pixels.window_pos_to_pixel((x as f32, y as f32)) {
            Ok((bx, by)) => (bx as i64, by as i64),
            Err((bx, by)) => (
                (bx as i64).clamp(0, i64::from(self.buffer_width) - 1),
                (by as i64).clamp(0, i64::from(self.buffer_height) - 1),
            ),
        };
        Point::new(bx as i32, by as i32)
    }
}

impl Graphics for Renderer {
    fn load_image(&mut self, key: &str) -> Result<Texture, ResourceLoadError> {
        self.textures.load_image(key)
    }

    fn render_text(&mut self, text: &str, style: TextStyle) -> Texture {
        self.textures.render_text(text, style)
    }

    fn create_solid(&mut self, width: u32, height: u32, color: Rgba) -> Texture {
        self.textures.create_solid(width, height, color)
    }

    fn release(&mut self, texture: Texture) {
        self.textures.release(texture);
    }

    fn draw_textured_rect(
        &mut self,
        texture: &Texture,
        source: Option<Rect>,
        dest: Rect,
        rotation_degrees: f64,
    ) {
        let Some(surface) = self.textures.surface(texture.id()) else {
            warn!(texture_id = texture.id().0, "renderer_draw_unknown_texture");
            return;
        };
        blit_rotated(
            self.pixels.frame_mut(),
            self.buffer_width,
            self.buffer_height,
            surface,
            source.unwrap_or_else(|| texture.bounds()),
            dest,
            rotation_degrees,
        );
    }
}

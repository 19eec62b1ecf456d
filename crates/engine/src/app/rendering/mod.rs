mod blit;
mod font;
mod graphics;
mod renderer;
mod textures;

pub use graphics::{FontSize, Graphics, ResourceLoadError, Rgba, TextStyle, Texture, TextureId};
pub use renderer::Renderer;
pub use textures::TextureStore;

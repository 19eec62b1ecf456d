use std::collections::HashSet;

use tank_engine::{Graphics, Rgba, Texture};
use tracing::warn;

const PLACEHOLDER_COLOR: Rgba = [255, 0, 255, 255];

/// Texture loading with a solid placeholder for assets that fail to load.
#[derive(Debug, Default)]
pub(crate) struct Assets {
    warned_keys: HashSet<String>,
}

impl Assets {
    /// `width`/`height` size the placeholder; loaded images keep their own size.
    pub(crate) fn load_or_placeholder(
        &mut self,
        gfx: &mut dyn Graphics,
        key: &str,
        width: u32,
        height: u32,
    ) -> Texture {
        match gfx.load_image(key) {
            Ok(texture) => texture,
            Err(error) => {
                if self.warned_keys.insert(key.to_string()) {
                    warn!(
                        asset_key = key,
                        error = %error,
                        "texture_load_failed_using_placeholder"
                    );
                }
                gfx.create_solid(width, height, PLACEHOLDER_COLOR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::RecordingGraphics;

    #[test]
    fn missing_asset_falls_back_to_owned_placeholder() {
        let mut gfx = RecordingGraphics::new().with_missing("res/tank.png");
        let mut assets = Assets::default();

        let texture = assets.load_or_placeholder(&mut gfx, "res/tank.png", 60, 60);

        assert_eq!((texture.width(), texture.height()), (60, 60));
        assert_eq!(gfx.label_of(&texture), Some("solid"));
        gfx.release(texture);
        assert_eq!(gfx.live_count(), 0);
    }

    #[test]
    fn present_asset_is_loaded_directly() {
        let mut gfx = RecordingGraphics::new();
        let mut assets = Assets::default();

        let texture = assets.load_or_placeholder(&mut gfx, "res/ent/wall.png", 64, 64);

        assert_eq!(gfx.label_of(&texture), Some("res/ent/wall.png"));
        gfx.release(texture);
    }

    #[test]
    fn each_missing_key_is_remembered_once() {
        let mut gfx = RecordingGraphics::new().with_missing("res/ui/btn.png");
        let mut assets = Assets::default();

        let first = assets.load_or_placeholder(&mut gfx, "res/ui/btn.png", 10, 10);
        let second = assets.load_or_placeholder(&mut gfx, "res/ui/btn.png", 10, 10);

        assert_eq!(assets.warned_keys.len(), 1);
        gfx.release(first);
        gfx.release(second);
        assert_eq!(gfx.live_count(), 0);
    }
}

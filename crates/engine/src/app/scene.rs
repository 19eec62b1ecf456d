use std::error::Error as StdError;

use thiserror::Error;

use super::{Graphics, InputState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct SceneError(Box<dyn StdError + Send + Sync>);

impl SceneError {
    pub fn new(error: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(error.into())
    }
}

/// The application the window loop drives.
///
/// `update` runs once per fixed tick, `render` once per frame between the
/// renderer's clear and present. Texture work only happens where a
/// [`Graphics`] is handed in.
pub trait Scene {
    fn load(&mut self, gfx: &mut dyn Graphics) -> Result<(), SceneError>;
    fn update(&mut self, input: &InputState) -> SceneCommand;
    fn render(&mut self, input: &InputState, gfx: &mut dyn Graphics) -> SceneCommand;
    fn unload(&mut self, gfx: &mut dyn Graphics);
    fn debug_title(&self) -> Option<String> {
        None
    }
}

mod clock;
mod geometry;
mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;
mod timestep;

pub use clock::{Clock, SystemClock};
pub use geometry::{Point, Rect};
pub use input::{InputState, Key, MouseButton, MOUSE_BUTTON_COUNT};
pub use loop_runner::{run_app, AppError, LoopConfig, TPS_ENV_VAR};
pub use metrics::{LoopCounters, LoopReport};
pub use rendering::{
    FontSize, Graphics, Renderer, ResourceLoadError, Rgba, TextStyle, Texture, TextureId,
    TextureStore,
};
pub use scene::{Scene, SceneCommand, SceneError};
pub use timestep::{
    run_fixed_timestep, FixedTimestep, LoopControl, LoopDriver, LoopSummary, TimestepConfig,
};

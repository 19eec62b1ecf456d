mod entity;
mod level;
mod nodes;
mod parser;
mod player;

pub(crate) use level::Level;
pub(crate) use player::Player;
#[cfg(test)]
pub(crate) use level::level_path;

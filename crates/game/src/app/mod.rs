mod assets;
pub(crate) mod bootstrap;
mod capacity;
mod gameplay;
pub(crate) mod loop_runner;
mod menu;
mod session;
#[cfg(test)]
mod test_support;

pub mod frames;
pub mod nodes;
pub mod plugin;

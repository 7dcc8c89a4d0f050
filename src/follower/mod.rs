mod config;
mod instance;
mod pointer;
mod schedule;
mod strategy;

pub use config::{ConfigError, FollowerConfig, FollowerOptions};
pub use instance::{Follower, FollowerFrame, FollowerId};
pub use pointer::PointerSignal;
pub use schedule::FrameQueue;

#[cfg(test)]
pub use config::{EyesSetting, FollowStrategy};
#[cfg(test)]
pub use schedule::FrameScheduler;

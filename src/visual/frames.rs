use bevy::prelude::*;

use crate::follower::{FollowerId, FrameQueue};
use crate::input::Pointer;
use crate::visual::nodes::FollowerNode;

/// Resource: frame callbacks requested by followers
///
/// Requests made anywhere during a frame (startup, preset switch, resume or
/// the callbacks themselves) only become due at the end of that frame, so a
/// follower never ticks twice in one frame.
#[derive(Resource, Default, Debug)]
pub struct FrameRequests {
    /// Collecting this frame's requests
    pub queue: FrameQueue,
    /// Delivered on the next `Update`
    due: Vec<FollowerId>,
}

impl FrameRequests {
    /// This frame's requests become next frame's batch
    pub fn advance(&mut self) {
        self.due = self.queue.take();
    }

    pub fn take_due(&mut self) -> Vec<FollowerId> {
        std::mem::take(&mut self.due)
    }
}

/// System: deliver the batch promoted at the end of the previous frame
///
/// Each follower runs its own continuation chain: it only ticks when it asked
/// for this frame, and asks again only while enabled.
pub fn drive_followers(
    pointer: Res<Pointer>,
    mut requests: ResMut<FrameRequests>,
    mut nodes: Query<&mut FollowerNode>,
) {
    let due = requests.take_due();
    if due.is_empty() {
        return;
    }

    for mut node in &mut nodes {
        if due.contains(&node.follower.id()) {
            node.follower.on_frame(&pointer.0, &mut requests.queue);
        }
    }
}

/// System: close the frame, runs in `Last`
pub fn advance_frame_requests(mut requests: ResMut<FrameRequests>) {
    requests.advance();
}

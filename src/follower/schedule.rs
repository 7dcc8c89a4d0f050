use super::instance::FollowerId;

/// Frame-pacing capability supplied by the host
///
/// A follower that wants another tick asks for exactly one callback on the
/// next frame; the host later delivers it through `Follower::on_frame`.
pub trait FrameScheduler {
    fn request_frame(&mut self, id: FollowerId);
}

/// Pending frame callbacks, delivered in request order
#[derive(Debug, Default, Clone)]
pub struct FrameQueue {
    pending: Vec<FollowerId>,
}

impl FrameQueue {
    /// Take every request made so far; requests made while handling these
    /// land in the next batch
    pub fn take(&mut self) -> Vec<FollowerId> {
        std::mem::take(&mut self.pending)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, id: FollowerId) -> bool {
        self.pending.contains(&id)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, id: FollowerId) {
        self.pending.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains_in_order() {
        let mut queue = FrameQueue::default();
        queue.request_frame(FollowerId(3));
        queue.request_frame(FollowerId(1));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.take(), vec![FollowerId(3), FollowerId(1)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_requests_after_take_go_to_next_batch() {
        let mut queue = FrameQueue::default();
        queue.request_frame(FollowerId(0));

        let batch = queue.take();
        for id in batch {
            queue.request_frame(id);
        }

        assert!(queue.contains(FollowerId(0)));
        assert_eq!(queue.len(), 1);
    }
}

//! Handle types for the scene arenas
//!
//! Frames and nodes live in generation-checked slot maps. A handle to a
//! removed entry never aliases a later insertion, so stale lookups fail
//! instead of reaching the wrong value.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a [`SpatialFrame`](crate::scene::SpatialFrame) in a frame hierarchy
    pub struct FrameHandle;

    /// Stable handle to a [`SceneNode`](crate::scene::SceneNode) in a scene registry
    pub struct NodeHandle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_handle_is_not_reused() {
        let mut map: SlotMap<FrameHandle, u32> = SlotMap::with_key();
        let first = map.insert(1);
        map.remove(first);
        let second = map.insert(2);

        assert_ne!(first, second);
        assert!(map.get(first).is_none());
        assert_eq!(map.get(second), Some(&2));
    }
}

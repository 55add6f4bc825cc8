use glam::Mat4;

/// A transform carrier for draw instances.
///
/// Only the world transform is tracked; hierarchy and dirty flags belong to
/// the scene graph, which draw instances do not depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphNode {
    world_transform: Mat4,
}

impl GraphNode {
    /// Node placed at the origin with no rotation or scale.
    pub const IDENTITY: Self = Self {
        world_transform: Mat4::IDENTITY,
    };

    /// Node with a fixed world transform.
    pub fn from_world_transform(world_transform: Mat4) -> Self {
        Self { world_transform }
    }

    pub fn world_transform(&self) -> &Mat4 {
        &self.world_transform
    }
}

impl Default for GraphNode {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_identity_node() {
        assert_eq!(*GraphNode::default().world_transform(), Mat4::IDENTITY);
    }

    #[test]
    fn test_world_transform_kept() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let node = GraphNode::from_world_transform(m);
        assert_eq!(node.world_transform().transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
    }
}

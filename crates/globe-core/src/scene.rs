//! Minimal parent/child transform graph.
//!
//! Markers are attached to the globe node so that spinning the globe carries
//! them along; world transforms are always derived from the parent chain and
//! never written back into the children.

use glam::{Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Local translation/rotation/scale of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Debug)]
struct Node {
    local: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node, optionally attached to `parent`.
    ///
    /// Parents always precede their children, so the graph cannot contain
    /// cycles. An unknown parent leaves the node at the root.
    pub fn spawn(&mut self, local: Transform, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = parent.filter(|p| p.index() < self.nodes.len());
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        self.nodes.push(Node {
            local,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn local(&self, id: NodeId) -> Option<&Transform> {
        self.nodes.get(id.index()).map(|n| &n.local)
    }

    pub fn local_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(id.index()).map(|n| &mut n.local)
    }

    pub fn set_rotation(&mut self, id: NodeId, rotation: Quat) {
        if let Some(t) = self.local_mut(id) {
            t.rotation = rotation;
        }
    }

    pub fn set_uniform_scale(&mut self, id: NodeId, scale: f32) {
        if let Some(t) = self.local_mut(id) {
            t.scale = Vec3::splat(scale);
        }
    }

    /// Compose the node's transform with every ancestor's.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            let Some(node) = self.nodes.get(cur.index()) else {
                break;
            };
            m = node.local.matrix() * m;
            cursor = node.parent;
        }
        m
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    pub fn world_rotation(&self, id: NodeId) -> Quat {
        let mut q = Quat::IDENTITY;
        let mut cursor = Some(id);
        while let Some(cur) = cursor {
            let Some(node) = self.nodes.get(cur.index()) else {
                break;
            };
            q = node.local.rotation * q;
            cursor = node.parent;
        }
        q.normalize()
    }
}

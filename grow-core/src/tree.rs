use crate::types::NodeId;
use glam::IVec3;
use std::collections::HashMap;

#[derive(Debug)]
pub struct TreeNode {
    pub pos: IVec3,
    pub radius: f32,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Branch voxels of one tree, rooted at `nodes[0]`.
///
/// Children are always pushed after their parent, so every child id is
/// larger than its parent id.
#[derive(Debug)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
    index: HashMap<IVec3, NodeId>,
}

impl TreeNode {
    pub fn new_root(pos: IVec3, radius: f32) -> Self {
        Self {
            pos,
            radius,
            parent: None,
            children: Vec::with_capacity(4),
        }
    }

    pub fn new_child(pos: IVec3, radius: f32, parent: NodeId) -> Self {
        Self {
            pos,
            radius,
            parent: Some(parent),
            children: Vec::with_capacity(4),
        }
    }
}

impl Tree {
    pub fn new(base: IVec3, base_radius: f32) -> Self {
        Self {
            nodes: vec![TreeNode::new_root(base, base_radius)],
            index: HashMap::from([(base, 0)]),
        }
    }

    pub fn base(&self) -> Option<IVec3> {
        self.nodes.first().map(|n| n.pos)
    }

    pub fn add_child(&mut self, parent: NodeId, pos: IVec3, radius: f32) -> NodeId {
        debug_assert!(!self.index.contains_key(&pos), "voxel {pos} already occupied");
        let id: usize = self.nodes.len();
        self.nodes.push(TreeNode::new_child(pos, radius, parent));
        self.nodes[parent].children.push(id);
        self.index.insert(pos, id);
        id
    }

    pub fn node_at(&self, pos: IVec3) -> Option<NodeId> {
        self.index.get(&pos).copied()
    }

    /// `true` if `a` and `b` are joined by a parent/child edge.
    pub fn are_linked(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes[a].parent == Some(b) || self.nodes[b].parent == Some(a)
    }

    /// Integer radius of a node: its pipe radius rounded up, in `1..=max_radius`.
    pub fn int_radius(&self, id: NodeId, max_radius: u32) -> u32 {
        let r = self.nodes[id].radius.ceil() as u32;
        r.clamp(1, max_radius.max(1))
    }

    /// Number of voxel layers spanned from the base up to the highest node.
    pub fn height(&self) -> u32 {
        let Some(base) = self.base() else {
            return 0;
        };
        let top = self.nodes.iter().map(|n| n.pos.y).max().unwrap_or(base.y);
        (top - base.y + 1) as u32
    }

    /// Positions of every branch end (nodes without children).
    ///
    /// A bare base counts as an end.
    pub fn find_ends(&self) -> Vec<IVec3> {
        self.nodes
            .iter()
            .filter(|n| n.children.is_empty())
            .map(|n| n.pos)
            .collect()
    }

    /// Recomputes every radius with the pipe model.
    ///
    /// Each node carries the cross-section of everything above it plus
    /// `tapering`, so `r = sqrt(tapering + sum(child_r^2))`.
    pub fn update_radii(&mut self, tapering: f32) {
        for id in (0..self.nodes.len()).rev() {
            let area: f32 = tapering
                + self.nodes[id]
                    .children
                    .iter()
                    .map(|&c| self.nodes[c].radius * self.nodes[c].radius)
                    .sum::<f32>();
            self.nodes[id].radius = area.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(height: i32) -> Tree {
        let mut tree = Tree::new(IVec3::ZERO, 0.0);
        for y in 1..height {
            tree.add_child((y - 1) as usize, IVec3::new(0, y, 0), 0.0);
        }
        tree
    }

    #[test]
    fn add_child_links_and_indexes() {
        let mut tree = Tree::new(IVec3::new(4, 64, 4), 1.0);
        let id = tree.add_child(0, IVec3::new(4, 65, 4), 1.0);
        assert_eq!(id, 1);
        assert_eq!(tree.nodes[0].children, vec![1]);
        assert_eq!(tree.node_at(IVec3::new(4, 65, 4)), Some(1));
        assert_eq!(tree.node_at(IVec3::new(4, 66, 4)), None);
        assert!(tree.are_linked(0, 1));
    }

    #[test]
    fn height_counts_layers_from_base() {
        assert_eq!(column(1).height(), 1);
        assert_eq!(column(5).height(), 5);
        let empty = Tree {
            nodes: Vec::new(),
            index: HashMap::new(),
        };
        assert_eq!(empty.height(), 0);
    }

    #[test]
    fn pipe_model_accumulates_down_the_trunk() {
        let mut tree = column(4);
        tree.update_radii(1.0);
        // Node k carries (4 - k) units of area.
        for (k, node) in tree.nodes.iter().enumerate() {
            let expected = ((4 - k) as f32).sqrt();
            assert!((node.radius - expected).abs() < 1e-5);
        }
        assert_eq!(tree.int_radius(0, 8), 2);
        assert_eq!(tree.int_radius(3, 8), 1);
        assert_eq!(tree.int_radius(0, 1), 1);
    }

    #[test]
    fn ends_are_childless_nodes() {
        let mut tree = column(3);
        tree.add_child(1, IVec3::new(1, 1, 0), 0.0);
        let mut ends = tree.find_ends();
        ends.sort_by_key(|p| (p.x, p.y));
        assert_eq!(ends, vec![IVec3::new(0, 2, 0), IVec3::new(1, 1, 0)]);
    }
}

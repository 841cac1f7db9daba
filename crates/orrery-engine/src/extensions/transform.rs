// extensions/transform.rs
//
// Transform hierarchy: tracks parent-child relationships by EntityId.
// Decoupled from Entity/Scene internals: the graph owns local transforms,
// `propagate` writes composed world transforms back into the scene.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(earth, LocalTransform::new().with_offset(Vec3::X * 10.0));
//   graph.register(moon);
//   graph.set_parent(moon, Some(earth));
//   graph.propagate(&mut scene);

use std::collections::HashMap;
use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Transform of a node relative to its parent (or the world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent.
    pub offset: Vec3,
    /// Rotation relative to parent.
    pub rotation: Quat,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

/// Fully composed world-space transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl WorldTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// world = parent ∘ local.
    ///
    /// The local offset is scaled, then rotated by the parent, then
    /// translated to the parent's origin.
    pub fn compose(parent: &WorldTransform, local: &LocalTransform) -> WorldTransform {
        WorldTransform {
            translation: parent.translation + parent.rotation * (parent.scale * local.offset),
            rotation: parent.rotation * local.rotation,
            scale: parent.scale * local.scale,
        }
    }

}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Node in the transform hierarchy.
#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Transform hierarchy graph. Manages parent-child relationships.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent (top-level), in registration order.
    roots: Vec<EntityId>,
    /// Set when anything changes, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity as a root with the identity local transform.
    pub fn register(&mut self, id: EntityId) {
        self.register_with(id, LocalTransform::default());
    }

    /// Register an entity as a root with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    ///
    /// Returns `false` (and changes nothing) if the link would create a cycle.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) -> bool {
        if let Some(p) = parent {
            if p == child || self.is_ancestor(child, p) {
                return false;
            }
            self.nodes.entry(p).or_default();
            if !self.roots.contains(&p) && self.get_parent(p).is_none() {
                self.roots.push(p);
            }
        }
        self.nodes.entry(child).or_default();

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
        true
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut current = self.get_parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.get_parent(p);
        }
        false
    }

    /// Overwrite just the local offset, keeping rotation and scale.
    pub fn set_offset(&mut self, id: EntityId, offset: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.offset = offset;
            self.dirty = true;
        }
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Propagate transforms from roots down through the hierarchy,
    /// writing world pos/rotation/scale into the scene's entities.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        for &root in &self.roots {
            self.propagate_recursive(root, &WorldTransform::IDENTITY, scene);
        }

        self.dirty = false;
    }

    fn propagate_recursive(&self, id: EntityId, parent: &WorldTransform, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };
        let world = WorldTransform::compose(parent, &node.local);

        if let Some(entity) = scene.get_mut(id) {
            entity.pos = world.translation;
            entity.rotation = world.rotation;
            entity.scale = world.scale;
        }

        for &child in &node.children {
            self.propagate_recursive(child, &world, scene);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        graph.register(parent);
        graph.register(child);
        assert!(graph.set_parent(child, Some(parent)));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
        assert!(!graph.roots.contains(&child));
    }

    #[test]
    fn compose_translates_child_by_parent() {
        let parent = WorldTransform {
            translation: Vec3::new(10.0, 0.0, 0.0),
            ..WorldTransform::IDENTITY
        };
        let local = LocalTransform::new().with_offset(Vec3::new(0.0, 0.0, 1.5));
        let world = WorldTransform::compose(&parent, &local);
        assert!(approx(world.translation, Vec3::new(10.0, 0.0, 1.5)));
    }

    #[test]
    fn compose_applies_parent_rotation_and_scale() {
        let parent = WorldTransform {
            translation: Vec3::ZERO,
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            scale: Vec3::splat(2.0),
        };
        let local = LocalTransform::new().with_offset(Vec3::X);
        let world = WorldTransform::compose(&parent, &local);
        // +X rotated a quarter turn about +Y lands on -Z, then doubled
        assert!(approx(world.translation, Vec3::new(0.0, 0.0, -2.0)));
        assert!(approx(world.scale, Vec3::splat(2.0)));
    }

    #[test]
    fn propagate_updates_positions() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();

        let parent = EntityId(1);
        let child = EntityId(2);

        scene.spawn(Entity::new(parent));
        scene.spawn(Entity::new(child));

        graph.register_with(parent, LocalTransform::new().with_offset(Vec3::new(100.0, 0.0, 100.0)));
        graph.register_with(child, LocalTransform::new().with_offset(Vec3::new(50.0, 0.0, 0.0)));
        graph.set_parent(child, Some(parent));

        graph.propagate(&mut scene);

        assert_eq!(scene.get(parent).unwrap().pos, Vec3::new(100.0, 0.0, 100.0));
        assert_eq!(scene.get(child).unwrap().pos, Vec3::new(150.0, 0.0, 100.0));
        assert!(!graph.is_dirty());
    }

    #[test]
    fn set_parent_rejects_cycles() {
        let mut graph = TransformGraph::new();
        let a = EntityId(1);
        let b = EntityId(2);
        graph.register(a);
        graph.register(b);
        assert!(graph.set_parent(b, Some(a)));
        assert!(!graph.set_parent(a, Some(b)));
        assert!(!graph.set_parent(a, Some(a)));
        assert_eq!(graph.get_parent(a), None);
    }
}

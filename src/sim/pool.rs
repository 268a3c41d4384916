//! Arena-style entity storage
//!
//! Entities are never removed while a tick is iterating over them. Anything
//! that dies is flagged with [`Entity::destroy`] and skipped by the live
//! iterators; [`Pool::compact`] drops the dead ones once, at the end of the tick.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Capabilities shared by every entity kind
pub trait Entity {
    /// Current bounding region for hit-testing
    fn bounds(&self) -> Rect;
    fn is_alive(&self) -> bool;
    /// Logical delete, applied immediately within the current tick
    fn destroy(&mut self);
}

/// Indexed collection of one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Live entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|e| e.is_alive())
    }

    /// Live entities in insertion order, mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().filter(|e| e.is_alive())
    }

    /// Every stored entity, including ones pending removal
    pub fn slots(&self) -> &[T] {
        &self.items
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when no live entity remains
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Physically remove dead entities, returning how many were dropped
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|e| e.is_alive());
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[derive(Debug, Clone)]
    struct Dot {
        x: f32,
        alive: bool,
    }

    impl Entity for Dot {
        fn bounds(&self) -> Rect {
            Rect::new(Vec2::new(self.x, 0.0), Vec2::ONE)
        }
        fn is_alive(&self) -> bool {
            self.alive
        }
        fn destroy(&mut self) {
            self.alive = false;
        }
    }

    fn dots(n: usize) -> Pool<Dot> {
        let mut pool = Pool::new();
        pool.extend((0..n).map(|i| Dot { x: i as f32, alive: true }));
        pool
    }

    #[test]
    fn test_destroyed_entities_are_skipped_until_compaction() {
        let mut pool = dots(4);
        if let Some(dot) = pool.iter_mut().nth(1) {
            dot.destroy();
        }
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.slots().len(), 4);
        assert!(pool.iter().all(|d| d.x != 1.0));

        assert_eq!(pool.compact(), 1);
        assert_eq!(pool.slots().len(), 3);
        assert_eq!(pool.compact(), 0);
    }

    #[test]
    fn test_compaction_keeps_order() {
        let mut pool = dots(5);
        for dot in pool.iter_mut().filter(|d| d.x as usize % 2 == 0) {
            dot.destroy();
        }
        pool.compact();
        let xs: Vec<f32> = pool.iter().map(|d| d.x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
    }

    #[test]
    fn test_empty_when_all_dead() {
        let mut pool = dots(2);
        assert!(!pool.is_empty());
        for dot in pool.iter_mut() {
            dot.destroy();
        }
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }
}

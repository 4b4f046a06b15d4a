// path.rs - Parent links and backward path reconstruction

use std::collections::hash_map::Entry;

use nohash_hasher::IntMap;

use crate::grid::{CellKey, Point};

/// Child -> parent links recorded as cells are discovered.
///
/// Each child is linked at most once, so the links always form a tree
/// rooted at the cell the search was seeded with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentMap {
    links: IntMap<CellKey, CellKey>,
}

impl ParentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `parent` for `child`. Returns false if `child` already has one.
    pub fn link(&mut self, child: Point, parent: Point) -> bool {
        match self.links.entry(child.key()) {
            Entry::Vacant(slot) => {
                slot.insert(parent.key());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn parent_of(&self, child: Point) -> Option<Point> {
        self.links.get(&child.key()).map(|key| key.point())
    }

    pub fn contains(&self, child: Point) -> bool {
        self.links.contains_key(&child.key())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }
}

/// Walk the parent links back from `goal` and return origin..=goal.
///
/// An empty result means the goal was never discovered. A map with a cycle
/// cannot come out of the solvers; it is logged and also yields an empty
/// path rather than looping.
pub fn reconstruct_path(parents: &ParentMap, goal: Point) -> Vec<Point> {
    if !parents.contains(goal) {
        return Vec::new();
    }

    let mut path = vec![goal];
    let mut key = goal.key();
    for _ in 0..parents.len() {
        match parents.links.get(&key) {
            Some(&parent) => {
                path.push(parent.point());
                key = parent;
            }
            None => break,
        }
    }

    if parents.links.contains_key(&key) {
        log::warn!("Parent links loop back through {}", key.point());
        return Vec::new();
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: u16, y: u16) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_link_is_write_once() {
        let mut parents = ParentMap::new();
        assert!(parents.link(p(2, 1), p(1, 1)));
        assert!(!parents.link(p(2, 1), p(3, 1)));
        assert_eq!(parents.parent_of(p(2, 1)), Some(p(1, 1)));
        assert_eq!(parents.len(), 1);
    }

    #[test]
    fn test_reconstruct_orders_origin_to_goal() {
        let mut parents = ParentMap::new();
        parents.link(p(2, 1), p(1, 1));
        parents.link(p(3, 1), p(2, 1));
        parents.link(p(3, 2), p(3, 1));
        // a side branch that must not show up
        parents.link(p(1, 2), p(1, 1));

        assert_eq!(
            reconstruct_path(&parents, p(3, 2)),
            vec![p(1, 1), p(2, 1), p(3, 1), p(3, 2)]
        );
    }

    #[test]
    fn test_undiscovered_goal_is_empty() {
        let mut parents = ParentMap::new();
        assert!(reconstruct_path(&parents, p(3, 3)).is_empty());
        parents.link(p(2, 1), p(1, 1));
        assert!(reconstruct_path(&parents, p(3, 3)).is_empty());
        // the origin itself has no parent entry either
        assert!(reconstruct_path(&parents, p(1, 1)).is_empty());
    }

    #[test]
    fn test_single_link_gives_two_points() {
        let mut parents = ParentMap::new();
        parents.link(p(1, 2), p(1, 1));
        assert_eq!(reconstruct_path(&parents, p(1, 2)), vec![p(1, 1), p(1, 2)]);
    }

    #[test]
    fn test_cycle_does_not_hang() {
        let mut parents = ParentMap::new();
        parents.link(p(1, 1), p(2, 1));
        parents.link(p(2, 1), p(1, 1));
        assert!(reconstruct_path(&parents, p(1, 1)).is_empty());
    }
}

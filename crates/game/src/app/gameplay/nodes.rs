use tank_engine::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NodeKind {
    Move,
}

impl NodeKind {
    pub(crate) const ALL: [NodeKind; 1] = [NodeKind::Move];

    pub(crate) const fn index(self) -> usize {
        match self {
            NodeKind::Move => 0,
        }
    }

    pub(crate) const fn texture_key(self) -> &'static str {
        match self {
            NodeKind::Move => "res/lvl/move.png",
        }
    }
}

/// Scripted waypoint for the tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TankNode {
    pub(crate) kind: NodeKind,
    pub(crate) x: i32,
    pub(crate) y: i32,
    /// Degrees.
    pub(crate) orientation: i32,
}

/// Fixed-capacity node list with edge-triggered interactive placement.
#[derive(Debug, Clone)]
pub(crate) struct NodeStore {
    nodes: Vec<TankNode>,
    capacity: usize,
    debounce: bool,
}

impl NodeStore {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::new(),
            capacity,
            debounce: false,
        }
    }

    /// Called once per frame with the trigger state. Places at most one
    /// `Move` node per press; nothing is placed once the store is full.
    pub(crate) fn update_placement(&mut self, trigger_down: bool, cursor: Point) -> bool {
        if !trigger_down {
            self.debounce = false;
            return false;
        }
        if self.debounce || self.nodes.len() >= self.capacity {
            return false;
        }
        self.debounce = true;
        self.nodes.push(TankNode {
            kind: NodeKind::Move,
            x: cursor.x,
            y: cursor.y,
            orientation: 0,
        });
        true
    }

    pub(crate) fn nodes(&self) -> &[TankNode] {
        &self.nodes
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_trigger_places_one_node_per_press() {
        let mut store = NodeStore::new(5);
        let cursor = Point::new(40, 50);

        for _ in 0..10 {
            store.update_placement(true, cursor);
        }
        assert_eq!(store.len(), 1);

        store.update_placement(false, cursor);
        store.update_placement(true, Point::new(7, 8));
        store.update_placement(true, Point::new(9, 9));

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.nodes()[1],
            TankNode {
                kind: NodeKind::Move,
                x: 7,
                y: 8,
                orientation: 0
            }
        );
    }

    #[test]
    fn full_store_ignores_presses() {
        let mut store = NodeStore::new(2);
        for _ in 0..6 {
            store.update_placement(true, Point::new(1, 1));
            store.update_placement(false, Point::new(1, 1));
        }
        assert_eq!(store.len(), 2);
        assert!(!store.update_placement(true, Point::new(1, 1)));
    }

    #[test]
    fn zero_capacity_never_places() {
        let mut store = NodeStore::new(0);
        assert!(!store.update_placement(true, Point::new(0, 0)));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn declared_capacity_is_not_preallocated() {
        let mut store = NodeStore::new(u32::MAX as usize);
        assert!(store.update_placement(true, Point::new(3, 4)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.capacity(), u32::MAX as usize);
    }

    #[test]
    fn release_without_press_changes_nothing() {
        let mut store = NodeStore::new(1);
        assert!(!store.update_placement(false, Point::new(0, 0)));
        assert!(store.update_placement(true, Point::new(0, 0)));
    }
}

//! Red-black tree (CLRS chapter 13) layered on the BST primitives.

use crate::bst::{self, check_inorder, check_links};
use crate::compare::{Comparator, HeapType, NaturalOrder};
use crate::error::TreeError;
use crate::node::{Arena, Color, NodeId};
use crate::render::{self, WalkOrder};
use crate::stats::OpStats;

pub fn rotate_left<T, C>(arena: &mut Arena<T, C>, root: NodeId, x: NodeId) -> NodeId {
    let y = arena.right(x);
    let y_left = arena.left(y);
    arena.set_right(x, y_left);
    if !y_left.is_nil() {
        arena.set_parent(y_left, x);
    }
    let parent = arena.parent(x);
    arena.set_parent(y, parent);
    let root = if parent.is_nil() {
        y
    } else {
        arena.replace_child(parent, x, y);
        root
    };
    arena.set_left(y, x);
    arena.set_parent(x, y);
    root
}

pub fn rotate_right<T, C>(arena: &mut Arena<T, C>, root: NodeId, x: NodeId) -> NodeId {
    let y = arena.left(x);
    let y_right = arena.right(y);
    arena.set_left(x, y_right);
    if !y_right.is_nil() {
        arena.set_parent(y_right, x);
    }
    let parent = arena.parent(x);
    arena.set_parent(y, parent);
    let root = if parent.is_nil() {
        y
    } else {
        arena.replace_child(parent, x, y);
        root
    };
    arena.set_right(y, x);
    arena.set_parent(x, y);
    root
}

fn is_red<T, C>(arena: &Arena<T, C>, id: NodeId) -> bool {
    arena.color(id) == Color::Red
}

fn insert_fixup<T, C>(arena: &mut Arena<T, C>, mut root: NodeId, mut z: NodeId) -> NodeId {
    while is_red(arena, arena.parent(z)) {
        let p = arena.parent(z);
        let g = arena.parent(p);
        if p == arena.left(g) {
            let uncle = arena.right(g);
            if is_red(arena, uncle) {
                arena.set_color(p, Color::Black);
                arena.set_color(uncle, Color::Black);
                arena.set_color(g, Color::Red);
                z = g;
                continue;
            }
            if z == arena.right(p) {
                z = p;
                root = rotate_left(arena, root, z);
            }
            let p = arena.parent(z);
            let g = arena.parent(p);
            arena.set_color(p, Color::Black);
            arena.set_color(g, Color::Red);
            root = rotate_right(arena, root, g);
        } else {
            let uncle = arena.left(g);
            if is_red(arena, uncle) {
                arena.set_color(p, Color::Black);
                arena.set_color(uncle, Color::Black);
                arena.set_color(g, Color::Red);
                z = g;
                continue;
            }
            if z == arena.left(p) {
                z = p;
                root = rotate_right(arena, root, z);
            }
            let p = arena.parent(z);
            let g = arena.parent(p);
            arena.set_color(p, Color::Black);
            arena.set_color(g, Color::Red);
            root = rotate_left(arena, root, g);
        }
    }
    arena.set_color(root, Color::Black);
    root
}

/// Attach the detached node `z` and restore the coloring rules.
pub fn redblack_insert<T, C: Comparator<T>>(arena: &mut Arena<T, C>, root: NodeId, z: NodeId) -> NodeId {
    let root = bst::insert(arena, root, z);
    arena.set_color(z, Color::Red);
    insert_fixup(arena, root, z)
}

/// `x` may be the sentinel, in which case its parent link was set by the
/// transplant that put it in place.
fn delete_fixup<T, C>(arena: &mut Arena<T, C>, mut root: NodeId, mut x: NodeId) -> NodeId {
    while x != root && !is_red(arena, x) {
        let p = arena.parent(x);
        if x == arena.left(p) {
            let mut w = arena.right(p);
            if is_red(arena, w) {
                arena.set_color(w, Color::Black);
                arena.set_color(p, Color::Red);
                root = rotate_left(arena, root, p);
                w = arena.right(arena.parent(x));
            }
            if !is_red(arena, arena.left(w)) && !is_red(arena, arena.right(w)) {
                arena.set_color(w, Color::Red);
                x = arena.parent(x);
            } else {
                if !is_red(arena, arena.right(w)) {
                    let w_left = arena.left(w);
                    arena.set_color(w_left, Color::Black);
                    arena.set_color(w, Color::Red);
                    root = rotate_right(arena, root, w);
                    w = arena.right(arena.parent(x));
                }
                let p = arena.parent(x);
                let p_color = arena.color(p);
                arena.set_color(w, p_color);
                arena.set_color(p, Color::Black);
                let w_right = arena.right(w);
                arena.set_color(w_right, Color::Black);
                root = rotate_left(arena, root, p);
                x = root;
            }
        } else {
            let mut w = arena.left(p);
            if is_red(arena, w) {
                arena.set_color(w, Color::Black);
                arena.set_color(p, Color::Red);
                root = rotate_right(arena, root, p);
                w = arena.left(arena.parent(x));
            }
            if !is_red(arena, arena.right(w)) && !is_red(arena, arena.left(w)) {
                arena.set_color(w, Color::Red);
                x = arena.parent(x);
            } else {
                if !is_red(arena, arena.left(w)) {
                    let w_right = arena.right(w);
                    arena.set_color(w_right, Color::Black);
                    arena.set_color(w, Color::Red);
                    root = rotate_left(arena, root, w);
                    w = arena.left(arena.parent(x));
                }
                let p = arena.parent(x);
                let p_color = arena.color(p);
                arena.set_color(w, p_color);
                arena.set_color(p, Color::Black);
                let w_left = arena.left(w);
                arena.set_color(w_left, Color::Black);
                root = rotate_right(arena, root, p);
                x = root;
            }
        }
    }
    arena.set_color(x, Color::Black);
    root
}

/// Unlink `z`, rebalancing as needed. `z` is left detached but allocated.
pub fn redblack_remove<T, C>(arena: &mut Arena<T, C>, mut root: NodeId, z: NodeId) -> NodeId {
    let z_left = arena.left(z);
    let z_right = arena.right(z);
    let mut removed_color = arena.color(z);
    let x;

    if z_left.is_nil() {
        x = z_right;
        root = bst::transplant(arena, root, z, z_right);
    } else if z_right.is_nil() {
        x = z_left;
        root = bst::transplant(arena, root, z, z_left);
    } else {
        let y = bst::subtree_min(arena, z_right);
        removed_color = arena.color(y);
        x = arena.right(y);
        if arena.parent(y) == z {
            arena.set_parent(x, y);
        } else {
            root = bst::transplant(arena, root, y, x);
            arena.set_right(y, z_right);
            arena.set_parent(z_right, y);
        }
        root = bst::transplant(arena, root, z, y);
        arena.set_left(y, z_left);
        arena.set_parent(z_left, y);
        let z_color = arena.color(z);
        arena.set_color(y, z_color);
    }

    if removed_color == Color::Black {
        root = delete_fixup(arena, root, x);
    }
    arena.set_parent(NodeId::NIL, NodeId::NIL);
    arena.detach(z);
    root
}

/// Check the coloring rules and return the black height of the tree.
fn check_colors<T, C>(arena: &Arena<T, C>, root: NodeId) -> Result<usize, TreeError> {
    if arena.raw(NodeId::NIL).color != Color::Black {
        return Err(TreeError::invariant("rbt", "sentinel is red"));
    }
    if arena.raw(root).color != Color::Black {
        return Err(TreeError::invariant("rbt", format!("root {} is red", root)));
    }
    black_height(arena, root)
}

fn black_height<T, C>(arena: &Arena<T, C>, id: NodeId) -> Result<usize, TreeError> {
    if id.is_nil() {
        return Ok(1);
    }
    let node = arena.raw(id);
    if node.color == Color::Red {
        for child in [node.left, node.right] {
            if arena.raw(child).color == Color::Red {
                return Err(TreeError::invariant(
                    "rbt",
                    format!("red node {} has red child {}", id, child),
                ));
            }
        }
    }
    let left = black_height(arena, node.left)?;
    let right = black_height(arena, node.right)?;
    if left != right {
        return Err(TreeError::invariant(
            "rbt",
            format!("black heights differ below {}: {} vs {}", id, left, right),
        ));
    }
    Ok(left + usize::from(node.color == Color::Black))
}

/// Self-balancing search tree; height stays within 2·log2(n+1).
pub struct RedBlackTree<T, C = NaturalOrder> {
    arena: Arena<T, C>,
    root: NodeId,
    size: usize,
}

impl<T: Ord> RedBlackTree<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> RedBlackTree<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_order(cmp, HeapType::Min)
    }

    pub fn with_order(cmp: C, heap_type: HeapType) -> Self {
        Self {
            arena: Arena::new(cmp, heap_type),
            root: NodeId::NIL,
            size: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> NodeId {
        let node = self.arena.alloc(value);
        self.root = redblack_insert(&mut self.arena, self.root, node);
        self.size += 1;
        node
    }

    /// # Panics
    /// If `node` is not a live node of this tree.
    pub fn remove(&mut self, node: NodeId) -> T {
        assert!(self.arena.contains(node), "node {} is not in this tree", node);
        self.root = redblack_remove(&mut self.arena, self.root, node);
        self.size -= 1;
        self.arena.free(node)
    }

    pub fn search(&self, value: &T) -> Option<NodeId> {
        bst::search(&self.arena, self.root, value)
    }

    pub fn min(&self) -> Option<NodeId> {
        bst::min(&self.arena, self.root)
    }

    pub fn max(&self) -> Option<NodeId> {
        bst::max(&self.arena, self.root)
    }

    pub fn value(&self, node: NodeId) -> &T {
        self.arena.value(node)
    }

    /// Full structural check. Returns the black height (sentinels count).
    pub fn validate(&self) -> Result<usize, TreeError> {
        let count = check_links(&self.arena, self.root, "rbt")?;
        if count != self.size {
            return Err(TreeError::invariant(
                "rbt",
                format!("{} reachable nodes but size is {}", count, self.size),
            ));
        }
        check_inorder(&self.arena, self.root, "rbt")?;
        check_colors(&self.arena, self.root)
    }
}

impl<T, C> RedBlackTree<T, C> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn arena(&self) -> &Arena<T, C> {
        &self.arena
    }

    pub fn color(&self, node: NodeId) -> Color {
        self.arena.raw(node).color
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        fn depth<T, C>(arena: &Arena<T, C>, id: NodeId) -> usize {
            if id.is_nil() {
                return 0;
            }
            let node = arena.raw(id);
            1 + depth(arena, node.left).max(depth(arena, node.right))
        }
        depth(&self.arena, self.root)
    }

    pub fn walk(&self, order: WalkOrder) -> Vec<&T> {
        render::walk(&self.arena, self.root, order)
            .into_iter()
            .map(|id| render::value_of(&self.arena, id))
            .collect()
    }

    pub fn stats(&self) -> OpStats {
        self.arena.stats()
    }

    pub fn reset_stats(&self) {
        self.arena.reset_stats();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tree_of(values: &[i32]) -> RedBlackTree<i32> {
        let mut t = RedBlackTree::new();
        for &v in values {
            t.insert(v);
        }
        t
    }

    fn tuple(t: &RedBlackTree<i32>) -> String {
        render::tuple(t.arena(), t.root(), &|v: &i32| v.to_string(), true)
    }

    #[test]
    #[should_panic(expected = "not in this tree")]
    fn removing_a_handle_from_another_tree_panics() {
        let a = tree_of(&[1, 2]);
        let mut b = tree_of(&[50, 60]);
        b.remove(a.search(&1).unwrap());
    }

    #[test]
    #[should_panic(expected = "not in this tree")]
    fn removing_a_stale_handle_panics() {
        let mut t = tree_of(&[1, 2, 3]);
        let stale = t.search(&2).unwrap();
        t.remove(stale);
        t.insert(9);
        t.remove(stale);
    }

    #[test]
    fn zig_zag_insert_rotates_twice() {
        let t = tree_of(&[50, 25, 40]);
        assert_eq!(tuple(&t), "[40 b [25 r NIL NIL] [50 r NIL NIL]]");
        assert_eq!(t.validate().unwrap(), 2);
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let t = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            tuple(&t),
            "[2 b [1 b NIL NIL] [4 r [3 b NIL NIL] [6 b [5 r NIL NIL] [7 r NIL NIL]]]]"
        );
        t.validate().unwrap();
    }

    #[test]
    fn delete_recolors_through_red_sibling() {
        let mut t = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        let n = t.search(&1).unwrap();
        assert_eq!(t.remove(n), 1);
        assert_eq!(
            tuple(&t),
            "[4 b [2 b NIL [3 r NIL NIL]] [6 b [5 r NIL NIL] [7 r NIL NIL]]]"
        );
        t.validate().unwrap();
        // The sentinel's parent is scratch space only.
        assert!(t.arena().raw(NodeId::NIL).parent.is_nil());
    }

    #[test]
    fn remove_everything() {
        let mut t = tree_of(&[8, 3, 10, 1, 6, 14, 4, 7, 13]);
        while let Some(n) = t.min() {
            t.remove(n);
            t.validate().unwrap();
        }
        assert!(t.is_empty());
        assert_eq!(tuple(&t), "NIL");
    }

    #[test]
    fn height_stays_logarithmic() {
        let t = tree_of(&(0..1024).collect::<Vec<_>>());
        // 2 * log2(1025) < 21
        assert!(t.height() <= 20, "height {}", t.height());
    }

    #[test]
    fn equal_keys_come_out_in_insertion_order() {
        let mut t = RedBlackTree::with_comparator(|a: &(u32, u32), b: &(u32, u32)| a.0.cmp(&b.0));
        for i in 0..20 {
            t.insert((i % 3, i));
        }
        let mut out = Vec::new();
        while let Some(n) = t.min() {
            out.push(t.remove(n));
        }
        let mut expected: Vec<(u32, u32)> = (0..20).map(|i| (i % 3, i)).collect();
        expected.sort_by_key(|&(k, _)| k);
        assert_eq!(out, expected);
    }

    #[test]
    fn max_orientation() {
        let mut t = RedBlackTree::with_order(NaturalOrder, HeapType::Max);
        for v in [4, 8, 1, 9, 3] {
            t.insert(v);
        }
        t.validate().unwrap();
        let n = t.min().unwrap();
        assert_eq!(t.remove(n), 9);
        let n = t.min().unwrap();
        assert_eq!(t.remove(n), 8);
    }

    #[test]
    fn random_insert_remove_keeps_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut t = RedBlackTree::new();
        let mut shadow: Vec<i32> = Vec::new();
        for step in 0..3_000 {
            if shadow.is_empty() || rng.gen_bool(0.55) {
                let v = rng.gen_range(0..500);
                t.insert(v);
                shadow.push(v);
            } else {
                let v = shadow.swap_remove(rng.gen_range(0..shadow.len()));
                let n = t.search(&v).unwrap();
                assert_eq!(t.remove(n), v);
            }
            if step % 50 == 0 {
                t.validate().unwrap();
            }
        }
        t.validate().unwrap();
        shadow.sort();
        let walked: Vec<i32> = t.walk(WalkOrder::In).into_iter().copied().collect();
        assert_eq!(walked, shadow);
    }

    #[test]
    fn rotations_are_counted() {
        let t = tree_of(&[1, 2, 3]);
        let stats = t.stats();
        assert!(stats.writes.color > 0);
        assert!(stats.writes.parent > 0);
        assert!(stats.compares > 0);
        t.reset_stats();
        assert_eq!(t.stats(), OpStats::default());
    }
}

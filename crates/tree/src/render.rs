//! Debug renderings of arena trees: walks, nested tuples, edge lists and
//! Graphviz DOT.
//!
//! Everything here reads nodes directly and leaves the operation counters
//! untouched.

use std::fmt::Write as _;

use crate::node::{Arena, Color, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    Pre,
    In,
    Post,
}

pub(crate) fn value_of<T, C>(arena: &Arena<T, C>, id: NodeId) -> &T {
    arena
        .raw(id)
        .value
        .as_ref()
        .expect("walk reached a node without a value")
}

/// Node ids of the subtree at `root` in the requested order.
///
/// Iterative, so degenerate (list-shaped) trees do not blow the stack.
pub fn walk<T, C>(arena: &Arena<T, C>, root: NodeId, order: WalkOrder) -> Vec<NodeId> {
    let mut out = Vec::new();
    if root.is_nil() {
        return out;
    }
    match order {
        WalkOrder::Pre => {
            let mut stack = vec![root];
            while let Some(n) = stack.pop() {
                out.push(n);
                let node = arena.raw(n);
                if !node.right.is_nil() {
                    stack.push(node.right);
                }
                if !node.left.is_nil() {
                    stack.push(node.left);
                }
            }
        }
        WalkOrder::In => {
            let mut stack = Vec::new();
            let mut cur = root;
            while !cur.is_nil() || !stack.is_empty() {
                while !cur.is_nil() {
                    stack.push(cur);
                    cur = arena.raw(cur).left;
                }
                if let Some(n) = stack.pop() {
                    out.push(n);
                    cur = arena.raw(n).right;
                }
            }
        }
        WalkOrder::Post => {
            // Root-right-left pre-order, reversed.
            let mut stack = vec![root];
            while let Some(n) = stack.pop() {
                out.push(n);
                let node = arena.raw(n);
                if !node.left.is_nil() {
                    stack.push(node.left);
                }
                if !node.right.is_nil() {
                    stack.push(node.right);
                }
            }
            out.reverse();
        }
    }
    out
}

/// Nested `[value color left right]` form, `NIL` for empty subtrees.
/// The color tag is included only when `colored` is set.
pub fn tuple<T, C>(
    arena: &Arena<T, C>,
    root: NodeId,
    label: &dyn Fn(&T) -> String,
    colored: bool,
) -> String {
    let mut out = String::new();
    write_tuple(arena, root, label, colored, &mut out);
    out
}

fn write_tuple<T, C>(
    arena: &Arena<T, C>,
    id: NodeId,
    label: &dyn Fn(&T) -> String,
    colored: bool,
    out: &mut String,
) {
    if id.is_nil() {
        out.push_str("NIL");
        return;
    }
    let node = arena.raw(id);
    out.push('[');
    out.push_str(&label(value_of(arena, id)));
    if colored {
        out.push(' ');
        out.push_str(node.color.tag());
    }
    out.push(' ');
    write_tuple(arena, node.left, label, colored, out);
    out.push(' ');
    write_tuple(arena, node.right, label, colored, out);
    out.push(']');
}

/// Parent-to-child edges in pre-order, labelled `<id>.<value>`.
pub fn links<T, C>(arena: &Arena<T, C>, root: NodeId, label: &dyn Fn(&T) -> String) -> Vec<(String, String)> {
    let name = |id: NodeId| format!("{}.{}", id.index(), label(value_of(arena, id)));
    let mut edges = Vec::new();
    for n in walk(arena, root, WalkOrder::Pre) {
        let node = arena.raw(n);
        for child in [node.left, node.right] {
            if !child.is_nil() {
                edges.push((name(n), name(child)));
            }
        }
    }
    edges
}

/// Graphviz description of the tree. Red nodes are drawn red when `colored`.
pub fn dot<T, C>(
    arena: &Arena<T, C>,
    root: NodeId,
    graph_name: &str,
    label: &dyn Fn(&T) -> String,
    colored: bool,
) -> String {
    let mut out = format!("digraph {} {{\n", graph_name);
    for n in walk(arena, root, WalkOrder::Pre) {
        let node = arena.raw(n);
        let color = if colored && node.color == Color::Red { "red" } else { "black" };
        let _ = writeln!(
            out,
            "  {} [label=\"{}\" color={}];",
            n.index(),
            escape(&label(value_of(arena, n))),
            color
        );
        for child in [node.left, node.right] {
            if !child.is_nil() {
                let _ = writeln!(out, "  {} -> {};", n.index(), child.index());
            }
        }
    }
    out.push('}');
    out
}

pub(crate) fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{HeapType, NaturalOrder};
    use crate::node::tests::link;

    fn small() -> (Arena<i32, NaturalOrder>, NodeId) {
        let mut arena = Arena::new(NaturalOrder, HeapType::Min);
        let a = arena.alloc(2);
        let b = arena.alloc(1);
        let c = arena.alloc(3);
        link(&mut arena, a, b, c);
        arena.set_color(b, Color::Red);
        (arena, a)
    }

    #[test]
    fn walks_are_counter_free() {
        let (arena, root) = small();
        arena.reset_stats();
        let ids = walk(&arena, root, WalkOrder::In);
        let values: Vec<i32> = ids.iter().map(|&id| *value_of(&arena, id)).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(arena.stats().total_reads(), 0);
    }

    #[test]
    fn tuple_with_and_without_color() {
        let (arena, root) = small();
        let label = |v: &i32| v.to_string();
        assert_eq!(tuple(&arena, root, &label, false), "[2 [1 NIL NIL] [3 NIL NIL]]");
        assert_eq!(tuple(&arena, root, &label, true), "[2 b [1 r NIL NIL] [3 b NIL NIL]]");
        assert_eq!(tuple(&arena, NodeId::NIL, &label, true), "NIL");
    }

    #[test]
    fn links_and_dot() {
        let (arena, root) = small();
        let label = |v: &i32| v.to_string();
        assert_eq!(
            links(&arena, root, &label),
            vec![("1.2".to_string(), "2.1".to_string()), ("1.2".to_string(), "3.3".to_string())]
        );

        let dot = dot(&arena, root, "Red_Black_Tree", &label, true);
        assert!(dot.starts_with("digraph Red_Black_Tree {\n"));
        assert!(dot.contains("  1 [label=\"2\" color=black];"));
        assert!(dot.contains("  2 [label=\"1\" color=red];"));
        assert!(dot.contains("  1 -> 2;"));
        assert!(dot.contains("  1 -> 3;"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn dot_escapes_quotes() {
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
    }
}

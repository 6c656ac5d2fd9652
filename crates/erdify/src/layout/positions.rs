//! Entity placement.
//!
//! Entities are placed by a breadth-first walk over a directed graph that
//! holds two edges per resolved relationship: `entity1 -> entity2` with the
//! relationship's hint and `entity2 -> entity1` with the mirrored hint. Each
//! newly reached entity is offset from the entity it was reached from; the
//! first position assigned to an entity is final.

use std::collections::VecDeque;

use log::{debug, trace};
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use erdify_core::{
    geometry::{Bounds, Point},
    semantic::LayoutHint,
};

use super::Spacing;
use crate::session::Session;

/// Relationship hints between entities, indexed by entity position.
struct HintGraph {
    graph: DiGraph<usize, LayoutHint>,
    nodes: Vec<NodeIndex>,
    vertical_root: Option<usize>,
}

impl HintGraph {
    fn from_session(session: &Session) -> Self {
        let count = session.entities().len();
        let mut graph = DiGraph::with_capacity(count, session.relationships().len() * 2);
        let nodes: Vec<NodeIndex> = (0..count).map(|position| graph.add_node(position)).collect();
        let mut vertical_root = None;

        for rel in session.resolved_relationships() {
            let hint = rel.relationship.layout();
            graph.add_edge(nodes[rel.entity1], nodes[rel.entity2], hint);
            graph.add_edge(nodes[rel.entity2], nodes[rel.entity1], hint.mirror());

            if vertical_root.is_none() && hint.is_vertical() {
                vertical_root = Some(rel.entity1);
            }
        }

        Self {
            graph,
            nodes,
            vertical_root,
        }
    }

    /// Returns the traversal root.
    ///
    /// The `entity1` of the first vertical relationship wins; otherwise the
    /// first entity. There is no root without any resolved relationship.
    fn root(&self) -> Option<usize> {
        if self.graph.edge_count() == 0 {
            return None;
        }
        self.vertical_root.or(Some(0))
    }

    /// Outgoing hints of `entity`, in the order the relationships were added.
    fn neighbors(&self, entity: usize) -> Vec<(usize, LayoutHint)> {
        let mut neighbors: Vec<_> = self
            .graph
            .edges_directed(self.nodes[entity], Direction::Outgoing)
            .map(|edge| (self.graph[edge.target()], *edge.weight()))
            .collect();
        // petgraph lists the most recently added edge first.
        neighbors.reverse();
        neighbors
    }
}

/// Computes one position per entity, in entity order.
///
/// `max_visits_per_entity` bounds the traversal to that many queue pops per
/// entity. Entities the traversal does not reach are laid out on a row
/// `row_gap` vertical steps below everything placed so far, or along the
/// x axis from the origin when nothing was placed.
pub(super) fn entity_positions(
    session: &Session,
    spacing: Spacing,
    max_visits_per_entity: usize,
    row_gap: f64,
) -> Vec<Point> {
    let count = session.entities().len();
    if count == 0 {
        return Vec::new();
    }

    let hints = HintGraph::from_session(session);
    let mut positions: Vec<Option<Point>> = vec![None; count];

    if let Some(root) = hints.root() {
        trace!(root; "Placing entities from root");
        positions[root] = Some(Point::new(0.0, 0.0));

        let mut queue = VecDeque::from([root]);
        let max_visits = count * max_visits_per_entity;
        let mut visits = 0;

        while visits < max_visits {
            let Some(current) = queue.pop_front() else {
                break;
            };
            visits += 1;

            let Some(origin) = positions[current] else {
                continue;
            };
            for (target, hint) in hints.neighbors(current) {
                if positions[target].is_some() {
                    continue;
                }
                let (dx, dy) = hint.offset(spacing.horizontal(), spacing.vertical());
                positions[target] = Some(origin.translate(dx, dy));
                queue.push_back(target);
            }
        }

        if !queue.is_empty() {
            debug!(visits, pending = queue.len(); "Entity traversal stopped at visit limit");
        }
    }

    let (start_x, row_y) = match Bounds::enclosing(positions.iter().flatten().copied()) {
        Some(bounds) => (
            bounds.min_x(),
            bounds.max_y() + row_gap * spacing.vertical(),
        ),
        None => (0.0, 0.0),
    };

    let mut column = 0;
    positions
        .into_iter()
        .map(|position| {
            position.unwrap_or_else(|| {
                let point = Point::new(start_x + column as f64 * spacing.horizontal(), row_y);
                column += 1;
                point
            })
        })
        .collect()
}

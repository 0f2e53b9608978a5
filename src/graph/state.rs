//! Taxonomy graph state on top of `egui_graphs`.
//!
//! Layout and node dragging belong to the widget's force-directed layout.
//! The app decides when links appear and which nodes stay pinned.

use super::taxonomy::{Link, Taxonomy};
use eframe::egui::{Color32, Pos2};
use egui_graphs::Graph;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Undirected;
use std::collections::HashMap;
use std::f32::consts::PI;
use std::time::Duration;

/// Links join the graph this long after the first frame.
pub const LINK_DELAY: Duration = Duration::from_millis(400);

/// How long the layout keeps animating after the last change.
pub const SETTLE_TIME: Duration = Duration::from_secs(4);

/// Radius scale of the initial spiral.
const INITIAL_RADIUS: f32 = 10.0;

/// Node payload is the taxon name, edge payload the link strength.
pub type TaxonomyGraph = Graph<&'static str, f32, Undirected>;

/// Fill state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeTint {
    #[default]
    Default,
    Pinned,
    Released,
}

pub struct GraphState {
    graph: TaxonomyGraph,
    nodes: Vec<NodeIndex>,
    pending_links: Vec<Link>,
    attached_links: usize,
    pins: HashMap<NodeIndex, Pos2>,
    tints: HashMap<NodeIndex, NodeTint>,
    dragged: Option<NodeIndex>,
    started_at: Option<Duration>,
    last_change: Duration,
}

impl Default for GraphState {
    fn default() -> Self {
        Self::new(Taxonomy::default())
    }
}

impl GraphState {
    /// Places the nodes on a phyllotaxis spiral. Links are held back until
    /// `LINK_DELAY` after the first `advance`.
    pub fn new(taxonomy: Taxonomy) -> Self {
        let mut stable = StableGraph::<&'static str, f32, Undirected>::default();
        let nodes: Vec<NodeIndex> = taxonomy
            .labels
            .iter()
            .map(|&label| stable.add_node(label))
            .collect();

        let mut graph = TaxonomyGraph::from(&stable);
        let golden_angle = PI * (3.0 - 5f32.sqrt());
        for (i, (&idx, &label)) in nodes.iter().zip(&taxonomy.labels).enumerate() {
            let radius = INITIAL_RADIUS * (0.5 + i as f32).sqrt();
            let angle = i as f32 * golden_angle;
            if let Some(node) = graph.node_mut(idx) {
                node.set_label(label.to_string());
                node.set_location(Pos2::new(radius * angle.cos(), radius * angle.sin()));
            }
        }

        Self {
            graph,
            nodes,
            pending_links: taxonomy.links,
            attached_links: 0,
            pins: HashMap::new(),
            tints: HashMap::new(),
            dragged: None,
            started_at: None,
            last_change: Duration::ZERO,
        }
    }

    pub fn graph(&self) -> &TaxonomyGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut TaxonomyGraph {
        &mut self.graph
    }

    #[cfg(test)]
    fn node_indices(&self) -> &[NodeIndex] {
        &self.nodes
    }

    pub fn attached_links(&self) -> usize {
        self.attached_links
    }

    pub fn tint(&self, idx: NodeIndex) -> NodeTint {
        self.tints.get(&idx).copied().unwrap_or_default()
    }

    #[cfg(test)]
    fn is_pinned(&self, idx: NodeIndex) -> bool {
        self.pins.contains_key(&idx)
    }

    /// Node the widget currently reports as dragged.
    pub fn dragged_node(&self) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .copied()
            .find(|&idx| self.graph.node(idx).is_some_and(|node| node.dragged()))
    }

    /// Fills every node with the colour of its tint.
    pub fn color_nodes(&mut self, color: impl Fn(NodeTint) -> Color32) {
        for &idx in &self.nodes {
            let tint = self.tint(idx);
            if let Some(node) = self.graph.node_mut(idx) {
                node.set_color(color(tint));
            }
        }
    }

    /// Whether the layout still wants frames.
    pub fn is_active(&self, now: Duration) -> bool {
        !self.pending_links.is_empty()
            || self.dragged.is_some()
            || now < self.last_change + SETTLE_TIME
    }

    /// Attaches the links once their delay has passed.
    pub fn advance(&mut self, now: Duration) {
        let started_at = match self.started_at {
            Some(started_at) => started_at,
            None => {
                self.started_at = Some(now);
                self.last_change = now;
                now
            }
        };
        if self.pending_links.is_empty() || now < started_at + LINK_DELAY {
            return;
        }

        for link in std::mem::take(&mut self.pending_links) {
            let (Some(&source), Some(&target)) =
                (self.nodes.get(link.source), self.nodes.get(link.target))
            else {
                continue;
            };
            self.graph.add_edge(source, target, link.strength);
            self.attached_links += 1;
        }
        self.last_change = now;
        log::debug!("Graph links attached ({})", self.attached_links);
    }

    /// Feeds the node the widget reports as dragged this frame.
    ///
    /// A drag start tints the node. A drag end pins it where it was dropped.
    pub fn observe_drag(&mut self, dragged: Option<NodeIndex>, now: Duration) {
        if dragged != self.dragged {
            if let Some(previous) = self.dragged {
                if let Some(node) = self.graph.node(previous) {
                    self.pins.insert(previous, node.location());
                }
            }
            if let Some(idx) = dragged {
                self.tints.insert(idx, NodeTint::Pinned);
            }
            self.dragged = dragged;
        }

        if self.dragged.is_some() {
            self.last_change = now;
        }
    }

    /// Unpins a node and lets the layout move it again.
    pub fn release(&mut self, idx: NodeIndex, now: Duration) {
        if !self.nodes.contains(&idx) {
            return;
        }
        self.pins.remove(&idx);
        self.tints.insert(idx, NodeTint::Released);
        self.last_change = now;
    }

    /// Puts pinned nodes back where they were dropped.
    pub fn apply_pins(&mut self) {
        for (&idx, &location) in &self.pins {
            if Some(idx) == self.dragged {
                continue;
            }
            if let Some(node) = self.graph.node_mut(idx) {
                node.set_location(location);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn location(state: &GraphState, idx: NodeIndex) -> Pos2 {
        state.graph().node(idx).unwrap().location()
    }

    #[test]
    fn test_nodes_start_on_a_spiral() {
        let state = GraphState::default();
        assert_eq!(state.node_indices().len(), 11);

        let first = location(&state, state.node_indices()[0]);
        assert!((first.x - 10.0 * 0.5f32.sqrt()).abs() < 1e-5);
        assert!(first.y.abs() < 1e-5);

        let second = location(&state, state.node_indices()[1]);
        assert!((second.to_vec2().length() - 10.0 * 1.5f32.sqrt()).abs() < 1e-4);

        let label = state.graph().node(state.node_indices()[1]).unwrap().label();
        assert_eq!(label, "dog");
    }

    #[test]
    fn test_links_attach_after_delay() {
        let mut state = GraphState::default();
        state.advance(ms(1000));
        state.advance(ms(1399));
        assert_eq!(state.attached_links(), 0);
        assert!(state.is_active(ms(1399)));

        state.advance(ms(1400));
        assert_eq!(state.attached_links(), 14);

        // Attaching is one-off
        state.advance(ms(5000));
        assert_eq!(state.attached_links(), 14);
    }

    #[test]
    fn test_layout_settles_after_last_change() {
        let mut state = GraphState::default();
        state.advance(ms(0));
        state.advance(ms(400));

        assert!(state.is_active(ms(400) + SETTLE_TIME - ms(1)));
        assert!(!state.is_active(ms(400) + SETTLE_TIME));
    }

    #[test]
    fn test_drag_pins_where_dropped() {
        let mut state = GraphState::default();
        let idx = state.node_indices()[2];

        state.observe_drag(Some(idx), ms(0));
        assert_eq!(state.tint(idx), NodeTint::Pinned);
        assert!(state.is_active(ms(60_000)));

        let dropped = Pos2::new(50.0, -40.0);
        state.graph_mut().node_mut(idx).unwrap().set_location(dropped);
        state.observe_drag(None, ms(100));
        assert!(state.is_pinned(idx));

        // The layout pushes it away; the pin brings it back
        state
            .graph_mut()
            .node_mut(idx)
            .unwrap()
            .set_location(Pos2::new(0.0, 0.0));
        state.apply_pins();
        assert_eq!(location(&state, idx), dropped);
    }

    #[test]
    fn test_release_unpins_and_retints() {
        let mut state = GraphState::default();
        let idx = state.node_indices()[4];

        state.observe_drag(Some(idx), ms(0));
        state.observe_drag(None, ms(10));
        state.release(idx, ms(20));

        assert!(!state.is_pinned(idx));
        assert_eq!(state.tint(idx), NodeTint::Released);

        let moved = Pos2::new(7.0, 7.0);
        state.graph_mut().node_mut(idx).unwrap().set_location(moved);
        state.apply_pins();
        assert_eq!(location(&state, idx), moved);
    }

    #[test]
    fn test_drag_moves_between_nodes() {
        let mut state = GraphState::default();
        let a = state.node_indices()[0];
        let b = state.node_indices()[1];

        state.observe_drag(Some(a), ms(0));
        state.observe_drag(Some(b), ms(10));

        assert!(state.is_pinned(a));
        assert!(!state.is_pinned(b));
        assert_eq!(state.tint(a), NodeTint::Pinned);
        assert_eq!(state.tint(b), NodeTint::Pinned);
        assert_eq!(state.tint(state.node_indices()[3]), NodeTint::Default);
    }

    #[test]
    fn test_node_colors_follow_tints() {
        let mut state = GraphState::default();
        let idx = state.node_indices()[5];
        state.observe_drag(Some(idx), ms(0));
        state.observe_drag(None, ms(10));

        state.color_nodes(|tint| match tint {
            NodeTint::Pinned => Color32::RED,
            _ => Color32::GRAY,
        });

        let color = |i: NodeIndex| state.graph().node(i).and_then(|n| n.color());
        assert_eq!(color(idx), Some(Color32::RED));
        assert_eq!(color(state.node_indices()[0]), Some(Color32::GRAY));
        assert_eq!(state.dragged_node(), None);
    }
}

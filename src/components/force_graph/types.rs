use std::collections::HashSet;

use crate::survivor::{Graph, Node, NodeId, PathReport, ProjectionMode};

const SEASON_NODE_RADIUS: f64 = 12.0;
const BASE_PLAYER_RADIUS: f64 = 6.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	pub label: Option<String>,
	pub detail: String,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: NodeId,
	pub target: NodeId,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Converts a built graph into what the canvas draws.
	pub fn from_graph(graph: &Graph, mode: ProjectionMode) -> Self {
		let nodes = graph
			.nodes
			.iter()
			.map(|node| GraphNode {
				id: node.id(),
				label: label(node),
				detail: node.detail(),
				color: color(node, mode),
				radius: radius(node, mode),
			})
			.collect();
		let links = graph
			.links
			.iter()
			.map(|link| GraphLink {
				source: link.source.clone(),
				target: link.target.clone(),
			})
			.collect();
		Self { nodes, links }
	}
}

/// Season nodes and multi-season players get a permanent label; everyone else shows on hover.
fn label(node: &Node) -> Option<String> {
	match node {
		Node::Season { .. } => Some(node.id().to_string()),
		Node::Player { name, seasons, .. } if seasons.len() > 1 => Some(name.clone()),
		Node::Player { .. } => None,
	}
}

fn color(node: &Node, mode: ProjectionMode) -> String {
	match (node, mode) {
		(Node::Season { season, .. }, ProjectionMode::Season) => {
			format!("hsl({}, 70%, 50%)", (season % 12) * 30)
		}
		(Node::Season { .. }, ProjectionMode::Player) => "#4CAF50".into(),
		(Node::Player { seasons, .. }, _) => match seasons.len() {
			0 | 1 => "#00ff00",
			2 => "#ffff00",
			3 => "#ff7f00",
			_ => "#ff0000",
		}
		.into(),
	}
}

fn radius(node: &Node, mode: ProjectionMode) -> f64 {
	match (node, mode) {
		(Node::Season { .. }, ProjectionMode::Season) => SEASON_NODE_RADIUS / 2.0,
		(Node::Season { .. }, ProjectionMode::Player) => SEASON_NODE_RADIUS,
		(Node::Player { seasons, .. }, _) => {
			let extra = seasons.len().saturating_sub(1) as f64 * 2.0;
			(BASE_PLAYER_RADIUS + extra).min(SEASON_NODE_RADIUS)
		}
	}
}

/// What the canvas should emphasise besides hover.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
	pub selected: Option<NodeId>,
	pub path_nodes: HashSet<NodeId>,
	pub path_edges: HashSet<(NodeId, NodeId)>,
}

impl Highlight {
	pub fn new(selected: Option<NodeId>, report: Option<&PathReport>) -> Self {
		let mut highlight = Self {
			selected,
			..Self::default()
		};
		for path in report.map(|r| r.paths.as_slice()).unwrap_or(&[]) {
			highlight.path_nodes.extend(path.iter().cloned());
			for pair in path.windows(2) {
				highlight.path_edges.insert(edge_key(&pair[0], &pair[1]));
			}
		}
		highlight
	}

	pub fn on_path(&self, a: &NodeId, b: &NodeId) -> bool {
		self.path_edges.contains(&edge_key(a, b))
	}
}

fn edge_key(a: &NodeId, b: &NodeId) -> (NodeId, NodeId) {
	if a <= b {
		(a.clone(), b.clone())
	} else {
		(b.clone(), a.clone())
	}
}

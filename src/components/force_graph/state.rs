use std::collections::{HashMap, HashSet};
use std::f64::consts::TAU;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::types::{GraphData, GraphNode, Highlight};
use crate::survivor::{LayoutParams, NodeId};

/// Extra pick radius around each node, in graph units.
pub const HIT_PADDING: f64 = 4.0;
/// Pointer travel below this many pixels counts as a click rather than a drag.
const CLICK_SLOP: f64 = 3.0;
const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 10.0;
/// Zoom level a selection is brought up to when the view centres on it.
const FOCUS_ZOOM: f64 = 2.0;

/// What the canvas knows about a node besides its position.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub id: NodeId,
	pub label: Option<String>,
	pub detail: String,
	pub color: String,
	pub radius: f64,
}

impl From<&GraphNode> for NodeInfo {
	fn from(node: &GraphNode) -> Self {
		Self {
			id: node.id.clone(),
			label: node.label.clone(),
			detail: node.detail.clone(),
			color: node.color.clone(),
			radius: node.radius,
		}
	}
}

/// Screen = graph * k + (x, y).
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	fn centred(width: f64, height: f64) -> Self {
		Self {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	pub fn to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zooms by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = k;
	}

	fn look_at(&mut self, gx: f64, gy: f64, width: f64, height: f64) {
		self.k = self.k.max(FOCUS_ZOOM);
		self.x = width / 2.0 - gx * self.k;
		self.y = height / 2.0 - gy * self.k;
	}
}

/// The pointer interaction in progress.
#[derive(Clone, Copy, Debug, Default)]
pub enum Gesture {
	#[default]
	Idle,
	/// A node is pinned under the pointer until release.
	Node {
		idx: DefaultNodeIdx,
		origin: (f64, f64),
		node_origin: (f32, f32),
	},
	Pan {
		origin: (f64, f64),
		view_origin: (f64, f64),
	},
}

#[derive(Clone, Debug)]
struct Focus {
	node: DefaultNodeIdx,
	neighbors: HashSet<DefaultNodeIdx>,
}

impl Focus {
	fn covers(&self, idx: DefaultNodeIdx) -> bool {
		self.node == idx || self.neighbors.contains(&idx)
	}
}

/// Hover glow: a short delay, an eased rise, and a fade-out that keeps the
/// last neighbourhood lit until it reaches zero.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	focus: Option<Focus>,
	fading: Option<Focus>,
	/// Glow strength in `0..=1`.
	pub level: f64,
	delay: f64,
	/// Last pointer position in screen space.
	pub pointer: (f64, f64),
}

impl HoverState {
	const DELAY: f64 = 0.08;
	const RISE: f64 = 1.8;
	const FALL: f64 = 1.26;

	/// Node under the pointer right now.
	pub fn node(&self) -> Option<DefaultNodeIdx> {
		self.focus.as_ref().map(|f| f.node)
	}

	fn focuses(&self) -> impl Iterator<Item = &Focus> {
		self.focus.iter().chain(self.fading.iter())
	}

	/// Whether anything is lit, including a fading neighbourhood.
	pub fn active(&self) -> bool {
		self.focus.is_some() || self.fading.is_some()
	}

	/// Whether `idx` is the hovered node, or was and is fading.
	pub fn is_node(&self, idx: DefaultNodeIdx) -> bool {
		self.focuses().any(|f| f.node == idx)
	}

	/// Whether `idx` is the hovered node or one of its neighbours.
	pub fn touches(&self, idx: DefaultNodeIdx) -> bool {
		self.focuses().any(|f| f.covers(idx))
	}

	fn set(&mut self, next: Option<Focus>) {
		self.fading = match (self.focus.take(), &next) {
			(Some(prev), None) => Some(prev),
			(None, Some(_)) => {
				self.delay = 0.0;
				None
			}
			_ => None,
		};
		self.focus = next;
	}

	fn advance(&mut self, dt: f64) {
		if self.focus.is_some() {
			self.delay = (self.delay + dt).min(Self::DELAY);
			if self.delay >= Self::DELAY {
				self.level += (1.0 - self.level) * Self::RISE * dt;
			}
		} else {
			self.level -= self.level * Self::FALL * dt;
			if self.level < 0.01 {
				self.level = 0.0;
				self.fading = None;
			}
		}
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub gesture: Gesture,
	pub hover: HoverState,
	pub highlight: Highlight,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	/// Seconds of simulation, drives the path-edge dash animation.
	pub flow_time: f64,
	index_of: HashMap<NodeId, DefaultNodeIdx>,
	neighbors: HashMap<DefaultNodeIdx, HashSet<DefaultNodeIdx>>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let sim = Simulation::build(data, width.min(height) / 3.0, &HashMap::new());
		Self {
			graph: sim.graph,
			transform: ViewTransform::centred(width, height),
			gesture: Gesture::Idle,
			hover: HoverState::default(),
			highlight: Highlight::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
			index_of: sim.index_of,
			neighbors: sim.neighbors,
		}
	}

	/// Swaps in a freshly built graph. Nodes that survive keep their position.
	pub fn replace_data(&mut self, data: &GraphData) {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		let kept = data.nodes.iter().filter(|n| positions.contains_key(&n.id)).count();
		debug!("canvas: new graph, {} of {} nodes keep their position", kept, data.nodes.len());

		let sim = Simulation::build(data, self.width.min(self.height) / 3.0, &positions);
		self.graph = sim.graph;
		self.index_of = sim.index_of;
		self.neighbors = sim.neighbors;
		self.gesture = Gesture::Idle;
		self.hover = HoverState {
			pointer: self.hover.pointer,
			..HoverState::default()
		};
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.transform.to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if dx.hypot(dy) < node.data.user_data.radius + HIT_PADDING {
				found = Some(node.index());
			}
		});
		found
	}

	fn with_node<T>(&self, idx: DefaultNodeIdx, f: impl Fn(f32, f32, &NodeInfo) -> T) -> Option<T> {
		let mut out = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				out = Some(f(node.x(), node.y(), &node.data.user_data));
			}
		});
		out
	}

	fn set_anchor(&mut self, idx: DefaultNodeIdx, anchored: bool, at: Option<(f32, f32)>) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				if let Some((x, y)) = at {
					node.data.x = x;
					node.data.y = y;
				}
				node.data.is_anchor = anchored;
			}
		});
	}

	/// Identity and hover text of a node.
	pub fn node_info(&self, idx: DefaultNodeIdx) -> Option<NodeInfo> {
		self.with_node(idx, |_, _, info| info.clone())
	}

	/// Brings `id` to the middle of the canvas, zooming in if needed.
	pub fn center_on(&mut self, id: &NodeId) {
		let Some(&idx) = self.index_of.get(id) else {
			return;
		};
		if let Some((x, y)) = self.with_node(idx, |x, y, _| (x as f64, y as f64)) {
			self.transform.look_at(x, y, self.width, self.height);
		}
	}

	/// Mouse button down: grab the node under the pointer, or start panning.
	pub fn press(&mut self, sx: f64, sy: f64) {
		self.gesture = match self.node_at_position(sx, sy) {
			Some(idx) => {
				let node_origin = self.with_node(idx, |x, y, _| (x, y)).unwrap_or_default();
				self.set_anchor(idx, true, None);
				Gesture::Node {
					idx,
					origin: (sx, sy),
					node_origin,
				}
			}
			None => Gesture::Pan {
				origin: (sx, sy),
				view_origin: (self.transform.x, self.transform.y),
			},
		};
	}

	/// Pointer moved: update hover, then follow the active gesture.
	pub fn move_to(&mut self, sx: f64, sy: f64) {
		self.hover.pointer = (sx, sy);
		match self.gesture {
			Gesture::Idle => {
				let hovered = self.node_at_position(sx, sy);
				self.set_hover(hovered);
			}
			Gesture::Node {
				idx,
				origin,
				node_origin,
			} => {
				let k = self.transform.k;
				let at = (
					node_origin.0 + ((sx - origin.0) / k) as f32,
					node_origin.1 + ((sy - origin.1) / k) as f32,
				);
				self.set_anchor(idx, true, Some(at));
			}
			Gesture::Pan {
				origin,
				view_origin,
			} => {
				self.transform.x = view_origin.0 + (sx - origin.0);
				self.transform.y = view_origin.1 + (sy - origin.1);
			}
		}
	}

	/// Ends the gesture. Returns the new selection if the release was a click:
	/// `Some(Some(id))` on a node, `Some(None)` on empty canvas.
	pub fn release(&mut self, at: Option<(f64, f64)>) -> Option<Option<NodeId>> {
		let is_click = |origin: (f64, f64)| {
			at.is_some_and(|(x, y)| (x - origin.0).hypot(y - origin.1) < CLICK_SLOP)
		};
		match std::mem::take(&mut self.gesture) {
			Gesture::Idle => None,
			Gesture::Node { idx, origin, .. } => {
				self.set_anchor(idx, false, None);
				is_click(origin).then(|| self.node_info(idx).map(|info| info.id))
			}
			Gesture::Pan { origin, .. } => is_click(origin).then_some(None),
		}
	}

	/// Pointer left the canvas.
	pub fn leave(&mut self) {
		if let Gesture::Node { idx, .. } = std::mem::take(&mut self.gesture) {
			self.set_anchor(idx, false, None);
		}
		self.set_hover(None);
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node() == node {
			return;
		}
		let focus = node.map(|idx| Focus {
			node: idx,
			neighbors: self.neighbors.get(&idx).cloned().unwrap_or_default(),
		});
		self.hover.set(focus);
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;
		self.hover.advance(dt as f64);
	}

	/// Keeps the view centred when the canvas changes size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

struct Simulation {
	graph: ForceGraph<NodeInfo, ()>,
	index_of: HashMap<NodeId, DefaultNodeIdx>,
	neighbors: HashMap<DefaultNodeIdx, HashSet<DefaultNodeIdx>>,
}

impl Simulation {
	/// New nodes start on a circle of radius `spread`; known ones where they were.
	fn build(data: &GraphData, spread: f64, positions: &HashMap<NodeId, (f32, f32)>) -> Self {
		let layout = LayoutParams::default();
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: layout.force_charge,
			force_spring: layout.force_spring,
			force_max: layout.force_max,
			node_speed: layout.node_speed,
			damping_factor: layout.damping_factor,
		});
		let count = data.nodes.len().max(1) as f64;

		let mut index_of = HashMap::with_capacity(data.nodes.len());
		for (i, node) in data.nodes.iter().enumerate() {
			let (x, y) = positions.get(&node.id).copied().unwrap_or_else(|| {
				let angle = i as f64 * TAU / count;
				((spread * angle.cos()) as f32, (spread * angle.sin()) as f32)
			});
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo::from(node),
			});
			index_of.insert(node.id.clone(), idx);
		}

		let mut neighbors: HashMap<DefaultNodeIdx, HashSet<DefaultNodeIdx>> = HashMap::new();
		for link in &data.links {
			let (Some(&a), Some(&b)) = (index_of.get(&link.source), index_of.get(&link.target)) else {
				continue;
			};
			graph.add_edge(a, b, EdgeData::default());
			neighbors.entry(a).or_default().insert(b);
			neighbors.entry(b).or_default().insert(a);
		}

		Self {
			graph,
			index_of,
			neighbors,
		}
	}
}

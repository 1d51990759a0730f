//! All-shortest-paths search: BFS distance labelling, then DFS enumeration.

use std::collections::{HashMap, VecDeque};

use log::debug;

use super::graph::{Graph, NodeId, Shared};

/// Node identities from start to end, no repeats.
pub type Path = Vec<NodeId>;

/// Undirected adjacency, neighbours in link insertion order.
#[derive(Debug, Default)]
pub struct Adjacency<'g> {
	neighbors: HashMap<&'g NodeId, Vec<&'g NodeId>>,
}

impl<'g> Adjacency<'g> {
	/// Builds the adjacency from every link of `graph`. Parallel links collapse into one edge.
	pub fn new(graph: &'g Graph) -> Self {
		let mut neighbors: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
		for link in &graph.links {
			if link.source == link.target {
				continue;
			}
			let forward = neighbors.entry(&link.source).or_default();
			if !forward.contains(&&link.target) {
				forward.push(&link.target);
			}
			let backward = neighbors.entry(&link.target).or_default();
			if !backward.contains(&&link.source) {
				backward.push(&link.source);
			}
		}
		Self { neighbors }
	}

	/// Neighbours of `id`, empty for isolated or unknown nodes.
	pub fn neighbors(&self, id: &NodeId) -> &[&'g NodeId] {
		self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Hop distances from `start`. Stops once `stop_at` is dequeued, if given.
	pub fn distances(&self, start: &'g NodeId, stop_at: Option<&NodeId>) -> HashMap<&'g NodeId, usize> {
		let mut distances = HashMap::from([(start, 0)]);
		let mut queue = VecDeque::from([start]);

		while let Some(current) = queue.pop_front() {
			if Some(current) == stop_at {
				break;
			}
			let next = distances[current] + 1;
			for &neighbor in self.neighbors(current) {
				if !distances.contains_key(neighbor) {
					distances.insert(neighbor, next);
					queue.push_back(neighbor);
				}
			}
		}
		distances
	}
}

/// Every minimum-hop path from `start` to `end`, in DFS discovery order.
///
/// `None` when either endpoint is missing or the two are disconnected.
/// Identical endpoints give the single one-node path.
pub fn find_all_shortest_paths(graph: &Graph, start: &NodeId, end: &NodeId) -> Option<Vec<Path>> {
	if !graph.contains(start) || !graph.contains(end) {
		return None;
	}
	if start == end {
		return Some(vec![vec![start.clone()]]);
	}

	let adjacency = Adjacency::new(graph);
	// Distances key on graph-owned ids; a start with no links cannot reach anything.
	let start = adjacency
		.neighbors
		.keys()
		.copied()
		.find(|id| *id == start)?;
	let distances = adjacency.distances(start, Some(end));
	let shortest = *distances.get(end)?;

	let mut paths = Vec::new();
	let mut current = vec![start];
	extend(&adjacency, &distances, end, shortest, &mut current, &mut paths);

	debug!(
		"{} -> {}: {} shortest paths of {} hops",
		start,
		end,
		paths.len(),
		shortest
	);
	Some(paths)
}

fn extend<'g>(
	adjacency: &Adjacency<'g>,
	distances: &HashMap<&'g NodeId, usize>,
	end: &NodeId,
	shortest: usize,
	path: &mut Vec<&'g NodeId>,
	found: &mut Vec<Path>,
) {
	let depth = path.len() - 1;
	if depth > shortest {
		return;
	}
	let Some(&current) = path.last() else {
		return;
	};
	if current == end {
		if depth == shortest {
			found.push(path.iter().map(|&id| id.clone()).collect());
		}
		return;
	}

	for &neighbor in adjacency.neighbors(current) {
		if distances.get(neighbor) == Some(&(depth + 1)) {
			path.push(neighbor);
			extend(adjacency, distances, end, shortest, path, found);
			path.pop();
		}
	}
}

/// Outcome of a path query, ready for the summary panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathReport {
	/// All shortest paths, in discovery order.
	pub paths: Vec<Path>,
	/// Hop count shared by every path.
	pub hops: usize,
}

impl PathReport {
	/// Wraps a non-empty path set.
	pub fn new(paths: Vec<Path>) -> Option<Self> {
		let hops = paths.first()?.len().saturating_sub(1);
		Some(Self { paths, hops })
	}

	/// "Found N path(s)".
	pub fn headline(&self) -> String {
		let count = self.paths.len();
		format!("Found {} path{}", count, if count == 1 { "" } else { "s" })
	}

	/// Whether `id` lies on any of the paths.
	pub fn contains_node(&self, id: &NodeId) -> bool {
		self.paths.iter().any(|path| path.contains(id))
	}

	/// Whether `a` and `b` are consecutive on any path, in either order.
	pub fn contains_edge(&self, a: &NodeId, b: &NodeId) -> bool {
		self.paths.iter().any(|path| {
			path.windows(2)
				.any(|w| (w[0] == *a && w[1] == *b) || (w[0] == *b && w[1] == *a))
		})
	}
}

/// One entry of a rendered path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
	/// Text shown for the node.
	pub label: String,
	/// What links this node to the next one; `None` on the last step.
	pub via: Option<Shared>,
}

/// Renders a path for display.
///
/// Condensed endpoints show the queried player's name instead of the season label.
pub fn describe_path(
	graph: &Graph,
	path: &[NodeId],
	start: (&NodeId, &str),
	end: (&NodeId, &str),
) -> Vec<PathStep> {
	path.iter()
		.enumerate()
		.map(|(i, id)| {
			let label = if id.is_season() && id == start.0 {
				start.1.to_owned()
			} else if id.is_season() && id == end.0 {
				end.1.to_owned()
			} else {
				id.to_string()
			};
			let via = path
				.get(i + 1)
				.and_then(|next| graph.link_between(id, next))
				.map(|link| link.shared.clone());
			PathStep { label, via }
		})
		.collect()
}

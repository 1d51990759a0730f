//! Longest shortest path ("degrees of separation") across the whole graph.

use std::collections::{HashMap, VecDeque};

use log::debug;

use super::builder::build;
use super::config::GraphConfig;
use super::dataset::Dataset;
use super::graph::{Graph, NodeId};
use super::paths::{Adjacency, Path};

/// The pairs whose shortest connection is longest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diameter {
	/// Hop count of the longest shortest path.
	pub hops: usize,
	/// One representative shortest path per maximal pair.
	pub paths: Vec<Path>,
	/// Number of connected pairs examined.
	pub connected_pairs: usize,
	/// How often each node is an endpoint of a maximal pair, most frequent first.
	pub endpoint_counts: Vec<(NodeId, usize)>,
	/// How often each node lies strictly inside a maximal path, most frequent first.
	pub intermediate_counts: Vec<(NodeId, usize)>,
}

/// Degrees of separation between every pair of players.
///
/// Always measured on the uncondensed player projection, whatever view is on
/// screen, so single-season players count as endpoints too.
pub fn degrees_of_separation(dataset: &Dataset) -> Option<Diameter> {
	let graph = build(dataset, &GraphConfig::default().with_condensed(false));
	longest_shortest_paths(&graph)
}

/// Finds the longest shortest paths between player nodes.
///
/// Graphs without player nodes (season-centric) use every node instead.
/// `None` when no two candidates are connected.
pub fn longest_shortest_paths(graph: &Graph) -> Option<Diameter> {
	let players: Vec<NodeId> = graph
		.nodes
		.iter()
		.filter(|node| !node.is_season())
		.map(|node| node.id())
		.collect();
	let candidates: Vec<NodeId> = if players.is_empty() {
		graph.nodes.iter().map(|node| node.id()).collect()
	} else {
		players
	};

	let adjacency = Adjacency::new(graph);
	let mut best = 0;
	let mut paths: Vec<Path> = Vec::new();
	let mut connected_pairs = 0;

	for (i, start) in candidates.iter().enumerate() {
		let parents = bfs_parents(&adjacency, start);
		for end in &candidates[i + 1..] {
			let Some(path) = walk_back(&parents, start, end) else {
				continue;
			};
			connected_pairs += 1;
			let hops = path.len() - 1;
			if hops > best {
				best = hops;
				paths.clear();
			}
			if hops == best {
				paths.push(path);
			}
		}
	}

	if connected_pairs == 0 {
		return None;
	}

	let endpoint_counts = ranked(paths.iter().flat_map(|path| [path.first(), path.last()]).flatten());
	let intermediate_counts = ranked(
		paths
			.iter()
			.flat_map(|path| path.get(1..path.len().saturating_sub(1)).unwrap_or(&[])),
	);

	debug!(
		"diameter: {} hops across {} pairs ({} connected)",
		best,
		paths.len(),
		connected_pairs
	);

	Some(Diameter {
		hops: best,
		paths,
		connected_pairs,
		endpoint_counts,
		intermediate_counts,
	})
}

/// Occurrence counts, most frequent first, ties by id.
fn ranked<'a>(ids: impl Iterator<Item = &'a NodeId>) -> Vec<(NodeId, usize)> {
	let mut counts: HashMap<&NodeId, usize> = HashMap::new();
	for id in ids {
		*counts.entry(id).or_default() += 1;
	}
	let mut ranked: Vec<(NodeId, usize)> = counts.into_iter().map(|(id, n)| (id.clone(), n)).collect();
	ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
	ranked
}

fn bfs_parents(adjacency: &Adjacency<'_>, start: &NodeId) -> HashMap<NodeId, Option<NodeId>> {
	let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::from([(start.clone(), None)]);
	let mut queue = VecDeque::from([start.clone()]);
	while let Some(current) = queue.pop_front() {
		for &neighbor in adjacency.neighbors(&current) {
			if !parents.contains_key(neighbor) {
				parents.insert(neighbor.clone(), Some(current.clone()));
				queue.push_back(neighbor.clone());
			}
		}
	}
	parents
}

fn walk_back(parents: &HashMap<NodeId, Option<NodeId>>, start: &NodeId, end: &NodeId) -> Option<Path> {
	let mut path = vec![end.clone()];
	let mut cursor = parents.get(end)?;
	while let Some(prev) = cursor {
		path.push(prev.clone());
		cursor = parents.get(prev)?;
	}
	path.reverse();
	(path.first() == Some(start)).then_some(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::survivor::builder::build;
	use crate::survivor::config::{GraphConfig, ProjectionMode};
	use crate::survivor::dataset::Dataset;

	#[test]
	fn chain_diameter_is_its_length() {
		let dataset = Dataset::from_players([
			("A", vec![1, 2]),
			("B", vec![2, 3]),
			("C", vec![3, 4]),
			("D", vec![4, 5]),
		]);
		let graph = build(&dataset, &GraphConfig::default());
		let diameter = longest_shortest_paths(&graph).unwrap();
		assert_eq!(diameter.hops, 3);
		assert_eq!(diameter.connected_pairs, 6);
		assert_eq!(
			diameter.paths,
			vec![vec![
				NodeId::player("A"),
				NodeId::player("B"),
				NodeId::player("C"),
				NodeId::player("D"),
			]]
		);
		assert_eq!(
			diameter.endpoint_counts,
			vec![(NodeId::player("A"), 1), (NodeId::player("D"), 1)]
		);
		assert_eq!(
			diameter.intermediate_counts,
			vec![(NodeId::player("B"), 1), (NodeId::player("C"), 1)]
		);
	}

	#[test]
	fn separation_counts_single_season_players() {
		let dataset = Dataset::from_players([
			("A", vec![1, 2]),
			("B", vec![2, 3]),
			("C", vec![3]),
			("E", vec![1]),
		]);
		let condensed = longest_shortest_paths(&build(&dataset, &GraphConfig::default())).unwrap();
		assert_eq!(condensed.hops, 1);

		let separation = degrees_of_separation(&dataset).unwrap();
		assert_eq!(separation.hops, 3);
		assert_eq!(
			separation.paths,
			vec![vec![
				NodeId::player("C"),
				NodeId::player("B"),
				NodeId::player("A"),
				NodeId::player("E"),
			]]
		);
		assert_eq!(
			separation.endpoint_counts,
			vec![(NodeId::player("C"), 1), (NodeId::player("E"), 1)]
		);
		assert_eq!(
			separation.intermediate_counts,
			vec![(NodeId::player("A"), 1), (NodeId::player("B"), 1)]
		);
	}

	#[test]
	fn separation_of_strangers_is_none() {
		let dataset = Dataset::from_players([("A", vec![1]), ("B", vec![2]), ("C", vec![3])]);
		assert!(degrees_of_separation(&dataset).is_none());
		assert!(degrees_of_separation(&Dataset::default()).is_none());
	}

	#[test]
	fn disconnected_pairs_are_ignored() {
		let dataset = Dataset::from_players([("A", vec![1, 2]), ("B", vec![2, 3]), ("Z", vec![8, 9])]);
		let graph = build(&dataset, &GraphConfig::default());
		let diameter = longest_shortest_paths(&graph).unwrap();
		assert_eq!(diameter.hops, 1);
		assert_eq!(diameter.connected_pairs, 1);
	}

	#[test]
	fn season_graphs_use_season_nodes() {
		let dataset = Dataset::from_players([("A", vec![1, 2]), ("B", vec![2, 3]), ("C", vec![3])]);
		let graph = build(&dataset, &GraphConfig::default().with_mode(ProjectionMode::Season));
		let diameter = longest_shortest_paths(&graph).unwrap();
		assert_eq!(diameter.hops, 2);
		assert_eq!(diameter.paths[0].first(), Some(&NodeId::Season(1)));
	}

	#[test]
	fn nothing_connected_is_none() {
		let dataset = Dataset::from_players([("A", vec![1, 2]), ("B", vec![3, 4])]);
		let graph = build(&dataset, &GraphConfig::default());
		assert!(longest_shortest_paths(&graph).is_none());
		assert!(longest_shortest_paths(&Graph::default()).is_none());
	}
}

use std::collections::{BTreeSet, HashMap, HashSet};

use proptest::prelude::*;
use std::sync::Arc;

use survivor_graph::survivor::{
	Dataset, Explorer, Graph, GraphConfig, Node, NodeId, ProjectionMode, SeasonMembers, build,
	find_all_shortest_paths,
};

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
	prop::collection::vec(prop::collection::vec(1u32..7, 0..4), 0..10).prop_map(|players| {
		Dataset::from_players(
			players
				.into_iter()
				.enumerate()
				.map(|(i, seasons)| (format!("P{}", i), seasons)),
		)
	})
}

fn config_strategy() -> impl Strategy<Value = GraphConfig> {
	prop_oneof![
		Just(GraphConfig::default()),
		Just(GraphConfig::default().with_condensed(false)),
		Just(GraphConfig::default().with_mode(ProjectionMode::Season)),
	]
}

fn neighbors(graph: &Graph) -> HashMap<NodeId, BTreeSet<NodeId>> {
	let mut map: HashMap<NodeId, BTreeSet<NodeId>> = HashMap::new();
	for link in &graph.links {
		map.entry(link.source.clone()).or_default().insert(link.target.clone());
		map.entry(link.target.clone()).or_default().insert(link.source.clone());
	}
	map
}

/// Every simple path from `start` to `end`, by exhaustive search.
fn all_simple_paths(graph: &Graph, start: &NodeId, end: &NodeId) -> Vec<Vec<NodeId>> {
	fn walk(
		adj: &HashMap<NodeId, BTreeSet<NodeId>>,
		end: &NodeId,
		path: &mut Vec<NodeId>,
		out: &mut Vec<Vec<NodeId>>,
	) {
		let current = path.last().unwrap().clone();
		if current == *end {
			out.push(path.clone());
			return;
		}
		for next in adj.get(&current).into_iter().flatten() {
			if !path.contains(next) {
				path.push(next.clone());
				walk(adj, end, path, out);
				path.pop();
			}
		}
	}
	let adj = neighbors(graph);
	let mut out = Vec::new();
	walk(&adj, end, &mut vec![start.clone()], &mut out);
	out
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn links_are_weighted_and_loop_free(dataset in dataset_strategy(), config in config_strategy()) {
		let graph = build(&dataset, &config);
		for link in &graph.links {
			prop_assert!(link.weight() >= 1);
			prop_assert_eq!(link.weight(), link.shared.len());
			prop_assert_ne!(&link.source, &link.target);
			prop_assert!(graph.contains(&link.source));
			prop_assert!(graph.contains(&link.target));
		}
	}

	#[test]
	fn node_ids_are_unique(dataset in dataset_strategy(), config in config_strategy()) {
		let graph = build(&dataset, &config);
		let ids: HashSet<NodeId> = graph.nodes.iter().map(Node::id).collect();
		prop_assert_eq!(ids.len(), graph.nodes.len());
	}

	#[test]
	fn each_pair_linked_at_most_once(dataset in dataset_strategy(), config in config_strategy()) {
		let graph = build(&dataset, &config);
		let mut pairs = HashSet::new();
		for link in &graph.links {
			let key = if link.source <= link.target {
				(link.source.clone(), link.target.clone())
			} else {
				(link.target.clone(), link.source.clone())
			};
			prop_assert!(pairs.insert(key));
		}
	}

	#[test]
	fn season_mode_has_one_node_per_season(dataset in dataset_strategy()) {
		let graph = build(&dataset, &GraphConfig::default().with_mode(ProjectionMode::Season));
		let seasons: BTreeSet<u32> = dataset
			.players
			.values()
			.flat_map(|p| p.seasons.iter().copied())
			.collect();
		prop_assert_eq!(graph.nodes.len(), seasons.len());
		prop_assert!(graph.nodes.iter().all(Node::is_season));
		for link in &graph.links {
			let reverse = graph.link_between(&link.target, &link.source).unwrap();
			prop_assert_eq!(reverse.weight(), link.weight());
		}
	}

	#[test]
	fn player_mode_never_links_two_seasons(dataset in dataset_strategy()) {
		let graph = build(&dataset, &GraphConfig::default());
		for link in &graph.links {
			prop_assert!(!(link.source.is_season() && link.target.is_season()));
		}
	}

	#[test]
	fn condensed_groups_partition_single_season_players(dataset in dataset_strategy()) {
		let graph = build(&dataset, &GraphConfig::default());
		let mut grouped = Vec::new();
		for node in &graph.nodes {
			match node {
				Node::Season { season, members: SeasonMembers::Condensed(players), .. } => {
					for name in players {
						prop_assert_eq!(dataset.player(name).unwrap().seasons.as_slice(), &[*season][..]);
						grouped.push(name.clone());
					}
				}
				Node::Season { .. } => prop_assert!(false, "season-centric node in player mode"),
				Node::Player { seasons, .. } => prop_assert!(seasons.len() > 1),
			}
		}
		let unique: BTreeSet<&String> = grouped.iter().collect();
		prop_assert_eq!(unique.len(), grouped.len());
		let expected: BTreeSet<&String> = dataset
			.players
			.iter()
			.filter(|(_, p)| p.seasons.len() == 1)
			.map(|(name, _)| name)
			.collect();
		prop_assert_eq!(unique, expected);
	}

	#[test]
	fn uncondensed_has_a_node_per_player(dataset in dataset_strategy()) {
		let graph = build(&dataset, &GraphConfig::default().with_condensed(false));
		let placed = dataset.players.values().filter(|p| !p.seasons.is_empty()).count();
		prop_assert_eq!(graph.nodes.len(), placed);
		for (name, record) in &dataset.players {
			prop_assert_eq!(graph.contains(&NodeId::player(name.as_str())), !record.seasons.is_empty());
		}
	}

	#[test]
	fn offered_lookups_always_find_a_node(dataset in dataset_strategy(), config in config_strategy()) {
		let explorer = Explorer::new(Arc::new(dataset), config);
		if explorer.player_lookups() {
			for (name, record) in &explorer.dataset().players {
				if !record.seasons.is_empty() {
					prop_assert!(explorer.graph().contains(&explorer.display_id(name)));
				}
			}
		}
	}

	#[test]
	fn build_is_deterministic(dataset in dataset_strategy(), config in config_strategy()) {
		prop_assert_eq!(build(&dataset, &config), build(&dataset, &config));
	}

	#[test]
	fn node_to_itself_is_single_node_path(dataset in dataset_strategy(), config in config_strategy()) {
		let graph = build(&dataset, &config);
		for node in &graph.nodes {
			let id = node.id();
			prop_assert_eq!(find_all_shortest_paths(&graph, &id, &id), Some(vec![vec![id.clone()]]));
		}
	}

	#[test]
	fn shortest_paths_match_brute_force(dataset in dataset_strategy(), config in config_strategy()) {
		let graph = build(&dataset, &config);
		// keep the exhaustive search cheap
		prop_assume!(graph.nodes.len() <= 8);
		let ids: Vec<NodeId> = graph.nodes.iter().map(Node::id).collect();
		for start in &ids {
			for end in &ids {
				if start == end {
					continue;
				}
				let found = find_all_shortest_paths(&graph, start, end);
				let brute = all_simple_paths(&graph, start, end);
				let Some(min) = brute.iter().map(Vec::len).min() else {
					prop_assert_eq!(found, None);
					continue;
				};
				let expected: BTreeSet<Vec<NodeId>> =
					brute.into_iter().filter(|p| p.len() == min).collect();
				let found = found.unwrap();
				prop_assert!(found.iter().all(|p| p.len() == min));
				prop_assert!(found.iter().all(|p| p.first() == Some(start) && p.last() == Some(end)));
				let unique: BTreeSet<Vec<NodeId>> = found.iter().cloned().collect();
				prop_assert_eq!(unique.len(), found.len());
				prop_assert_eq!(unique, expected);
			}
		}
	}
}

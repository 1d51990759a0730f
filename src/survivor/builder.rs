//! Turns a dataset into a node/link graph under a projection.

use std::collections::{BTreeMap, HashSet};

use log::info;

use super::config::{GraphConfig, ProjectionMode};
use super::dataset::{Dataset, Season};
use super::graph::{Graph, Link, Node, NodeId, SeasonMembers, Shared};

/// Builds the graph for `config`. Pure and total: an empty dataset gives an empty graph.
pub fn build(dataset: &Dataset, config: &GraphConfig) -> Graph {
	let graph = match config.mode {
		ProjectionMode::Season => build_season_centric(dataset),
		ProjectionMode::Player => build_player_centric(dataset, config.condensed),
	};
	info!(
		"built {:?} graph (condensed: {}): {} nodes, {} links",
		config.mode,
		config.condensed,
		graph.nodes.len(),
		graph.links.len()
	);
	graph
}

/// Maps a player name to the node that represents it under `config`.
///
/// Single-season players resolve to their season node whenever the
/// projection folds them into one. Every name-to-node lookup goes through here.
pub fn resolve_display_id(dataset: &Dataset, config: &GraphConfig, name: &str) -> NodeId {
	if config.folds_single_season_players() {
		if let Some(season) = dataset.player(name).and_then(|p| p.single_season()) {
			return NodeId::Season(season);
		}
	}
	NodeId::player(name)
}

/// Season to the players who appeared in it, in dataset order.
pub fn season_index(dataset: &Dataset) -> BTreeMap<Season, Vec<String>> {
	let mut index: BTreeMap<Season, Vec<String>> = BTreeMap::new();
	for (name, record) in &dataset.players {
		for &season in &record.seasons {
			let members = index.entry(season).or_default();
			if !members.contains(name) {
				members.push(name.clone());
			}
		}
	}
	index
}

fn build_season_centric(dataset: &Dataset) -> Graph {
	let index = season_index(dataset);

	let nodes: Vec<Node> = index
		.iter()
		.map(|(&season, members)| Node::Season {
			season,
			members: SeasonMembers::Total(members.len()),
			logo_url: dataset.logo(season).map(str::to_owned),
		})
		.collect();

	let seasons: Vec<(&Season, &Vec<String>)> = index.iter().collect();
	let mut links = Vec::new();
	for (i, (season_a, members_a)) in seasons.iter().enumerate() {
		for (season_b, members_b) in &seasons[i + 1..] {
			let other: HashSet<&String> = members_b.iter().collect();
			let shared: Vec<String> = members_a
				.iter()
				.filter(|name| other.contains(name))
				.cloned()
				.collect();
			if !shared.is_empty() {
				links.push(Link {
					source: NodeId::Season(**season_a),
					target: NodeId::Season(**season_b),
					shared: Shared::Players(shared),
				});
			}
		}
	}

	Graph { nodes, links }
}

fn build_player_centric(dataset: &Dataset, condensed: bool) -> Graph {
	let mut nodes = Vec::new();
	let mut single: BTreeMap<Season, Vec<String>> = BTreeMap::new();

	for (name, record) in &dataset.players {
		match record.seasons.len() {
			0 => continue,
			1 => single
				.entry(record.seasons[0])
				.or_default()
				.push(name.clone()),
			_ => nodes.push(player_node(name, &record.seasons, &record.image_url)),
		}
	}

	if condensed {
		for (season, players) in single {
			nodes.push(Node::Season {
				season,
				members: SeasonMembers::Condensed(players),
				logo_url: dataset.logo(season).map(str::to_owned),
			});
		}
	} else {
		for (name, record) in &dataset.players {
			if record.seasons.len() == 1 {
				nodes.push(player_node(name, &record.seasons, &record.image_url));
			}
		}
	}

	let mut links = Vec::new();
	for (i, a) in nodes.iter().enumerate() {
		for b in &nodes[i + 1..] {
			if let Some(shared) = shared_seasons(a, b) {
				links.push(Link {
					source: a.id(),
					target: b.id(),
					shared: Shared::Seasons(shared),
				});
			}
		}
	}

	Graph { nodes, links }
}

fn player_node(name: &str, seasons: &[Season], image_url: &Option<String>) -> Node {
	Node::Player {
		name: name.to_owned(),
		seasons: seasons.to_vec(),
		image_url: image_url.clone(),
	}
}

/// Seasons two player-centric nodes have in common; `None` when they must not be linked.
fn shared_seasons(a: &Node, b: &Node) -> Option<Vec<Season>> {
	let shared = match (a, b) {
		(Node::Season { .. }, Node::Season { .. }) => return None,
		(Node::Season { season, .. }, Node::Player { seasons, .. })
		| (Node::Player { seasons, .. }, Node::Season { season, .. }) => {
			if seasons.contains(season) {
				vec![*season]
			} else {
				Vec::new()
			}
		}
		(Node::Player { seasons: first, .. }, Node::Player { seasons: second, .. }) => {
			let mut shared: Vec<Season> = Vec::new();
			for season in first {
				if second.contains(season) && !shared.contains(season) {
					shared.push(*season);
				}
			}
			shared
		}
	};
	(!shared.is_empty()).then_some(shared)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fixture() -> Dataset {
		Dataset::from_players([("A", vec![1, 2]), ("B", vec![2, 3]), ("C", vec![3])])
	}

	fn ids(graph: &Graph) -> Vec<String> {
		graph.nodes.iter().map(|n| n.id().to_string()).collect()
	}

	#[test]
	fn season_centric_scenario() {
		let config = GraphConfig::default().with_mode(ProjectionMode::Season);
		let graph = build(&fixture(), &config);

		assert_eq!(ids(&graph), vec!["Season 1", "Season 2", "Season 3"]);
		assert_eq!(graph.links.len(), 2);

		let one_two = graph
			.link_between(&NodeId::Season(1), &NodeId::Season(2))
			.unwrap();
		assert_eq!(one_two.weight(), 1);
		assert_eq!(one_two.shared, Shared::Players(vec!["A".into()]));

		let two_three = graph
			.link_between(&NodeId::Season(2), &NodeId::Season(3))
			.unwrap();
		assert_eq!(two_three.shared, Shared::Players(vec!["B".into()]));

		assert!(graph.link_between(&NodeId::Season(1), &NodeId::Season(3)).is_none());
	}

	#[test]
	fn season_nodes_carry_member_counts_and_logos() {
		let mut dataset = fixture();
		dataset.season_logos.insert(2, "logo-2".into());
		let graph = build(&dataset, &GraphConfig::default().with_mode(ProjectionMode::Season));
		assert_eq!(
			graph.node(&NodeId::Season(2)),
			Some(&Node::Season {
				season: 2,
				members: SeasonMembers::Total(2),
				logo_url: Some("logo-2".into()),
			})
		);
		match graph.node(&NodeId::Season(1)) {
			Some(Node::Season { logo_url, .. }) => assert!(logo_url.is_none()),
			other => panic!("unexpected node {:?}", other),
		}
	}

	#[test]
	fn player_centric_uncondensed_has_one_node_per_player() {
		let graph = build(&fixture(), &GraphConfig::default().with_condensed(false));
		assert_eq!(ids(&graph), vec!["A", "B", "C"]);
		assert_eq!(graph.links.len(), 2);
		assert_eq!(
			graph
				.link_between(&NodeId::player("A"), &NodeId::player("B"))
				.unwrap()
				.shared,
			Shared::Seasons(vec![2])
		);
		assert!(graph
			.link_between(&NodeId::player("A"), &NodeId::player("C"))
			.is_none());
	}

	#[test]
	fn player_centric_condensed_folds_single_season_players() {
		let dataset = Dataset::from_players([
			("A", vec![1, 2]),
			("B", vec![2, 3]),
			("C", vec![3]),
			("D", vec![3]),
			("E", vec![1]),
		]);
		let graph = build(&dataset, &GraphConfig::default());

		assert_eq!(ids(&graph), vec!["A", "B", "Season 1", "Season 3"]);
		assert_eq!(
			graph.node(&NodeId::Season(3)).map(|n| match n {
				Node::Season { members, .. } => members.clone(),
				_ => unreachable!(),
			}),
			Some(SeasonMembers::Condensed(vec!["C".into(), "D".into()]))
		);
		assert!(!graph.contains(&NodeId::player("C")));

		assert!(graph.link_between(&NodeId::player("A"), &NodeId::Season(1)).is_some());
		assert!(graph.link_between(&NodeId::player("B"), &NodeId::Season(3)).is_some());
		assert!(graph.link_between(&NodeId::player("A"), &NodeId::Season(3)).is_none());
		assert!(graph.link_between(&NodeId::Season(1), &NodeId::Season(3)).is_none());
	}

	#[test]
	fn season_nodes_never_link_in_player_mode() {
		let dataset = Dataset::from_players([("X", vec![1]), ("Y", vec![1]), ("Z", vec![2])]);
		let graph = build(&dataset, &GraphConfig::default());
		assert_eq!(graph.nodes.len(), 2);
		assert!(graph.links.is_empty());
	}

	#[test]
	fn player_links_keep_first_players_order() {
		let dataset = Dataset::from_players([("A", vec![9, 4, 2]), ("B", vec![2, 4, 7])]);
		let graph = build(&dataset, &GraphConfig::default());
		let link = graph
			.link_between(&NodeId::player("A"), &NodeId::player("B"))
			.unwrap();
		assert_eq!(link.shared, Shared::Seasons(vec![4, 2]));
		assert_eq!(link.weight(), 2);
	}

	#[test]
	fn empty_season_lists_are_skipped() {
		let mut dataset = fixture();
		dataset.players.insert("Ghost".into(), Default::default());
		for config in [
			GraphConfig::default(),
			GraphConfig::default().with_condensed(false),
			GraphConfig::default().with_mode(ProjectionMode::Season),
		] {
			let graph = build(&dataset, &config);
			assert!(!graph.contains(&NodeId::player("Ghost")));
		}
	}

	#[test]
	fn empty_dataset_gives_empty_graph() {
		let graph = build(&Dataset::default(), &GraphConfig::default());
		assert!(graph.is_empty());
		assert!(graph.links.is_empty());
	}

	#[test]
	fn resolves_single_season_players_only_when_folded() {
		let dataset = fixture();
		let condensed = GraphConfig::default();
		assert_eq!(resolve_display_id(&dataset, &condensed, "C"), NodeId::Season(3));
		assert_eq!(resolve_display_id(&dataset, &condensed, "A"), NodeId::player("A"));
		assert_eq!(
			resolve_display_id(&dataset, &condensed.with_condensed(false), "C"),
			NodeId::player("C")
		);
		assert_eq!(
			resolve_display_id(&dataset, &condensed.with_mode(ProjectionMode::Season), "C"),
			NodeId::Season(3)
		);
		assert_eq!(
			resolve_display_id(&dataset, &condensed, "Nobody"),
			NodeId::player("Nobody")
		);
	}

	#[test]
	fn building_twice_is_identical() {
		let dataset = fixture();
		for config in [
			GraphConfig::default(),
			GraphConfig::default().with_condensed(false),
			GraphConfig::default().with_mode(ProjectionMode::Season),
		] {
			assert_eq!(build(&dataset, &config), build(&dataset, &config));
		}
	}
}

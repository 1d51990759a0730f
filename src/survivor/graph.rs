//! Node, link and graph types produced by the builder.

use std::fmt;

use super::dataset::Season;

/// Identity of a node. Player names and season labels live in separate namespaces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
	/// A contestant, keyed by name.
	Player(String),
	/// A season, keyed by number.
	Season(Season),
}

impl NodeId {
	/// Shorthand for a player identity.
	pub fn player(name: impl Into<String>) -> Self {
		NodeId::Player(name.into())
	}

	/// Season number, for season identities.
	pub fn season(&self) -> Option<Season> {
		match self {
			NodeId::Season(season) => Some(*season),
			NodeId::Player(_) => None,
		}
	}

	/// Whether this is a season identity.
	pub fn is_season(&self) -> bool {
		matches!(self, NodeId::Season(_))
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NodeId::Player(name) => f.write_str(name),
			NodeId::Season(season) => write!(f, "Season {}", season),
		}
	}
}

/// Who a season node stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeasonMembers {
	/// Single-season players folded into this node (player-centric, condensed).
	Condensed(Vec<String>),
	/// Number of players who appeared in the season (season-centric).
	Total(usize),
}

impl SeasonMembers {
	/// Number of players represented.
	pub fn count(&self) -> usize {
		match self {
			SeasonMembers::Condensed(players) => players.len(),
			SeasonMembers::Total(count) => *count,
		}
	}
}

/// A graph vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
	/// An individual contestant.
	Player {
		/// Contestant name.
		name: String,
		/// Seasons played, never empty.
		seasons: Vec<Season>,
		/// Portrait URL.
		image_url: Option<String>,
	},
	/// A season.
	Season {
		/// Season number.
		season: Season,
		/// Players the node stands for.
		members: SeasonMembers,
		/// Logo URL.
		logo_url: Option<String>,
	},
}

impl Node {
	/// The node's identity.
	pub fn id(&self) -> NodeId {
		match self {
			Node::Player { name, .. } => NodeId::Player(name.clone()),
			Node::Season { season, .. } => NodeId::Season(*season),
		}
	}

	/// Whether `id` names this node, without allocating.
	pub fn has_id(&self, id: &NodeId) -> bool {
		match (self, id) {
			(Node::Player { name, .. }, NodeId::Player(other)) => name == other,
			(Node::Season { season, .. }, NodeId::Season(other)) => season == other,
			_ => false,
		}
	}

	/// Whether this is a season node.
	pub fn is_season(&self) -> bool {
		matches!(self, Node::Season { .. })
	}

	/// Human readable description shown when hovering the node.
	pub fn detail(&self) -> String {
		match self {
			Node::Player { seasons, .. } => format!("Seasons: {}", join(seasons)),
			Node::Season {
				members: SeasonMembers::Condensed(players),
				..
			} => format!("{} players", players.len()),
			Node::Season {
				members: SeasonMembers::Total(count),
				..
			} => format!("{} total players", count),
		}
	}
}

/// What an edge's endpoints have in common.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shared {
	/// Seasons both endpoints appeared in (player-centric).
	Seasons(Vec<Season>),
	/// Players who appeared in both seasons (season-centric).
	Players(Vec<String>),
}

impl Shared {
	/// Number of shared items.
	pub fn len(&self) -> usize {
		match self {
			Shared::Seasons(seasons) => seasons.len(),
			Shared::Players(players) => players.len(),
		}
	}

	/// Whether nothing is shared.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl fmt::Display for Shared {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Shared::Seasons(seasons) => {
				let labels: Vec<String> = seasons.iter().map(|s| format!("S{}", s)).collect();
				f.write_str(&labels.join(", "))
			}
			Shared::Players(players) => f.write_str(&players.join(", ")),
		}
	}
}

/// An undirected edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
	/// First endpoint, earlier in emission order.
	pub source: NodeId,
	/// Second endpoint.
	pub target: NodeId,
	/// Shared seasons or players.
	pub shared: Shared,
}

impl Link {
	/// Link strength, the number of shared items.
	pub fn weight(&self) -> usize {
		self.shared.len()
	}

	/// Whether the link joins `a` and `b` in either direction.
	pub fn connects(&self, a: &NodeId, b: &NodeId) -> bool {
		(self.source == *a && self.target == *b) || (self.source == *b && self.target == *a)
	}

	/// Tooltip text for the link.
	pub fn label(&self) -> String {
		match &self.shared {
			Shared::Seasons(seasons) => format!("Shared seasons: {}", join(seasons)),
			Shared::Players(players) => {
				format!("{} shared players: {}", players.len(), players.join(", "))
			}
		}
	}
}

/// A built graph. Rebuilt wholesale on every configuration change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
	/// Nodes in emission order.
	pub nodes: Vec<Node>,
	/// Links in emission order.
	pub links: Vec<Link>,
}

impl Graph {
	/// Finds a node by identity.
	pub fn node(&self, id: &NodeId) -> Option<&Node> {
		self.nodes.iter().find(|node| node.has_id(id))
	}

	/// Whether a node with this identity exists.
	pub fn contains(&self, id: &NodeId) -> bool {
		self.node(id).is_some()
	}

	/// The first link joining `a` and `b`, in either direction.
	pub fn link_between(&self, a: &NodeId, b: &NodeId) -> Option<&Link> {
		self.links.iter().find(|link| link.connects(a, b))
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

fn join(seasons: &[Season]) -> String {
	seasons
		.iter()
		.map(|s| s.to_string())
		.collect::<Vec<_>>()
		.join(", ")
}

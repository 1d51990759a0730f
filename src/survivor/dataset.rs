//! The raw contestant dataset: players, the seasons they played, and season logos.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::error::Result;

/// Season numbers start at 1.
pub type Season = u32;

/// One contestant's record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
	/// Seasons played, in the order they were listed.
	#[serde(default)]
	pub seasons: Vec<Season>,
	/// Portrait URL, if known.
	#[serde(default)]
	pub image_url: Option<String>,
}

impl PlayerRecord {
	/// Creates a record without an image.
	pub fn new(seasons: impl Into<Vec<Season>>) -> Self {
		Self {
			seasons: seasons.into(),
			image_url: None,
		}
	}

	/// The only season of a single-season player.
	pub fn single_season(&self) -> Option<Season> {
		match self.seasons.as_slice() {
			[season] => Some(*season),
			_ => None,
		}
	}
}

/// Immutable input to the graph builder.
///
/// Players are keyed by name in a `BTreeMap`, which pins iteration order to
/// name order and gives last-write-wins semantics for duplicate keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
	/// Player name to record.
	#[serde(default)]
	pub players: BTreeMap<String, PlayerRecord>,
	/// Season number to logo URL. Missing entries are fine.
	#[serde(default)]
	pub season_logos: BTreeMap<Season, String>,
}

impl Dataset {
	/// Parses and normalises a dataset from its JSON form.
	pub fn from_json(json: &str) -> Result<Self> {
		let mut dataset: Dataset = serde_json::from_str(json)?;
		dataset.normalize();
		info!(
			"dataset loaded: {} players, {} season logos",
			dataset.players.len(),
			dataset.season_logos.len()
		);
		Ok(dataset)
	}

	/// Builds a dataset from `(name, seasons)` pairs, mostly for fixtures.
	pub fn from_players<I, N, S>(players: I) -> Self
	where
		I: IntoIterator<Item = (N, S)>,
		N: Into<String>,
		S: Into<Vec<Season>>,
	{
		let mut dataset = Dataset {
			players: players
				.into_iter()
				.map(|(name, seasons)| (name.into(), PlayerRecord::new(seasons)))
				.collect(),
			season_logos: BTreeMap::new(),
		};
		dataset.normalize();
		dataset
	}

	/// Drops season `0` and repeated seasons from every player, keeping first occurrences.
	pub fn normalize(&mut self) {
		for (name, record) in self.players.iter_mut() {
			let before = record.seasons.len();
			let mut seen = HashSet::new();
			record
				.seasons
				.retain(|&season| season >= 1 && seen.insert(season));
			if record.seasons.len() != before {
				debug!(
					"normalized seasons for {}: dropped {} entries",
					name,
					before - record.seasons.len()
				);
			}
		}
	}

	/// Looks up a player by exact name.
	pub fn player(&self, name: &str) -> Option<&PlayerRecord> {
		self.players.get(name)
	}

	/// Logo URL for a season, if one was provided.
	pub fn logo(&self, season: Season) -> Option<&str> {
		self.season_logos.get(&season).map(String::as_str)
	}

	/// Whether the dataset holds no players.
	pub fn is_empty(&self) -> bool {
		self.players.is_empty()
	}
}

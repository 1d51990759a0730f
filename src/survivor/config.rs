//! View configuration: which projection to build and whether to condense.

use serde::{Deserialize, Serialize};

/// Maximum number of names a search box offers.
pub const SEARCH_LIMIT: usize = 5;

/// Whether nodes stand for contestants or for seasons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
	/// One node per contestant, optionally with single-season players condensed.
	#[default]
	Player,
	/// One node per season.
	Season,
}

impl ProjectionMode {
	/// Label used by the mode selector.
	pub fn label(self) -> &'static str {
		match self {
			ProjectionMode::Player => "Players",
			ProjectionMode::Season => "Seasons",
		}
	}
}

/// Inputs to the graph builder besides the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Projection to build.
	pub mode: ProjectionMode,
	/// Collapse single-season players into their season (player mode only).
	pub condensed: bool,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			mode: ProjectionMode::Player,
			condensed: true,
		}
	}
}

impl GraphConfig {
	/// Builder: set the projection mode.
	pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
		self.mode = mode;
		self
	}

	/// Builder: enable/disable condensation.
	pub fn with_condensed(mut self, condensed: bool) -> Self {
		self.condensed = condensed;
		self
	}

	/// Whether a single-season player is represented by its season node.
	pub fn folds_single_season_players(&self) -> bool {
		match self.mode {
			ProjectionMode::Player => self.condensed,
			ProjectionMode::Season => true,
		}
	}
}

/// Force simulation tuning passed through to `force_graph`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	/// Repulsion between nodes.
	pub force_charge: f32,
	/// Spring strength along links.
	pub force_spring: f32,
	/// Force clamp.
	pub force_max: f32,
	/// Velocity scale.
	pub node_speed: f32,
	/// Velocity damping per step.
	pub damping_factor: f32,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			force_charge: 500.0,
			force_spring: 0.03,
			force_max: 120.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

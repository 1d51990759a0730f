//! The query surface the UI drives: projection switches and path queries.

use std::sync::Arc;

use log::debug;

use super::builder::{build, resolve_display_id};
use super::config::{GraphConfig, ProjectionMode};
use super::dataset::Dataset;
use super::graph::{Graph, NodeId};
use super::paths::{PathReport, PathStep, describe_path, find_all_shortest_paths};

/// Holds the dataset, the active configuration and the graph built from them.
///
/// The graph is replaced whole whenever the configuration changes.
#[derive(Clone, Debug)]
pub struct Explorer {
	dataset: Arc<Dataset>,
	config: GraphConfig,
	graph: Arc<Graph>,
}

impl Explorer {
	/// Builds the initial graph.
	pub fn new(dataset: Arc<Dataset>, config: GraphConfig) -> Self {
		let graph = Arc::new(build(&dataset, &config));
		Self {
			dataset,
			config,
			graph,
		}
	}

	/// The immutable dataset.
	pub fn dataset(&self) -> &Dataset {
		&self.dataset
	}

	/// Shared handle to the dataset.
	pub fn dataset_handle(&self) -> Arc<Dataset> {
		Arc::clone(&self.dataset)
	}

	/// The active configuration.
	pub fn config(&self) -> GraphConfig {
		self.config
	}

	/// The current graph.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Shared handle to the current graph.
	pub fn graph_handle(&self) -> Arc<Graph> {
		Arc::clone(&self.graph)
	}

	/// Switches projection, rebuilding when it changes.
	pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
		self.reconfigure(self.config.with_mode(mode));
	}

	/// Toggles condensation, rebuilding when it changes.
	pub fn set_condensed(&mut self, condensed: bool) {
		self.reconfigure(self.config.with_condensed(condensed));
	}

	fn reconfigure(&mut self, config: GraphConfig) {
		if config == self.config {
			return;
		}
		self.config = config;
		self.graph = Arc::new(build(&self.dataset, &self.config));
	}

	/// Whether every player name resolves to a drawn node, so name search and
	/// path queries are meaningful. Season-centric graphs drop returning players.
	pub fn player_lookups(&self) -> bool {
		self.config.mode == ProjectionMode::Player
	}

	/// The node a player name is drawn as under the current configuration.
	pub fn display_id(&self, name: &str) -> NodeId {
		resolve_display_id(&self.dataset, &self.config, name)
	}

	/// All shortest paths between two players, or `None` if they are not connected.
	pub fn query(&self, start_name: &str, end_name: &str) -> Option<PathReport> {
		let start = self.display_id(start_name);
		let end = self.display_id(end_name);
		debug!("path query {} -> {} (resolved {} -> {})", start_name, end_name, start, end);
		find_all_shortest_paths(&self.graph, &start, &end).and_then(PathReport::new)
	}

	/// Display steps for every path of `report`, relabelling condensed endpoints.
	pub fn describe(&self, report: &PathReport, start_name: &str, end_name: &str) -> Vec<Vec<PathStep>> {
		let start = self.display_id(start_name);
		let end = self.display_id(end_name);
		report
			.paths
			.iter()
			.map(|path| describe_path(&self.graph, path, (&start, start_name), (&end, end_name)))
			.collect()
	}
}

//! Contestant graph core: dataset, projections, and shortest-path queries.
//!
//! - **builder**: dataset to `{nodes, links}` under a player- or season-centric projection
//! - **paths**: every minimum-hop path between two nodes
//! - **explorer**: the stateful surface the UI drives
//!
//! Nothing in here touches the DOM.

pub mod analysis;
pub mod builder;
pub mod config;
pub mod dataset;
pub mod error;
pub mod explorer;
pub mod graph;
pub mod paths;
pub mod search;

pub use analysis::{Diameter, degrees_of_separation, longest_shortest_paths};
pub use builder::{build, resolve_display_id};
pub use config::{GraphConfig, LayoutParams, ProjectionMode, SEARCH_LIMIT};
pub use dataset::{Dataset, PlayerRecord, Season};
pub use error::DatasetError;
pub use explorer::Explorer;
pub use graph::{Graph, Link, Node, NodeId, SeasonMembers, Shared};
pub use paths::{Path, PathReport, PathStep, describe_path, find_all_shortest_paths};
pub use search::search_players;

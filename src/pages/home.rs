use std::sync::Arc;

use leptos::prelude::*;
use log::warn;

use crate::components::control_panel::ControlPanel;
use crate::components::force_graph::{ForceGraphCanvas, GraphData, Highlight};
use crate::survivor::{Dataset, Explorer, GraphConfig, NodeId, PathReport, degrees_of_separation};

/// Id of the `<script type="application/json">` element holding the dataset.
const DATASET_ELEMENT_ID: &str = "survivor-data";

/// Shortest paths for the chosen endpoints, once both are set and the
/// current projection can place every player.
fn path_report(explorer: &Explorer, start: Option<&str>, end: Option<&str>) -> Option<PathReport> {
	if !explorer.player_lookups() {
		return None;
	}
	explorer.query(start?, end?)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let dataset = Arc::new(crate::load_dataset(DATASET_ELEMENT_ID).unwrap_or_else(|e| {
		warn!("falling back to an empty dataset: {}", e);
		Dataset::default()
	}));

	let separation_of = Arc::clone(&dataset);
	let explorer = RwSignal::new(Explorer::new(dataset, GraphConfig::default()));
	let selected = RwSignal::new(None::<NodeId>);
	let path_start = RwSignal::new(None::<String>);
	let path_end = RwSignal::new(None::<String>);

	let graph_data = Memo::new(move |_| {
		explorer.with(|e| GraphData::from_graph(e.graph(), e.config().mode))
	});
	let report = Memo::new(move |_| {
		path_start.with(|start| {
			path_end.with(|end| explorer.with(|e| path_report(e, start.as_deref(), end.as_deref())))
		})
	});
	// Independent of the view, so computed once.
	let diameter = Memo::new(move |_| degrees_of_separation(&separation_of));
	let highlight = Signal::derive(move || {
		report.with(|report| Highlight::new(selected.get(), report.as_ref()))
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas
					data=graph_data
					highlight=highlight
					on_select={move |id: Option<NodeId>| selected.set(id)}
					fullscreen=true
				/>
				<ControlPanel
					explorer=explorer
					selected=selected
					path_start=path_start
					path_end=path_end
					report=report
					diameter=diameter
				/>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn explorer() -> Explorer {
		let dataset = Dataset::from_players([("A", vec![1, 2]), ("B", vec![2, 3]), ("C", vec![3])]);
		Explorer::new(Arc::new(dataset), GraphConfig::default())
	}

	#[test]
	fn report_needs_both_endpoints() {
		let explorer = explorer();
		assert!(path_report(&explorer, Some("A"), None).is_none());
		assert!(path_report(&explorer, None, Some("C")).is_none());
		assert_eq!(path_report(&explorer, Some("A"), Some("C")).map(|r| r.hops), Some(2));
	}

	#[test]
	fn season_view_offers_no_player_paths() {
		let mut explorer = explorer();
		explorer.set_projection_mode(crate::survivor::ProjectionMode::Season);
		assert!(path_report(&explorer, Some("C"), Some("C")).is_none());
	}
}

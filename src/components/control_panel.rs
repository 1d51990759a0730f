//! Side menu: projection settings, player search, and the path finder.

use std::sync::Arc;

use leptos::prelude::*;

use crate::survivor::{
	Dataset, Diameter, Explorer, NodeId, PathReport, ProjectionMode, SEARCH_LIMIT, search_players,
};

/// Text box with a dropdown of matching player names.
#[component]
fn PlayerSearch(
	dataset: Arc<Dataset>,
	placeholder: &'static str,
	#[prop(into)] on_pick: Callback<String>,
) -> impl IntoView {
	let term = RwSignal::new(String::new());
	let focused = RwSignal::new(false);
	let results = Memo::new(move |_| {
		term.with(|t| {
			search_players(&dataset, t, SEARCH_LIMIT)
				.into_iter()
				.map(str::to_owned)
				.collect::<Vec<_>>()
		})
	});

	view! {
		<div class="player-search">
			<input
				type="text"
				placeholder=placeholder
				prop:value=move || term.get()
				on:input=move |ev| term.set(event_target_value(&ev))
				on:focus=move |_| focused.set(true)
				on:blur=move |_| focused.set(false)
			/>
			<Show when=move || focused.get() && !results.with(Vec::is_empty)>
				<ul class="search-results">
					<For
						each=move || results.get()
						key=|name| name.clone()
						children=move |name: String| {
							let label = name.clone();
							// mousedown fires before the input loses focus
							view! {
								<li on:mousedown=move |_| {
									on_pick.run(name.clone());
									term.set(String::new());
								}>{label}</li>
							}
						}
					/>
				</ul>
			</Show>
		</div>
	}
}

/// Projection mode radio buttons and the condensation toggle.
#[component]
fn ViewSettings(
	explorer: RwSignal<Explorer>,
	selected: RwSignal<Option<NodeId>>,
	path_start: RwSignal<Option<String>>,
	path_end: RwSignal<Option<String>>,
) -> impl IntoView {
	let mode = move || explorer.with(|e| e.config().mode);
	let condensed = move || explorer.with(|e| e.config().condensed);

	let mode_options = [ProjectionMode::Player, ProjectionMode::Season]
		.into_iter()
		.map(|option| {
			view! {
				<label class="mode-option">
					<input
						type="radio"
						name="projection-mode"
						prop:checked=move || mode() == option
						on:change=move |_| {
							// Node identities change with the projection
							selected.set(None);
							path_start.set(None);
							path_end.set(None);
							explorer.update(|e| e.set_projection_mode(option));
						}
					/>
					{option.label()}
				</label>
			}
		})
		.collect_view();

	view! {
		<div class="view-settings">
			<div class="mode-options">{mode_options}</div>
			<Show when=move || mode() == ProjectionMode::Player>
				<label class="condense-toggle">
					<input
						type="checkbox"
						prop:checked=condensed
						on:change=move |ev| {
							let checked = event_target_checked(&ev);
							selected.set(None);
							explorer.update(|e| e.set_condensed(checked));
						}
					/>
					"Condense single-season players"
				</label>
			</Show>
		</div>
	}
}

/// Chip showing a chosen endpoint with a clear button.
#[component]
fn Endpoint(
	caption: &'static str,
	#[prop(into)] name: Signal<Option<String>>,
	#[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
	view! {
		<Show when=move || name.with(Option::is_some)>
			<div class="path-endpoint">
				<span>{caption} ": " {move || name.get().unwrap_or_default()}</span>
				<button on:click=move |_| on_clear.run(())>"×"</button>
			</div>
		</Show>
	}
}

/// Path count, length, and every path with what links each hop.
#[component]
fn PathSummary(
	explorer: RwSignal<Explorer>,
	path_start: RwSignal<Option<String>>,
	path_end: RwSignal<Option<String>>,
	report: Memo<Option<PathReport>>,
) -> impl IntoView {
	let described = move || {
		let (Some(start), Some(end)) = (path_start.get(), path_end.get()) else {
			return None;
		};
		report.with(|report| {
			report.as_ref().map(|report| {
				let steps = explorer.with(|e| e.describe(report, &start, &end));
				(report.headline(), report.hops, steps)
			})
		})
	};
	let both_chosen = move || path_start.with(Option::is_some) && path_end.with(Option::is_some);

	move || match described() {
		Some((headline, hops, paths)) => {
			let rows = paths
				.into_iter()
				.map(|steps| {
					let parts = steps
						.into_iter()
						.map(|step| match step.via {
							Some(via) => view! {
								<span>
									{step.label}
									<span class="path-via">" (" {via.to_string()} ") → "</span>
								</span>
							}
							.into_any(),
							None => view! { <span>{step.label}</span> }.into_any(),
						})
						.collect_view();
					view! { <div class="path-row">{parts}</div> }
				})
				.collect_view();
			view! {
				<div class="path-summary">
					<div>{headline}</div>
					<div>"Length: " {hops} " connections"</div>
					{rows}
				</div>
			}
			.into_any()
		}
		None if both_chosen() => view! { <div class="path-summary">"No connection found"</div> }.into_any(),
		None => ().into_any(),
	}
}

/// Degrees of separation across all players.
#[component]
fn Separation(diameter: Memo<Option<Diameter>>) -> impl IntoView {
	move || {
		diameter.with(|d| {
			d.as_ref().and_then(|d| {
				let path = d.paths.first()?;
				let (from, to) = (path.first()?, path.last()?);
				let mut text = format!(
					"Longest shortest path: {} connections ({} pairs, e.g. {} to {})",
					d.hops,
					d.paths.len(),
					from,
					to
				);
				if let Some((via, count)) = d.intermediate_counts.first() {
					text.push_str(&format!(", most often via {} ({} paths)", via, count));
				}
				Some(text)
			})
		})
		.map(|text| view! { <div class="separation">{text}</div> })
	}
}

/// Which path endpoint the next picked name fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
	Start,
	End,
}

/// The start fills first, then the end; `None` once both are chosen.
fn free_slot(start: Option<&str>, end: Option<&str>) -> Option<Slot> {
	match (start, end) {
		(None, _) => Some(Slot::Start),
		(Some(_), None) => Some(Slot::End),
		(Some(_), Some(_)) => None,
	}
}

/// Collapsible side menu driving the graph.
#[component]
pub fn ControlPanel(
	explorer: RwSignal<Explorer>,
	selected: RwSignal<Option<NodeId>>,
	path_start: RwSignal<Option<String>>,
	path_end: RwSignal<Option<String>>,
	report: Memo<Option<PathReport>>,
	diameter: Memo<Option<Diameter>>,
) -> impl IntoView {
	let collapsed = RwSignal::new(false);
	let dataset = StoredValue::new(explorer.with_untracked(Explorer::dataset_handle));

	let on_pick_player = move |name: String| {
		let id = explorer.with(|e| e.display_id(&name));
		selected.set(Some(id));
	};

	let on_pick_endpoint = move |name: String| {
		let start = path_start.get_untracked();
		let end = path_end.get_untracked();
		match free_slot(start.as_deref(), end.as_deref()) {
			Some(Slot::Start) => path_start.set(Some(name)),
			Some(Slot::End) => path_end.set(Some(name)),
			None => {}
		}
	};
	let lookups = move || explorer.with(Explorer::player_lookups);

	view! {
		<div class="control-panel" class:collapsed=move || collapsed.get()>
			<Show when=move || !collapsed.get()>
				<div class="panel-body">
					<ViewSettings
						explorer=explorer
						selected=selected
						path_start=path_start
						path_end=path_end
					/>
					<Show when=lookups>
						<PlayerSearch
							dataset=dataset.get_value()
							placeholder="Search players..."
							on_pick=on_pick_player
						/>
						<div class="path-finder">
							<div class="section-title">"Find Path Between Players"</div>
							<Show when={move || {
								path_start.with(|start| {
									path_end.with(|end| free_slot(start.as_deref(), end.as_deref()).is_some())
								})
							}}>
								<PlayerSearch
									dataset=dataset.get_value()
									placeholder="Search paths..."
									on_pick=on_pick_endpoint
								/>
							</Show>
							<Endpoint
								caption="Start"
								name=path_start
								on_clear={move |_: ()| {
									path_start.set(None);
									path_end.set(None);
								}}
							/>
							<Endpoint caption="End" name=path_end on_clear={move |_: ()| path_end.set(None)} />
							<PathSummary
								explorer=explorer
								path_start=path_start
								path_end=path_end
								report=report
							/>
						</div>
					</Show>
					<Separation diameter=diameter />
				</div>
			</Show>
			<button class="collapse-toggle" on:click=move |_| collapsed.update(|c| *c = !*c)>
				{move || if collapsed.get() { "☰" } else { "×" }}
			</button>
		</div>
	}
}

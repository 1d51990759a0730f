//! Leptos client-side app wiring and routes.
//!
//! Renders reality-show contestants and their seasons as a force-directed
//! graph, with player search and all-shortest-paths highlighting. The graph
//! logic lives in [`survivor`] and has no DOM dependency.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

// Modules
mod components;
mod pages;
pub mod survivor;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::survivor::{Dataset, DatasetError};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Load the dataset from a `<script type="application/json">` element.
/// Expected format: `{ "players": { name: { "seasons": [...], "image_url": ... } }, "season_logos": { ... } }`
pub fn load_dataset(element_id: &str) -> survivor::error::Result<Dataset> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| DatasetError::Dom("no document".into()))?;
	let element = document
		.get_element_by_id(element_id)
		.ok_or_else(|| DatasetError::MissingElement(element_id.into()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| DatasetError::Dom(format!("#{} is not a script element", element_id)))?;
	let json = script
		.text()
		.map_err(|_| DatasetError::Dom(format!("#{} has no readable text", element_id)))?;
	Dataset::from_json(&json)
}

/// An app router which renders the graph page and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Survivor Graph" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}

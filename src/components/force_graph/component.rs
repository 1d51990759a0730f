use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::ForceGraphState;
use super::types::{GraphData, Highlight};
use crate::survivor::NodeId;

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;
type CallbackSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

const FRAME_SECONDS: f32 = 0.016;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// The window when fullscreen, otherwise the explicit size or the parent's box.
fn initial_size(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		return window_size(window).unwrap_or((800.0, 600.0));
	}
	let parent = canvas.parent_element();
	let parent_width = || parent.as_ref().map_or(800.0, |p| p.client_width() as f64);
	let parent_height = || parent.as_ref().map_or(600.0, |p| p.client_height() as f64);
	(width.unwrap_or_else(parent_width), height.unwrap_or_else(parent_height))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Keeps a fullscreen canvas matching the window.
fn follow_window_size(window: &Window, canvas: HtmlCanvasElement, state: SharedState, slot: &CallbackSlot) {
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		let Some((w, h)) = web_sys::window().as_ref().and_then(window_size) else {
			return;
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		if let Some(s) = state.borrow_mut().as_mut() {
			s.resize(w, h);
		}
	});
	let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
	*slot.borrow_mut() = Some(on_resize);
}

/// Steps the simulation and redraws on every animation frame.
fn run_frames(window: &Window, ctx: CanvasRenderingContext2d, state: SharedState, slot: CallbackSlot) {
	let again = slot.clone();
	*slot.borrow_mut() = Some(Closure::new(move || {
		if let Some(s) = state.borrow_mut().as_mut() {
			if s.animation_running {
				s.tick(FRAME_SECONDS);
			}
			render::render(s, &ctx);
		}
		if let (Some(cb), Some(win)) = (again.borrow().as_ref(), web_sys::window()) {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let Some(cb) = slot.borrow().as_ref() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] highlight: Signal<Highlight>,
	#[prop(into)] on_select: Callback<Option<NodeId>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = SharedState::default();
	let (state_init, frame_cb, resize_cb) = (state.clone(), CallbackSlot::default(), CallbackSlot::default());

	Effect::new(move |_| {
		let graph_data = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		// Later runs only swap the graph; the animation loop keeps going.
		if let Some(s) = state_init.borrow_mut().as_mut() {
			s.replace_data(&graph_data);
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = initial_size(&canvas, &window, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let Some(ctx) = context_2d(&canvas) else {
			log::warn!("canvas: 2d context unavailable");
			return;
		};

		let mut initial = ForceGraphState::new(&graph_data, w, h);
		initial.highlight = highlight.get_untracked();
		*state_init.borrow_mut() = Some(initial);

		if fullscreen {
			follow_window_size(&window, canvas, state_init.clone(), &resize_cb);
		}
		run_frames(&window, ctx, state_init.clone(), frame_cb.clone());
	});

	let state_hl = state.clone();
	Effect::new(move |prev: Option<Option<NodeId>>| {
		let next = highlight.get();
		let selected = next.selected.clone();
		if let Some(ref mut s) = *state_hl.borrow_mut() {
			if let Some(id) = &selected {
				if prev.flatten().as_ref() != Some(id) {
					s.center_on(id);
				}
			}
			s.highlight = next;
		}
		selected
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		if let (Some((x, y)), Some(s)) = (canvas_point(canvas_ref, &ev), state_md.borrow_mut().as_mut()) {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let (Some((x, y)), Some(s)) = (canvas_point(canvas_ref, &ev), state_mm.borrow_mut().as_mut()) {
			s.move_to(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let point = canvas_point(canvas_ref, &ev);
		let clicked = state_mu.borrow_mut().as_mut().and_then(|s| s.release(point));
		// Run outside the borrow: the callback feeds back into the highlight effect.
		if let Some(selection) = clicked {
			on_select.run(selection);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(s) = state_ml.borrow_mut().as_mut() {
			s.leave();
		}
	};

	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		on_select.run(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		if let (Some((x, y)), Some(s)) = (canvas_point(canvas_ref, &ev), state_wh.borrow_mut().as_mut()) {
			s.transform.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:contextmenu=on_contextmenu
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

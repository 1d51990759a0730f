use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const SELECTED_COLOR: &str = "#00ff00";
const PATH_COLOR: &str = "#ff9800";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_tooltip(state, ctx);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let line_width = 0.5 / k.max(0.5);
	let t = ease_out_cubic(state.hover.level);
	let path_active = !state.highlight.path_edges.is_empty();
	let (dash, gap) = (6.0 / k, 3.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (a, b) = (&n1.data.user_data.id, &n2.data.user_data.id);

		if state.highlight.on_path(a, b) {
			ctx.set_stroke_style_str(PATH_COLOR);
			ctx.set_line_width(line_width * 4.0);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		} else {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
			let hovered = state.hover.touches(n1.index()) && state.hover.touches(n2.index());
			// t=0: all edges at base, t=1: hovered neighbourhood bright, others faded
			let base = if path_active { 0.15 } else { 0.4 };
			let alpha = if hovered {
				base + (0.9 - base) * t
			} else {
				base * (1.0 - 0.6 * t)
			};
			ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", alpha));
			ctx.set_line_width(line_width);
		}

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_hover, t, k) = (
		state.hover.active(),
		ease_out_cubic(state.hover.level),
		state.transform.k,
	);
	let path_active = !state.highlight.path_nodes.is_empty();

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let selected = state.highlight.selected.as_ref() == Some(&info.id);
		let on_path = state.highlight.path_nodes.contains(&info.id);
		let hovered = state.hover.is_node(idx);
		let emphasised = selected || on_path || (has_hover && state.hover.touches(idx));

		let alpha = if emphasised {
			1.0
		} else if has_hover {
			1.0 - 0.7 * t
		} else if path_active {
			0.35
		} else {
			1.0
		};
		let radius = if hovered {
			info.radius * (1.0 + 0.25 * t)
		} else {
			info.radius
		};

		ctx.set_global_alpha(alpha);

		if hovered && t > 0.01 {
			if let Ok(gradient) =
				ctx.create_radial_gradient(x, y, radius * 0.3, x, y, radius * (1.8 + 1.2 * t))
			{
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", 0.35 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius * (1.8 + 1.2 * t), 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		if selected || on_path {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 1.5, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(if selected { SELECTED_COLOR } else { PATH_COLOR });
			ctx.fill();
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.set_stroke_style_str(if selected {
			SELECTED_COLOR
		} else if on_path {
			PATH_COLOR
		} else {
			"#ffffff"
		});
		ctx.set_line_width(if selected || on_path { 1.0 } else { 0.5 });
		ctx.stroke();

		if let Some(label) = &info.label {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.85));
			ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
		ctx.set_global_alpha(1.0);
	});
}

/// Name and detail of the hovered node, drawn in screen space next to the pointer.
fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(info) = state.hover.node().and_then(|idx| state.node_info(idx)) else {
		return;
	};

	let (px, py) = state.hover.pointer;
	let (w, h) = (200.0, 46.0);
	let x = (px + 10.0).min(state.width - w - 10.0);
	let y = (py - 10.0).min(state.height - h - 10.0);

	ctx.set_fill_style_str("rgba(0, 0, 0, 0.9)");
	ctx.fill_rect(x, y, w, h);
	ctx.set_fill_style_str("white");
	ctx.set_font("bold 14px sans-serif");
	let _ = ctx.fill_text(&info.id.to_string(), x + 10.0, y + 18.0);
	ctx.set_font("13px sans-serif");
	let _ = ctx.fill_text(&info.detail, x + 10.0, y + 36.0);
}

//! Browser canvas backend

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{ShadedDisc, Surface2d};
use crate::error::SceneError;

/// `Surface2d` over a `<canvas>` 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Fails with `ContextUnavailable` if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SceneError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SceneError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface2d for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_disc(&mut self, disc: &ShadedDisc) {
        let ctx = &self.ctx;
        let fill = &disc.fill;

        ctx.begin_path();
        if ctx
            .arc(
                disc.center.x as f64,
                disc.center.y as f64,
                disc.radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .is_err()
        {
            return;
        }
        ctx.close_path();

        let gradient = match ctx.create_radial_gradient(
            fill.inner_center.x as f64,
            fill.inner_center.y as f64,
            fill.inner_radius.max(0.0) as f64,
            fill.outer_center.x as f64,
            fill.outer_center.y as f64,
            fill.outer_radius.max(0.0) as f64,
        ) {
            Ok(gradient) => gradient,
            Err(_) => return,
        };
        for stop in &fill.stops {
            if let Err(e) = gradient.add_color_stop(stop.offset, &stop.color.to_string()) {
                log::debug!("Rejected gradient stop at {}: {:?}", stop.offset, e);
            }
        }

        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill();

        ctx.set_stroke_style_str(&disc.outline.to_string());
        ctx.set_line_width(disc.line_width as f64);
        ctx.stroke();
    }
}

// Draws a particle field onto a 2d canvas context.

use std::f64::consts::PI;

use vecmath::{vec2_len, vec2_sub};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Color;
use crate::error::Error;
use crate::field::ParticleField;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub const PARTICLE_COLOR: Color = Color::from_u32(0x00D4FFFF);
    pub const LINK_WIDTH: f64 = 0.5;

    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasRenderer, Error> {
        let context = canvas
            .get_context("2d")
            .map_err(Error::from)?
            .ok_or(Error::NoCanvasContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::NoCanvasContext)?;

        Ok(CanvasRenderer { canvas, context })
    }

    /// Resizing the backing store also clears it; the next frame paints
    /// everything again anyway.
    pub fn resize_to(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    #[allow(deprecated)]
    pub fn render(&self, field: &ParticleField) -> Result<(), Error> {
        let ctx = &self.context;
        let particles = field.particles();

        ctx.clear_rect(0.0, 0.0, field.width(), field.height());

        for p in particles {
            ctx.begin_path();
            ctx.arc(p.pos[0], p.pos[1], p.radius, 0.0, PI * 2.0)?;
            let fill = Self::PARTICLE_COLOR.css_with_alpha(p.opacity);
            ctx.set_fill_style(&JsValue::from_str(&fill));
            ctx.fill();
        }

        // Pair scan for links; quadratic, but the population is capped.
        ctx.set_line_width(Self::LINK_WIDTH);
        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let dist = vec2_len(vec2_sub(particles[j].pos, particles[i].pos));
                if let Some(alpha) = ParticleField::link_alpha(dist) {
                    let stroke = Self::PARTICLE_COLOR.css_with_alpha(alpha);
                    ctx.begin_path();
                    ctx.set_stroke_style(&JsValue::from_str(&stroke));
                    ctx.move_to(particles[i].pos[0], particles[i].pos[1]);
                    ctx.line_to(particles[j].pos[0], particles[j].pos[1]);
                    ctx.stroke();
                }
            }
        }

        Ok(())
    }
}

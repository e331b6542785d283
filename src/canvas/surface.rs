use pixelboard_core::{PixelRect, Rgba, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas::colors::css;
use crate::image_loader::LoadedImage;

pub fn get_canvas_ctx(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()?
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// `Surface` over a 2D canvas context. Remembers the last fill and stroke
/// colours so a chunk of identical cells does not reset the style each call.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    fill: Option<Rgba>,
    stroke: Option<Rgba>,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        ctx.set_line_width(1.0);
        Self { ctx, fill: None, stroke: None }
    }
}

impl Surface for CanvasSurface<'_> {
    type Image = LoadedImage;

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        if self.fill != Some(color) {
            self.ctx.set_fill_style_str(&css(color));
            self.fill = Some(color);
        }
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn stroke_rect(&mut self, rect: PixelRect, color: Rgba) {
        if self.stroke != Some(color) {
            self.ctx.set_stroke_style_str(&css(color));
            self.stroke = Some(color);
        }
        self.ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn draw_image(&mut self, image: &LoadedImage, src: PixelRect, dst: PixelRect) {
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                &image.element,
                src.x,
                src.y,
                src.w,
                src.h,
                dst.x,
                dst.y,
                dst.w,
                dst.h,
            )
        {
            log::error!("failed to draw {}: {e:?}", image.name);
        }
    }
}

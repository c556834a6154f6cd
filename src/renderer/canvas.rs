//! Canvas 2D renderer
//!
//! Draws the background flash, fighters, attack reach and HUD for one frame.
//! Canvas size is read from the element, not from constants.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{HitBox, RenderState};
use crate::ui::{HealthBar, HudLayout};

const BACKGROUND: &str = "#222";
const FLASH: &str = "red";
const FIGHTER_FILLS: [&str; 2] = ["white", "black"];
const HURTBOX_OUTLINE: &str = "lime";
const ATTACK_OUTLINE: &str = "yellow";
const HUD_TEXT: &str = "#bbb";
const BAR_FILLS: [&str; 2] = ["purple", "yellow"];
const BAR_LABELS: [&str; 2] = ["yellow", "purple"];

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    flash_enabled: bool,
    show_hitboxes: bool,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, canvas: &HtmlCanvasElement, settings: &Settings) -> Self {
        Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            flash_enabled: settings.effective_flash(),
            show_hitboxes: settings.show_hitboxes,
        }
    }

    pub fn render(&self, frame: &RenderState) {
        let ctx = &self.ctx;

        // Background
        let bg = if frame.flashing && self.flash_enabled { FLASH } else { BACKGROUND };
        ctx.set_fill_style_str(bg);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        // Fighters
        for (fighter, fill) in frame.fighters.iter().zip(FIGHTER_FILLS) {
            ctx.set_fill_style_str(fill);
            self.fill_box(&fighter.hurtbox());
        }
        if self.show_hitboxes {
            ctx.set_stroke_style_str(HURTBOX_OUTLINE);
            ctx.set_line_width(1.0);
            for fighter in &frame.fighters {
                self.stroke_box(&fighter.hurtbox());
            }
        }

        if let Some(reach) = &frame.attack_box {
            ctx.set_stroke_style_str(ATTACK_OUTLINE);
            ctx.set_line_width(2.0);
            self.stroke_box(reach);
        }

        // HUD last so it sits on top
        let hud = HudLayout::from_render_state(frame);
        ctx.set_fill_style_str(HUD_TEXT);
        ctx.set_font("12px sans-serif");
        for line in hud.hints.iter().chain(std::iter::once(&hud.turn)) {
            let _ = ctx.fill_text(&line.text, line.pos.x as f64, line.pos.y as f64);
        }
        for bar in &hud.health_bars {
            self.draw_health_bar(bar);
        }

        if let Some(banner) = &hud.win_banner {
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.6)");
            ctx.fill_rect(0.0, 0.0, self.width, self.height);

            ctx.set_fill_style_str("white");
            ctx.set_text_align("center");
            ctx.set_font("48px sans-serif");
            let _ = ctx.fill_text(&banner.headline, self.width / 2.0, self.height / 2.0);
            ctx.set_font("18px sans-serif");
            let _ = ctx.fill_text(&banner.hint, self.width / 2.0, self.height / 2.0 + 40.0);
            ctx.set_text_align("start");
        }
    }

    fn draw_health_bar(&self, bar: &HealthBar) {
        let ctx = &self.ctx;
        let i = bar.player.index();
        let (x, y) = (bar.origin.x as f64, bar.origin.y as f64);
        let h = bar.size.y as f64;

        ctx.set_fill_style_str(BAR_FILLS[i]);
        ctx.fill_rect(x, y, bar.fill_width as f64, h);
        ctx.set_stroke_style_str(HURTBOX_OUTLINE);
        ctx.set_line_width(1.0);
        ctx.stroke_rect(x, y, bar.size.x as f64, h);

        ctx.set_fill_style_str(BAR_LABELS[i]);
        let _ = ctx.fill_text(&bar.label, x + 5.0, y + HEALTH_BAR_HEIGHT as f64 - 6.0);
    }

    fn fill_box(&self, b: &HitBox) {
        self.ctx
            .fill_rect(b.min.x as f64, b.min.y as f64, b.size.x as f64, b.size.y as f64);
    }

    fn stroke_box(&self, b: &HitBox) {
        self.ctx
            .stroke_rect(b.min.x as f64, b.min.y as f64, b.size.x as f64, b.size.y as f64);
    }
}

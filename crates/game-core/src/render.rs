use bracket_lib::prelude::{
    line2d_bresenham, to_cp437, BTerm, BLACK, DARK_GRAY, MAGENTA, ORANGE, RGB, WHITE, YELLOW,
};
use common::{Entity, GameResult};
use level::{Light, LightKind};
use ui::{band_color, to_cell, UILayout, CELL_SIZE};

use super::ReelhavenGame;

const CONSOLE_WIDTH: i32 = 80;
const CONSOLE_HEIGHT: i32 = 45;
/// Darkest the ground gets at midnight.
const NIGHT_FLOOR: f32 = 0.3;

fn on_screen(x: i32, y: i32) -> bool {
    (0..CONSOLE_WIDTH).contains(&x) && (0..CONSOLE_HEIGHT).contains(&y)
}

/// Cell rectangle covered by `body`, clipped to the console.
fn cells(body: &Entity) -> impl Iterator<Item = (i32, i32)> {
    let x0 = to_cell(body.x).max(0);
    let y0 = to_cell(body.y).max(0);
    let x1 = to_cell(body.right() - 1).min(CONSOLE_WIDTH - 1);
    let y1 = to_cell(body.bottom() - 1).min(CONSOLE_HEIGHT - 1);
    (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
}

fn fill(ctx: &mut BTerm, body: &Entity, glyph: char, fg: RGB) {
    for (x, y) in cells(body) {
        ctx.set(x, y, fg, RGB::named(BLACK), to_cp437(glyph));
    }
}

fn outline(ctx: &mut BTerm, body: &Entity, fg: RGB) {
    let x0 = to_cell(body.x);
    let y0 = to_cell(body.y);
    let x1 = to_cell(body.right() - 1);
    let y1 = to_cell(body.bottom() - 1);
    for (x, y) in cells(body) {
        if x == x0 || x == x1 || y == y0 || y == y1 {
            ctx.set(x, y, fg, RGB::named(BLACK), to_cp437('.'));
        }
    }
}

fn glyph_at(ctx: &mut BTerm, wx: i32, wy: i32, glyph: char, fg: RGB) {
    let (x, y) = (to_cell(wx), to_cell(wy));
    if on_screen(x, y) {
        ctx.set(x, y, fg, RGB::named(BLACK), to_cp437(glyph));
    }
}

/// On-screen cells a light reaches, with the glow at each cell centre.
fn glow_cells(light: &Light, time_of_day: f32) -> Vec<(i32, i32, f32)> {
    let reach = light.radius.max(0.0).ceil() as i32;
    let x0 = to_cell(light.x - reach).max(0);
    let y0 = to_cell(light.y - reach).max(0);
    let x1 = to_cell(light.x + reach).min(CONSOLE_WIDTH - 1);
    let y1 = to_cell(light.y + reach).min(CONSOLE_HEIGHT - 1);
    let half = CELL_SIZE / 2;
    let mut out = Vec::new();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let glow = light.glow_at(x * CELL_SIZE + half, y * CELL_SIZE + half, time_of_day);
            if glow > 0.0 {
                out.push((x, y, glow));
            }
        }
    }
    out
}

impl ReelhavenGame {
    /// Draws the current screen. Reads state only.
    pub fn draw(&self, ctx: &mut BTerm) -> GameResult<()> {
        match self.ui.layout() {
            UILayout::Trophies => return self.ui.draw_trophies(ctx, &self.trophies()),
            UILayout::Paused => {
                self.draw_world(ctx);
                return self.ui.draw_pause(ctx);
            }
            UILayout::Standard | UILayout::Fishing => {}
        }
        self.draw_world(ctx);
        self.draw_fishing(ctx);
        self.draw_hud(ctx)
    }

    fn draw_world(&self, ctx: &mut BTerm) {
        let shade = NIGHT_FLOOR + (1.0 - NIGHT_FLOOR) * self.clock.brightness();
        let ground = self.palette.ground * shade;
        fill(ctx, &self.level.backdrop, '.', ground);

        if let Some(water) = &self.level.water {
            fill(ctx, water, '~', self.palette.water * shade.max(0.5));
        }
        for obstacle in &self.level.obstacles {
            fill(ctx, obstacle, '#', self.palette.obstacle);
        }
        for door in &self.level.doors {
            fill(ctx, &door.body, '+', self.palette.door);
        }
        for spot in &self.level.fishing_spots {
            fill(ctx, &spot.body, '=', self.palette.spot);
        }
        for shelf in &self.level.shelves {
            fill(ctx, &shelf.body, 'T', self.palette.shelf);
        }

        let t = self.clock.time();
        for light in self.level.lights.iter().filter(|l| l.is_lit(t)) {
            let base = match light.kind {
                LightKind::Fire => RGB::named(ORANGE),
                LightKind::Window => RGB::named(YELLOW),
            };
            for (x, y, glow) in glow_cells(light, t) {
                ctx.set_bg(x, y, base * (glow * 0.5));
            }
            glyph_at(ctx, light.x, light.y, '*', base * light.intensity(t).max(0.4));
        }

        let body = &self.player.body;
        fill(ctx, body, '@', self.palette.player);

        if self.debug {
            for obstacle in &self.level.obstacles {
                outline(ctx, obstacle, RGB::named(MAGENTA));
            }
            outline(ctx, body, RGB::named(MAGENTA));
            let state = self.player.animator.state();
            let frame = self
                .player
                .animator
                .current_frame()
                .map_or("-", |f| f.source.as_str());
            ctx.print_color(0, 1, RGB::named(MAGENTA), RGB::named(BLACK), format!(
                "{} ({}, {}) {}",
                state, body.x, body.y, self.player.angle()
            ));
            ctx.print_color(0, 2, RGB::named(MAGENTA), RGB::named(BLACK), format!(
                "{} on {}",
                frame, self.backdrop.source
            ));
        }
    }

    fn draw_fishing(&self, ctx: &mut BTerm) {
        if let Some(meter) = self.fishing.meter() {
            outline(ctx, &meter.body, RGB::named(WHITE));
            let mut bar = meter.body;
            bar.h = meter.fill_height().max(1);
            bar.y = meter.body.bottom() - bar.h;
            fill(ctx, &bar, '|', RGB::named(YELLOW));
        }
        if let Some(fish) = self.fishing.fish() {
            if fish.body.visible {
                fill(ctx, &fish.body, 'f', self.palette.fish);
            }
        }
        if let Some(line) = self.fishing.line() {
            let anchor = line.anchor();
            let target = line.float_target();
            let color = band_color(line.band());
            let from = bracket_lib::prelude::Point::new(to_cell(anchor.x), to_cell(anchor.y));
            let to = bracket_lib::prelude::Point::new(to_cell(target.x), to_cell(target.y));
            for pt in line2d_bresenham(from, to) {
                if on_screen(pt.x, pt.y) {
                    ctx.set(pt.x, pt.y, color, RGB::named(BLACK), to_cp437('\''));
                }
            }
            fill(ctx, line.float(), 'o', self.palette.float);
        }
    }

    fn draw_hud(&self, ctx: &mut BTerm) -> GameResult<()> {
        let mut status = format!(
            "{} {:02}:00  {:?}",
            self.level.name,
            self.clock.hour(),
            self.fishing.state()
        );
        if self.god {
            status.push_str("  GOD");
        }
        ctx.print_color(0, 0, RGB::named(WHITE), RGB::named(DARK_GRAY), status);
        if let Some(line) = self.fishing.line() {
            self.ui
                .draw_tension(ctx, line.tension(), fishing::line::MAX_TENSION, line.band())?;
        }
        self.ui.draw_texts(ctx)?;
        self.ui.draw_logs(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_clip_to_console() {
        let big = Entity::new(-100, -100, 5000, 5000);
        let all: Vec<_> = cells(&big).collect();
        assert_eq!(all.len(), (CONSOLE_WIDTH * CONSOLE_HEIGHT) as usize);

        let one = Entity::new(24, 48, 24, 24);
        assert_eq!(cells(&one).collect::<Vec<_>>(), vec![(1, 2)]);

        let off = Entity::new(-500, 0, 48, 48);
        assert_eq!(cells(&off).count(), 0);
    }

    #[test]
    fn glow_covers_cells_within_radius() {
        let fire = Light {
            kind: LightKind::Fire,
            x: 240,
            y: 240,
            radius: 48.0,
        };
        let lit = glow_cells(&fire, 0.0);
        assert!(lit.contains(&(10, 10, fire.glow_at(252, 252, 0.0))));
        assert!(lit.iter().all(|&(x, y, _)| (8..=12).contains(&x) && (8..=12).contains(&y)));
        assert!(lit.len() < 25);
        assert!(glow_cells(&fire, 0.5).is_empty());

        let corner = Light { x: 0, y: 0, ..fire };
        assert!(glow_cells(&corner, 0.0).iter().all(|&(x, y, _)| on_screen(x, y)));
    }

    #[test]
    fn on_screen_bounds() {
        assert!(on_screen(0, 0));
        assert!(on_screen(79, 44));
        assert!(!on_screen(80, 0));
        assert!(!on_screen(0, -1));
    }
}

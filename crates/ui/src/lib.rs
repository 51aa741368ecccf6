//! Presentation helpers: message log, floating text, tension bar and the
//! trophy and pause screens.
use bracket_lib::prelude::{
    BTerm, BLACK, BROWN1, CYAN, DARK_GRAY, DARK_GREEN, GOLD, GRAY, LIGHT_GREEN, NAVY,
    ORANGE, RED, RGB, WHITE, YELLOW,
};
use codex::TrophyRecord;
use common::GameResult;
use fishing::TensionBand;

/// World units per console cell.
pub const CELL_SIZE: i32 = 24;
/// Ticks a floating text stays on screen.
pub const TEXT_LIFETIME: u32 = 100;

const LOG_Y: i32 = 37;
const LOG_LINES: usize = 8;
const TENSION_Y: i32 = LOG_Y - 1;

/// Converts a world coordinate to a console cell.
pub fn to_cell(world: i32) -> i32 {
    world.div_euclid(CELL_SIZE)
}

/// Which screen is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UILayout {
    /// Walking around.
    Standard,
    /// At a fishing spot.
    Fishing,
    /// Trophy shelf records.
    Trophies,
    Paused,
}

/// Colors for world objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPalette {
    pub ground: RGB,
    pub obstacle: RGB,
    pub door: RGB,
    pub spot: RGB,
    pub water: RGB,
    pub shelf: RGB,
    pub player: RGB,
    pub fish: RGB,
    pub float: RGB,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            ground: RGB::named(DARK_GREEN),
            obstacle: RGB::named(GRAY),
            door: RGB::named(BROWN1),
            spot: RGB::named(YELLOW),
            water: RGB::named(NAVY),
            shelf: RGB::named(GOLD),
            player: RGB::named(WHITE),
            fish: RGB::named(CYAN),
            float: RGB::named(RED),
        }
    }
}

/// Color of the fishing line for a tension band.
pub fn band_color(band: TensionBand) -> RGB {
    match band {
        TensionBand::Safe => RGB::named(WHITE),
        TensionBand::Caution => RGB::named(ORANGE),
        TensionBand::Danger | TensionBand::Snapped => RGB::named(RED),
        TensionBand::Resting => RGB::named(LIGHT_GREEN),
    }
}

/// Short-lived text drawn in world space, e.g. a catch announcement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloatingText {
    pub x: i32,
    pub y: i32,
    pub text: String,
    remaining: u32,
}

impl FloatingText {
    pub fn new(x: i32, y: i32, text: impl Into<String>, lifetime: u32) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            remaining: lifetime,
        }
    }

    pub fn update(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

/// Log, floating texts and the active layout.
pub struct UIContext {
    logs: Vec<String>,
    layout: UILayout,
    texts: Vec<FloatingText>,
}

impl Default for UIContext {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            layout: UILayout::Standard,
            texts: Vec::new(),
        }
    }
}

impl UIContext {
    pub fn set_layout(&mut self, layout: UILayout) {
        if self.layout != layout {
            tracing::debug!(from = ?self.layout, to = ?layout, "layout");
        }
        self.layout = layout;
    }

    pub fn layout(&self) -> UILayout {
        self.layout
    }

    /// Adds a message to the log queue and mirrors it to the tracing log.
    pub fn add_log(&mut self, msg: &str) {
        tracing::info!(target: "reelhaven::log", "{}", msg);
        self.logs.push(msg.to_string());
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Announces a catch with the name and weight above the player.
    pub fn announce_catch(&mut self, name: &str, weight: i32, player_y: i32) {
        let width = CELL_SIZE * 80;
        self.texts
            .push(FloatingText::new(width / 4, player_y - 200, name, TEXT_LIFETIME));
        self.texts.push(FloatingText::new(
            width / 3,
            player_y - 100,
            format!("{}lb", weight),
            TEXT_LIFETIME,
        ));
    }

    /// Ages floating texts and drops the expired ones.
    pub fn update_texts(&mut self) {
        for text in &mut self.texts {
            text.update();
        }
        self.texts.retain(|t| !t.is_expired());
    }

    pub fn texts(&self) -> &[FloatingText] {
        &self.texts
    }

    /// The newest messages, oldest first, that fit in the log panel.
    pub fn recent_logs(&self) -> &[String] {
        let from = self.logs.len().saturating_sub(LOG_LINES);
        &self.logs[from..]
    }

    /// Draws the message panel under the playfield.
    pub fn draw_logs(&self, ctx: &mut BTerm) -> GameResult<()> {
        if matches!(self.layout, UILayout::Trophies | UILayout::Paused) {
            return Ok(());
        }
        let recent = self.recent_logs();
        let faded = recent.len().saturating_sub(1);
        for (row, msg) in recent.iter().enumerate() {
            let fg = RGB::named(if row < faded { GRAY } else { WHITE });
            ctx.print_color(0, LOG_Y + row as i32, fg, RGB::named(BLACK), msg);
        }
        Ok(())
    }

    pub fn draw_texts(&self, ctx: &mut BTerm) -> GameResult<()> {
        for text in &self.texts {
            ctx.print_color(
                to_cell(text.x),
                to_cell(text.y),
                RGB::named(WHITE),
                RGB::named(BLACK),
                &text.text,
            );
        }
        Ok(())
    }

    /// Draws the tension bar while fishing.
    pub fn draw_tension(&self, ctx: &mut BTerm, tension: i32, max: i32, band: TensionBand) -> GameResult<()> {
        if self.layout != UILayout::Fishing {
            return Ok(());
        }
        let bar = tension_bar_string(tension, max);
        ctx.print_color(0, TENSION_Y, band_color(band), RGB::named(BLACK), bar);
        Ok(())
    }

    /// Draws the trophy shelf.
    pub fn draw_trophies(&self, ctx: &mut BTerm, records: &[TrophyRecord]) -> GameResult<()> {
        if self.layout != UILayout::Trophies {
            return Ok(());
        }
        ctx.print_centered(6, "Trophies");
        for (i, line) in trophy_strings(records).iter().enumerate() {
            let color = if records.get(i).is_some_and(TrophyRecord::is_caught) {
                GOLD
            } else {
                DARK_GRAY
            };
            ctx.print_color_centered(8 + i as i32, RGB::named(color), RGB::named(BLACK), line);
        }
        ctx.print_centered(40, "Esc: back");
        Ok(())
    }

    pub fn draw_pause(&self, ctx: &mut BTerm) -> GameResult<()> {
        if self.layout != UILayout::Paused {
            return Ok(());
        }
        for (i, line) in pause_strings().iter().enumerate() {
            ctx.print_centered(12 + i as i32, line);
        }
        Ok(())
    }
}

fn tension_bar_string(tension: i32, max: i32) -> String {
    let width = 10;
    let ratio = (tension as f32 / max.max(1) as f32).clamp(0.0, 1.0);
    let filled = (ratio * width as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn trophy_strings(records: &[TrophyRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec!["(no fish known)".to_string()];
    }
    records
        .iter()
        .map(|r| {
            if r.is_caught() {
                format!("{:<16} {:>4}lb", r.name, r.best_weight)
            } else {
                format!("{:<16} {:>6}", r.name, "???")
            }
        })
        .collect()
}

fn pause_strings() -> Vec<String> {
    vec![
        "Paused".to_string(),
        String::new(),
        "Arrows / WASD: Move".to_string(),
        "Mouse: hold to charge, release to cast".to_string(),
        "Left/Right while reeling: steer".to_string(),
        "Esc: leave fishing spot".to_string(),
        "F1: Debug boxes  F2: God mode".to_string(),
        String::new(),
        "Esc/Enter: Resume   Q: Quit".to_string(),
    ]
}

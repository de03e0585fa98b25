//! Presentation handoff
//!
//! The simulation performs no drawing. After a tick, [`build_scene`] flattens
//! the world into primitive rectangles and HUD strings; a [`PresentFrame`]
//! collaborator consumes the scene, and a [`MeasureText`] collaborator
//! supplies text extents for alignment. Text measurement is treated as a pure
//! function of (font, text) and memoized by [`TextMetricsCache`].

use glam::Vec2;
use std::collections::HashMap;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::GameState;

/// Packed 0xRRGGBB color
pub type Color = u32;

pub const COLOR_BACKGROUND: Color = 0x222222;
pub const COLOR_PLAYER: Color = 0x00CCCC;
pub const COLOR_ENEMY: Color = 0xFF0000;
pub const COLOR_PLAYER_BULLET: Color = 0xFFFF00;
pub const COLOR_ENEMY_BULLET: Color = 0xFFFFFF;
pub const COLOR_HUD_TEXT: Color = 0xEEEEEE;

pub const HUD_FONT: &str = "16px monospace";
pub const BANNER_FONT: &str = "48px monospace";

/// HUD inset from the world edges
const HUD_MARGIN: f32 = 10.0;

/// A filled axis-aligned rectangle, positioned by its top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub min: Vec2,
    pub size: Vec2,
    pub color: Color,
}

impl RectShape {
    /// Build from a simulation entity: center position and scaled half extent
    pub fn centered(pos: Vec2, half: Vec2, color: Color) -> Self {
        Self {
            min: pos - half,
            size: half * 2.0,
            color,
        }
    }
}

/// A positioned HUD string, already aligned by the scene builder
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub pos: Vec2,
    pub font: &'static str,
    pub text: String,
    pub color: Color,
}

/// Everything the render sink needs for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub clear_color: Color,
    pub rects: Vec<RectShape>,
    pub texts: Vec<TextItem>,
}

/// Render sink collaborator: consumes the finished scene
pub trait PresentFrame {
    fn present(&mut self, scene: &Scene);
}

/// Text-extent collaborator. Implementations may be expensive (DOM layout,
/// font rasterization); wrap them in [`TextMetricsCache`].
pub trait MeasureText {
    /// Width and height of `text` rendered in `font`
    fn measure(&mut self, font: &str, text: &str) -> (f32, f32);
}

/// Memoizing wrapper around a [`MeasureText`] implementation. The same
/// (font, text) pair is only measured once per process.
pub struct TextMetricsCache<M> {
    inner: M,
    cache: HashMap<(String, String), (f32, f32)>,
}

impl<M: MeasureText> TextMetricsCache<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

impl<M: MeasureText> MeasureText for TextMetricsCache<M> {
    fn measure(&mut self, font: &str, text: &str) -> (f32, f32) {
        if let Some(&dims) = self.cache.get(&(font.to_owned(), text.to_owned())) {
            return dims;
        }
        let dims = self.inner.measure(font, text);
        self.cache.insert((font.to_owned(), text.to_owned()), dims);
        dims
    }
}

/// Fixed-width approximation, good enough for the native headless driver
pub struct MonospaceMetrics;

impl MeasureText for MonospaceMetrics {
    fn measure(&mut self, font: &str, text: &str) -> (f32, f32) {
        // "16px" -> 16.0; unknown descriptors fall back to a readable size
        let px: f32 = font
            .split("px")
            .next()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(16.0);
        (text.chars().count() as f32 * px * 0.6, px)
    }
}

/// Flatten the post-update world into draw order: bullets, enemies, player,
/// then the HUD on top.
pub fn build_scene(state: &GameState, metrics: &mut impl MeasureText) -> Scene {
    let mut scene = Scene {
        clear_color: COLOR_BACKGROUND,
        rects: Vec::new(),
        texts: Vec::new(),
    };

    for bullet in state.player_bullets.iter_active() {
        scene.rects.push(RectShape::centered(
            bullet.pos,
            bullet.half_extent(),
            COLOR_PLAYER_BULLET,
        ));
    }
    for bullet in state.enemy_bullets.iter_active() {
        scene.rects.push(RectShape::centered(
            bullet.pos,
            bullet.half_extent(),
            COLOR_ENEMY_BULLET,
        ));
    }
    for enemy in state.enemies.iter().filter(|e| e.active) {
        scene
            .rects
            .push(RectShape::centered(enemy.pos, enemy.half_extent(), COLOR_ENEMY));
    }
    scene.rects.push(RectShape::centered(
        state.player.pos,
        state.player.half_extent(),
        COLOR_PLAYER,
    ));

    // Score top-left
    scene.texts.push(TextItem {
        pos: Vec2::new(HUD_MARGIN, HUD_MARGIN),
        font: HUD_FONT,
        text: format!("Score: {}", state.score),
        color: COLOR_HUD_TEXT,
    });

    // Lives top-right, right-aligned against the world edge
    let lives_text = format!("Lives: {}", state.lives.max(0));
    let (lives_w, _) = metrics.measure(HUD_FONT, &lives_text);
    scene.texts.push(TextItem {
        pos: Vec2::new(WORLD_WIDTH - HUD_MARGIN - lives_w, HUD_MARGIN),
        font: HUD_FONT,
        text: lives_text,
        color: COLOR_HUD_TEXT,
    });

    if state.game_over() {
        let banner = "GAME OVER - press Enter";
        let (w, h) = metrics.measure(BANNER_FONT, banner);
        scene.texts.push(TextItem {
            pos: Vec2::new((WORLD_WIDTH - w) / 2.0, (WORLD_HEIGHT - h) / 2.0),
            font: BANNER_FONT,
            text: banner.to_owned(),
            color: COLOR_HUD_TEXT,
        });
    }

    scene
}

/// Aspect-preserving fit of the world rectangle onto a screen: returns the
/// letterboxed size and the centering offset. Screens larger than the world
/// on both axes get the world at native size.
pub fn fit_viewport(screen: Vec2) -> (Vec2, Vec2) {
    let x_ratio = WORLD_WIDTH / screen.x;
    let y_ratio = WORLD_HEIGHT / screen.y;

    let size = if x_ratio < 1.0 && y_ratio < 1.0 {
        Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)
    } else if x_ratio > y_ratio {
        Vec2::new(screen.x, WORLD_HEIGHT / x_ratio)
    } else {
        Vec2::new(WORLD_WIDTH / y_ratio, screen.y)
    };

    (size, (screen - size) / 2.0)
}

//! Minimal settings overlay: a column of clickable toggle buttons.
//!
//! The HUD works in window pixel coordinates for hit-testing and converts to
//! normalized device coordinates when building its vertex data. There is no
//! text rendering; button state is colour-coded and mirrored by keyboard
//! shortcuts.

use crate::pipelines::HudVertex;
use crate::settings::RenderSettings;

const PANEL_MARGIN: f32 = 10.0;
const PANEL_PADDING: f32 = 8.0;
const BUTTON_WIDTH: f32 = 180.0;
const BUTTON_HEIGHT: f32 = 28.0;
const BUTTON_GAP: f32 = 6.0;

const PANEL_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.45];
const ON_COLOR: [f32; 4] = [0.2, 0.7, 0.3, 0.9];
const OFF_COLOR: [f32; 4] = [0.35, 0.35, 0.35, 0.9];
const HOVER_TINT: f32 = 0.15;

/// Axis-aligned rectangle in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// What a HUD button does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudAction {
    ToggleFog,
    ToggleMagLinear,
    ToggleMinTrilinear,
    ToggleMsaa,
    CycleLodBias,
}

impl HudAction {
    /// Cycled LOD bias values, smallest to largest.
    const LOD_STEPS: [i32; 4] = [0, 1, 2, 3];

    fn apply(self, settings: &mut RenderSettings) {
        match self {
            HudAction::ToggleFog => settings.toggle_fog(),
            HudAction::ToggleMagLinear => settings.toggle_mag_linear(),
            HudAction::ToggleMinTrilinear => settings.toggle_min_trilinear(),
            HudAction::ToggleMsaa => settings.toggle_msaa(),
            HudAction::CycleLodBias => {
                let next = Self::LOD_STEPS
                    .iter()
                    .position(|&b| b == settings.lod_bias)
                    .map(|i| Self::LOD_STEPS[(i + 1) % Self::LOD_STEPS.len()])
                    .unwrap_or(0);
                settings.set_lod_bias(next);
            }
        }
    }

    fn is_on(self, settings: &RenderSettings) -> bool {
        match self {
            HudAction::ToggleFog => settings.fog,
            HudAction::ToggleMagLinear => settings.mag_linear,
            HudAction::ToggleMinTrilinear => settings.min_trilinear,
            HudAction::ToggleMsaa => settings.msaa,
            HudAction::CycleLodBias => settings.lod_bias > 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct HudButton {
    rect: Rect,
    action: HudAction,
}

/// HUD state: button layout, cursor position and hover tracking.
pub struct Hud {
    buttons: Vec<HudButton>,
    panel: Rect,
    window_size: (u32, u32),
    cursor: (f32, f32),
    hovered: Option<usize>,
}

impl Hud {
    const ACTIONS: [HudAction; 5] = [
        HudAction::ToggleFog,
        HudAction::ToggleMagLinear,
        HudAction::ToggleMinTrilinear,
        HudAction::ToggleMsaa,
        HudAction::CycleLodBias,
    ];

    pub fn new(width: u32, height: u32) -> Self {
        let mut hud = Self {
            buttons: Vec::new(),
            panel: Rect {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            window_size: (width, height),
            cursor: (-1.0, -1.0),
            hovered: None,
        };
        hud.layout();
        hud
    }

    /// Recompute button rectangles. The panel sits in the top left corner.
    fn layout(&mut self) {
        self.buttons.clear();
        let mut y = PANEL_MARGIN + PANEL_PADDING;
        for action in Self::ACTIONS {
            self.buttons.push(HudButton {
                rect: Rect {
                    x: PANEL_MARGIN + PANEL_PADDING,
                    y,
                    width: BUTTON_WIDTH,
                    height: BUTTON_HEIGHT,
                },
                action,
            });
            y += BUTTON_HEIGHT + BUTTON_GAP;
        }
        self.panel = Rect {
            x: PANEL_MARGIN,
            y: PANEL_MARGIN,
            width: BUTTON_WIDTH + 2.0 * PANEL_PADDING,
            height: y - PANEL_MARGIN - BUTTON_GAP + PANEL_PADDING,
        };
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
        self.layout();
    }

    /// Track the cursor for hover highlighting.
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
        self.hovered = self
            .buttons
            .iter()
            .position(|button| button.rect.contains(x, y));
    }

    /// Apply the button under `(x, y)`, if any. Returns whether the click
    /// was consumed, so the caller can keep it away from the camera.
    pub fn handle_click(&mut self, x: f32, y: f32, settings: &mut RenderSettings) -> bool {
        let Some(button) = self.buttons.iter().find(|b| b.rect.contains(x, y)) else {
            return self.panel.contains(x, y);
        };
        button.action.apply(settings);
        true
    }

    /// Build the overlay quads for the current settings state.
    pub fn vertices(&self, settings: &RenderSettings) -> Vec<HudVertex> {
        let mut vertices = Vec::with_capacity((self.buttons.len() + 1) * 6);
        self.push_rect(&mut vertices, &self.panel, PANEL_COLOR);
        for (i, button) in self.buttons.iter().enumerate() {
            let mut color = if button.action.is_on(settings) {
                ON_COLOR
            } else {
                OFF_COLOR
            };
            if self.hovered == Some(i) {
                for c in color.iter_mut().take(3) {
                    *c = (*c + HOVER_TINT).min(1.0);
                }
            }
            self.push_rect(&mut vertices, &button.rect, color);
        }
        vertices
    }

    fn push_rect(&self, out: &mut Vec<HudVertex>, rect: &Rect, color: [f32; 4]) {
        let (w, h) = (
            self.window_size.0.max(1) as f32,
            self.window_size.1.max(1) as f32,
        );
        let to_ndc = |px: f32, py: f32| [px / w * 2.0 - 1.0, 1.0 - py / h * 2.0];
        let tl = to_ndc(rect.x, rect.y);
        let tr = to_ndc(rect.x + rect.width, rect.y);
        let bl = to_ndc(rect.x, rect.y + rect.height);
        let br = to_ndc(rect.x + rect.width, rect.y + rect.height);
        for position in [tl, bl, br, tl, br, tr] {
            out.push(HudVertex { position, color });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 20.0,
        };
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(109.9, 29.9));
        assert!(!rect.contains(110.0, 15.0));
        assert!(!rect.contains(50.0, 30.0));
    }

    #[test]
    fn click_on_first_button_toggles_fog() {
        let mut hud = Hud::new(800, 600);
        let mut settings = RenderSettings::default();
        assert!(settings.fog);
        let x = PANEL_MARGIN + PANEL_PADDING + 1.0;
        let y = PANEL_MARGIN + PANEL_PADDING + 1.0;
        assert!(hud.handle_click(x, y, &mut settings));
        assert!(!settings.fog);
    }

    #[test]
    fn click_outside_the_panel_is_not_consumed() {
        let mut hud = Hud::new(800, 600);
        let mut settings = RenderSettings::default();
        let before = settings;
        assert!(!hud.handle_click(700.0, 500.0, &mut settings));
        assert_eq!(before, settings);
    }

    #[test]
    fn lod_bias_cycles_back_to_zero() {
        let mut settings = RenderSettings::default();
        for expected in [1, 2, 3, 0] {
            HudAction::CycleLodBias.apply(&mut settings);
            assert_eq!(settings.lod_bias, expected);
        }
    }

    #[test]
    fn hover_follows_the_cursor() {
        let mut hud = Hud::new(800, 600);
        hud.set_cursor(
            PANEL_MARGIN + PANEL_PADDING + 1.0,
            PANEL_MARGIN + PANEL_PADDING + 1.0,
        );
        assert_eq!(hud.hovered, Some(0));
        hud.set_cursor(700.0, 500.0);
        assert_eq!(hud.hovered, None);
    }

    #[test]
    fn vertices_cover_panel_and_buttons() {
        let hud = Hud::new(800, 600);
        let settings = RenderSettings::default();
        let vertices = hud.vertices(&settings);
        assert_eq!(vertices.len(), (Hud::ACTIONS.len() + 1) * 6);
        // All positions must land inside NDC.
        for v in &vertices {
            assert!(v.position[0] >= -1.0 && v.position[0] <= 1.0);
            assert!(v.position[1] >= -1.0 && v.position[1] <= 1.0);
        }
    }
}

use glam::{EulerRot, Quat, Vec2};

/// Radians of globe rotation per pixel of drag.
pub const DRAG_SENSITIVITY: f32 = 0.005;

/// Pixel dimensions of the display surface pointer events are relative to.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Normalizes surface-relative pixel coordinates to [-1, 1] device
    /// coordinates, +y up.
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x / self.width) * 2.0 - 1.0,
            -(y / self.height) * 2.0 + 1.0,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Device coordinates of the last move; `None` until the pointer first
    /// moves, and no ray is cast until then.
    pub ndc: Option<Vec2>,
    pub dragging: bool,
    /// Screen-pixel position the current drag step is measured from.
    pub drag_origin: Option<Vec2>,
}

/// Accumulated globe rotation driven by pointer drags. Never reset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobeOrientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl GlobeOrientation {
    /// Rotation applied to the whole marker group.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// Currently selected statistic column and its human-readable label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectedStat {
    pub key: String,
    pub label: String,
}

/// Mutable per-session state. Input collaborators write it between ticks,
/// the tick reads it; last write wins, nothing is queued.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub selected: SelectedStat,
    pub pointer: PointerState,
    pub orientation: GlobeOrientation,
}

impl SessionState {
    pub fn select_stat(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.selected = SelectedStat {
            key: key.into(),
            label: label.into(),
        };
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pointer.dragging = true;
        self.pointer.drag_origin = Some(Vec2::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.pointer.dragging = false;
    }

    /// Updates the pointer position and, while a drag is active, rotates
    /// the globe by the screen-space delta since the previous event.
    pub fn pointer_moved(&mut self, x: f32, y: f32, viewport: Viewport) {
        self.pointer.ndc = Some(viewport.to_ndc(x, y));
        if self.pointer.dragging {
            if let Some(origin) = self.pointer.drag_origin {
                self.orientation.yaw += (x - origin.x) * DRAG_SENSITIVITY;
                self.orientation.pitch += (y - origin.y) * DRAG_SENSITIVITY;
            }
            self.pointer.drag_origin = Some(Vec2::new(x, y));
        }
    }
}

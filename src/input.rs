use fnv::FnvHashMap;
use glam::Vec2;

/// Press/drag bookkeeping for the orbit controls.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub start: Vec2,
    pub last: Vec2,
    /// Set once the pointer has travelled further than the click slop.
    pub moved: bool,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, pos: Vec2) {
        *self = DragState {
            active: true,
            pointer_id,
            start: pos,
            last: pos,
            moved: false,
        };
    }

    /// Record a move and return the delta since the previous one.
    pub fn advance(&mut self, pos: Vec2, slop_px: f32) -> Vec2 {
        let delta = pos - self.last;
        self.last = pos;
        if (pos - self.start).length() > slop_px {
            self.moved = true;
        }
        delta
    }

    /// Abandon the drag without it counting as a click (a second finger landed).
    pub fn cancel(&mut self) {
        self.active = false;
        self.moved = true;
    }

    /// End the drag; true if it never left the click slop.
    pub fn finish(&mut self) -> bool {
        let was_click = self.active && !self.moved;
        self.active = false;
        was_click
    }
}

/// Normalized device coordinates (x right, y up, [-1, 1]) for a client-space
/// point over an element rectangle.
#[inline]
pub fn client_to_ndc(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Vec2 {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let local = client - rect_origin;
    Vec2::new(
        (local.x / rect_size.x) * 2.0 - 1.0,
        -(local.y / rect_size.y) * 2.0 + 1.0,
    )
}

/// Wheel delta in pixels to zoom steps (positive zooms out).
#[inline]
pub fn wheel_steps(delta_y: f64, step_px: f32) -> f32 {
    if step_px <= 0.0 {
        return 0.0;
    }
    (delta_y as f32 / step_px).clamp(-3.0, 3.0)
}

/// Pointers currently pressed on the canvas, keyed by pointer id.
///
/// With exactly two pointers down the change in their separation is a pinch.
#[derive(Default, Clone)]
pub struct PointerTracker {
    points: FnvHashMap<i32, Vec2>,
    pinch_distance: Option<f32>,
}

impl PointerTracker {
    /// Register a press and return how many pointers are now down.
    pub fn down(&mut self, pointer_id: i32, pos: Vec2) -> usize {
        self.points.insert(pointer_id, pos);
        self.pinch_distance = self.spread();
        self.points.len()
    }

    /// Record a move. Returns zoom steps while two pointers are pinching.
    pub fn move_to(&mut self, pointer_id: i32, pos: Vec2, step_px: f32) -> Option<f32> {
        *self.points.get_mut(&pointer_id)? = pos;
        let distance = self.spread()?;
        let previous = self.pinch_distance.replace(distance)?;
        Some(pinch_zoom_steps(previous, distance, step_px))
    }

    pub fn up(&mut self, pointer_id: i32) {
        self.points.remove(&pointer_id);
        self.pinch_distance = self.spread();
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    fn spread(&self) -> Option<f32> {
        if self.points.len() != 2 {
            return None;
        }
        let mut it = self.points.values();
        let (a, b) = (it.next()?, it.next()?);
        Some(a.distance(*b))
    }
}

/// Zoom steps for a pinch whose finger separation went from `previous` to
/// `current` pixels. Spreading the fingers zooms in (negative steps).
#[inline]
pub fn pinch_zoom_steps(previous: f32, current: f32, step_px: f32) -> f32 {
    if step_px <= 0.0 {
        return 0.0;
    }
    ((previous - current) / step_px).clamp(-3.0, 3.0)
}

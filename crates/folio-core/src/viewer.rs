//! Lightbox pan/zoom state for a single image.
//!
//! The viewer distinguishes a tap (zoom in) from the start of a drag (pan) by
//! wall-clock and distance thresholds. These thresholds are policy:
//! a press/release pair is a click only if it moved strictly less than
//! [`CLICK_SLOP_PX`] and lasted strictly less than [`CLICK_WINDOW_MS`].

use crate::geometry::{Point, Rect, Size};
use derive_more::{Display, From, Into};

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 5.0;
pub const ZOOM_STEP: f64 = 0.5;
pub const WHEEL_ZOOM_FACTOR: f64 = 0.001;
pub const CLICK_SLOP_PX: f64 = 5.0;
pub const CLICK_WINDOW_MS: u64 = 200;

/// Event time in milliseconds, as delivered by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, From, Into)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn millis_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl From<u32> for Timestamp {
    fn from(ms: u32) -> Self {
        Self(ms as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other(u32),
}

impl From<u32> for PointerButton {
    fn from(button: u32) -> Self {
        match button {
            1 => Self::Primary,
            3 => Self::Secondary,
            b => Self::Other(b),
        }
    }
}

/// Reported upward so the carousel can hide its chrome and release keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Opened,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Click,
    Drag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// The host must swallow the event so the page does not zoom or scroll.
    Zoomed,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    at: Point,
    time: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    scale: f64,
    pan: Point,
    /// Pointer position minus pan at the moment the drag began.
    drag_anchor: Option<Point>,
    press: Option<Press>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            scale: MIN_SCALE,
            pan: Point::ORIGIN,
            drag_anchor: None,
            press: None,
        }
    }
}

impl ViewerState {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        if self.scale == MIN_SCALE {
            self.pan = Point::ORIGIN;
        }
    }

    /// Fits `image` inside `viewport`, then applies zoom around the viewport
    /// center and the pan offset.
    pub fn image_rect(&self, viewport: Size, image: Size) -> Rect {
        if viewport.is_empty() || image.is_empty() {
            return Rect::default();
        }
        let fit = (viewport.width / image.width).min(viewport.height / image.height);
        let size = Size::new(
            image.width * fit * self.scale,
            image.height * fit * self.scale,
        );
        let center = Point::new(
            viewport.width / 2.0 + self.pan.x,
            viewport.height / 2.0 + self.pan.y,
        );
        Rect::new(
            Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
            size,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Viewer {
    state: Option<ViewerState>,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&ViewerState> {
        self.state.as_ref()
    }

    pub fn scale(&self) -> f64 {
        self.state.as_ref().map_or(MIN_SCALE, ViewerState::scale)
    }

    pub fn pan(&self) -> Point {
        self.state.as_ref().map_or(Point::ORIGIN, ViewerState::pan)
    }

    pub fn open(&mut self) -> ViewerEvent {
        self.state = Some(ViewerState::default());
        log::debug!("viewer opened");
        ViewerEvent::Opened
    }

    pub fn close(&mut self) -> ViewerEvent {
        self.state = None;
        log::debug!("viewer closed");
        ViewerEvent::Closed
    }

    pub fn zoom_in(&mut self) {
        if let Some(s) = self.state.as_mut() {
            s.set_scale(s.scale + ZOOM_STEP);
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(s) = self.state.as_mut() {
            s.set_scale(s.scale - ZOOM_STEP);
        }
    }

    pub fn press(&mut self, button: PointerButton, at: Point, time: Timestamp) {
        match button {
            PointerButton::Primary => {
                if let Some(s) = self.state.as_mut() {
                    s.press = Some(Press { at, time });
                    s.drag_anchor = Some(at - s.pan);
                }
            }
            PointerButton::Secondary => self.zoom_out(),
            PointerButton::Other(_) => {}
        }
    }

    pub fn motion(&mut self, at: Point) {
        let Some(s) = self.state.as_mut() else {
            return;
        };
        if let Some(anchor) = s.drag_anchor {
            // Panning is locked while the image is at its fitted size.
            if s.scale > MIN_SCALE {
                s.pan = at - anchor;
            }
        }
    }

    /// Ends a primary press. Returns how the press was classified, or `None`
    /// when no primary press was in progress.
    pub fn release(&mut self, at: Point, time: Timestamp) -> Option<Gesture> {
        let s = self.state.as_mut()?;
        s.drag_anchor = None;
        let press = s.press.take()?;

        let gesture = if press.at.distance_to(at) < CLICK_SLOP_PX
            && time.millis_since(press.time) < CLICK_WINDOW_MS
        {
            Gesture::Click
        } else {
            Gesture::Drag
        };
        if gesture == Gesture::Click {
            self.zoom_in();
        }
        Some(gesture)
    }

    /// Pointer left the tracking surface.
    pub fn leave(&mut self) {
        if let Some(s) = self.state.as_mut() {
            s.drag_anchor = None;
            s.press = None;
        }
    }

    pub fn wheel(&mut self, delta_y: f64, modifier: bool) -> WheelOutcome {
        let Some(s) = self.state.as_mut() else {
            return WheelOutcome::Ignored;
        };
        if !modifier {
            return WheelOutcome::Ignored;
        }
        s.set_scale(s.scale - delta_y * WHEEL_ZOOM_FACTOR);
        WheelOutcome::Zoomed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::wheel_pixels;

    fn opened() -> Viewer {
        let mut v = Viewer::new();
        v.open();
        v
    }

    fn tap(v: &mut Viewer, from: Point, to: Point, ms: u64) -> Option<Gesture> {
        v.press(PointerButton::Primary, from, Timestamp::from(1_000u64));
        v.motion(to);
        v.release(to, Timestamp::from(1_000 + ms))
    }

    #[test]
    fn test_quick_still_tap_zooms_in() {
        let mut v = opened();
        let at = Point::new(100.0, 100.0);
        assert_eq!(tap(&mut v, at, Point::new(103.0, 103.0), 150), Some(Gesture::Click));
        assert_eq!(v.scale(), 1.5);
    }

    #[test]
    fn test_click_thresholds_are_strict() {
        let at = Point::new(0.0, 0.0);

        let mut v = opened();
        assert_eq!(tap(&mut v, at, Point::new(5.0, 0.0), 10), Some(Gesture::Drag));
        assert_eq!(v.scale(), 1.0);

        let mut v = opened();
        assert_eq!(tap(&mut v, at, at, 200), Some(Gesture::Drag));
        assert_eq!(v.scale(), 1.0);

        let mut v = opened();
        assert_eq!(tap(&mut v, at, Point::new(4.9, 0.0), 199), Some(Gesture::Click));
        assert_eq!(v.scale(), 1.5);
    }

    #[test]
    fn test_scale_stays_clamped() {
        let mut v = opened();
        for _ in 0..20 {
            v.zoom_in();
        }
        assert_eq!(v.scale(), MAX_SCALE);
        assert_eq!(v.wheel(-10_000.0, true), WheelOutcome::Zoomed);
        assert_eq!(v.scale(), MAX_SCALE);

        for _ in 0..20 {
            v.press(PointerButton::Secondary, Point::ORIGIN, Timestamp::default());
        }
        assert_eq!(v.scale(), MIN_SCALE);
        v.wheel(10_000.0, true);
        assert_eq!(v.scale(), MIN_SCALE);
    }

    #[test]
    fn test_wheel_notches_zoom_in_tenths() {
        let mut v = opened();
        v.wheel(wheel_pixels(-1.0), true);
        assert!((v.scale() - 1.1).abs() < 1e-9);
        for _ in 1..10 {
            v.wheel(wheel_pixels(-1.0), true);
        }
        assert!((v.scale() - 2.0).abs() < 1e-9);
        v.wheel(wheel_pixels(0.5), true);
        assert!((v.scale() - 1.95).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_requires_modifier() {
        let mut v = opened();
        assert_eq!(v.wheel(-500.0, false), WheelOutcome::Ignored);
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.wheel(-500.0, true), WheelOutcome::Zoomed);
        assert!((v.scale() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_returning_to_fitted_size_resets_pan() {
        let mut v = opened();
        v.zoom_in();
        v.press(PointerButton::Primary, Point::new(10.0, 10.0), Timestamp::from(0u64));
        v.motion(Point::new(60.0, 30.0));
        assert_eq!(v.release(Point::new(60.0, 30.0), Timestamp::from(500u64)), Some(Gesture::Drag));
        assert_eq!(v.pan(), Point::new(50.0, 20.0));

        v.press(PointerButton::Secondary, Point::ORIGIN, Timestamp::from(600u64));
        assert_eq!(v.scale(), 1.0);
        assert_eq!(v.pan(), Point::ORIGIN);

        v.zoom_in();
        v.press(PointerButton::Primary, Point::new(0.0, 0.0), Timestamp::from(700u64));
        v.motion(Point::new(-40.0, 0.0));
        v.leave();
        assert_eq!(v.pan(), Point::new(-40.0, 0.0));
        v.wheel(1_000.0, true);
        assert_eq!(v.pan(), Point::ORIGIN);
    }

    #[test]
    fn test_drag_continues_from_current_pan() {
        let mut v = opened();
        v.zoom_in();
        v.zoom_in();
        v.press(PointerButton::Primary, Point::new(0.0, 0.0), Timestamp::from(0u64));
        v.motion(Point::new(20.0, 0.0));
        v.release(Point::new(20.0, 0.0), Timestamp::from(400u64));
        v.press(PointerButton::Primary, Point::new(100.0, 100.0), Timestamp::from(1_000u64));
        v.motion(Point::new(110.0, 90.0));
        assert_eq!(v.pan(), Point::new(30.0, -10.0));
    }

    #[test]
    fn test_drag_at_fitted_size_does_not_pan() {
        let mut v = opened();
        v.press(PointerButton::Primary, Point::new(0.0, 0.0), Timestamp::from(0u64));
        v.motion(Point::new(80.0, 80.0));
        assert!(v.state().is_some_and(ViewerState::is_dragging));
        assert_eq!(v.pan(), Point::ORIGIN);
        assert_eq!(v.release(Point::new(80.0, 80.0), Timestamp::from(50u64)), Some(Gesture::Drag));
        assert!(!v.state().is_some_and(ViewerState::is_dragging));
    }

    #[test]
    fn test_leave_cancels_pending_click() {
        let mut v = opened();
        v.press(PointerButton::Primary, Point::ORIGIN, Timestamp::from(0u64));
        v.leave();
        assert_eq!(v.release(Point::ORIGIN, Timestamp::from(10u64)), None);
        assert_eq!(v.scale(), 1.0);
    }

    #[test]
    fn test_close_resets_everything() {
        let mut v = opened();
        v.zoom_in();
        v.zoom_in();
        assert_eq!(v.close(), ViewerEvent::Closed);
        assert!(!v.is_open());
        assert_eq!(v.open(), ViewerEvent::Opened);
        assert_eq!(v.state(), Some(&ViewerState::default()));
    }

    #[test]
    fn test_input_while_closed_is_ignored() {
        let mut v = Viewer::new();
        v.zoom_in();
        v.press(PointerButton::Primary, Point::ORIGIN, Timestamp::default());
        assert_eq!(v.release(Point::ORIGIN, Timestamp::default()), None);
        assert_eq!(v.wheel(-100.0, true), WheelOutcome::Ignored);
        assert_eq!(v.scale(), 1.0);
    }

    #[test]
    fn test_image_rect_fits_then_scales() {
        let mut v = opened();
        let viewport = Size::new(800.0, 600.0);
        let image = Size::new(400.0, 400.0);
        let r = v.state().unwrap().image_rect(viewport, image);
        assert_eq!(r.size, Size::new(600.0, 600.0));
        assert_eq!(r.origin, Point::new(100.0, 0.0));

        v.zoom_in();
        let r = v.state().unwrap().image_rect(viewport, image);
        assert_eq!(r.size, Size::new(900.0, 900.0));
        assert_eq!(r.center(), Point::new(400.0, 300.0));
    }
}

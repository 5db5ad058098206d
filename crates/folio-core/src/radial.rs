//! Gesture-triggered radial quick menu.
//!
//! Closed by default. An upward swipe or an upward scroll opens it; the
//! thresholds are strict, so a swipe of exactly [`SWIPE_OPEN_PX`] or a scroll
//! of exactly [`SCROLL_OPEN_DELTA`] leaves it closed.

use crate::geometry::Point;
use crate::route::Route;
use std::f64::consts::PI;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

pub const SWIPE_OPEN_PX: f64 = 50.0;
pub const SCROLL_OPEN_DELTA: f64 = -30.0;
pub const ITEM_ORBIT_RADIUS: f64 = 120.0;
pub const ITEM_RADIUS: f64 = 40.0;
pub const CENTER_RADIUS: f64 = 40.0;
pub const NAVIGATE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum MenuAction {
    About,
    ToggleTheme,
    Contact,
}

impl MenuAction {
    /// Clockwise from straight up, in degrees.
    pub fn angle_degrees(&self) -> f64 {
        match self {
            Self::About => -60.0,
            Self::ToggleTheme => 0.0,
            Self::Contact => 60.0,
        }
    }

    pub fn label(&self, dark: bool) -> &'static str {
        match self {
            Self::About => "ABOUT",
            Self::ToggleTheme if dark => "LIGHT",
            Self::ToggleTheme => "DARK",
            Self::Contact => "CONTACT",
        }
    }

    /// Offset of the item center from the menu center.
    pub fn offset(&self) -> Point {
        let rad = self.angle_degrees() * PI / 180.0;
        Point::new(rad.sin() * ITEM_ORBIT_RADIUS, -rad.cos() * ITEM_ORBIT_RADIUS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Item(MenuAction),
    Center,
    Backdrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The menu has closed; the host navigates after `delay` so the closing
    /// animation can play.
    Navigate { route: Route, delay: Duration },
    /// The menu stays open.
    ToggleTheme,
    Closed,
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct RadialMenu {
    open: bool,
    swipe_origin: Option<f64>,
    hover: Option<MenuAction>,
}

impl RadialMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn hovered(&self) -> Option<MenuAction> {
        self.hover
    }

    fn set_open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        log::debug!("radial menu opened");
        true
    }

    pub fn touch_start(&mut self, y: f64) {
        self.swipe_origin = Some(y);
    }

    /// Returns true if this movement opened the menu.
    pub fn touch_move(&mut self, y: f64) -> bool {
        match self.swipe_origin {
            Some(start) if start - y > SWIPE_OPEN_PX => self.set_open(),
            _ => false,
        }
    }

    pub fn touch_end(&mut self) {
        self.swipe_origin = None;
    }

    /// Returns true if this scroll opened the menu.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        delta_y < SCROLL_OPEN_DELTA && self.set_open()
    }

    pub fn close(&mut self) {
        if self.open {
            log::debug!("radial menu closed");
        }
        self.open = false;
        self.hover = None;
    }

    pub fn activate(&mut self, action: MenuAction) -> MenuOutcome {
        if !self.open {
            return MenuOutcome::Ignored;
        }
        let route = match action {
            MenuAction::ToggleTheme => return MenuOutcome::ToggleTheme,
            MenuAction::About => Route::About,
            MenuAction::Contact => Route::Contact,
        };
        self.close();
        MenuOutcome::Navigate {
            route,
            delay: NAVIGATE_DELAY,
        }
    }

    /// Dispatches a click at `cursor`, relative to a menu centered at `center`.
    pub fn click(&mut self, center: Point, cursor: Point) -> MenuOutcome {
        if !self.open {
            return MenuOutcome::Ignored;
        }
        match Self::hit_test(center, cursor) {
            MenuTarget::Item(action) => self.activate(action),
            MenuTarget::Center | MenuTarget::Backdrop => {
                self.close();
                MenuOutcome::Closed
            }
        }
    }

    pub fn hit_test(center: Point, cursor: Point) -> MenuTarget {
        if center.distance_to(cursor) <= CENTER_RADIUS {
            return MenuTarget::Center;
        }
        MenuAction::iter()
            .find(|a| (center + a.offset()).distance_to(cursor) <= ITEM_RADIUS)
            .map_or(MenuTarget::Backdrop, MenuTarget::Item)
    }

    /// Tracks the hovered item; returns true when a redraw is needed.
    pub fn update_cursor(&mut self, center: Point, cursor: Point) -> bool {
        let hover = match (self.open, Self::hit_test(center, cursor)) {
            (true, MenuTarget::Item(action)) => Some(action),
            _ => None,
        };
        let changed = hover != self.hover;
        self.hover = hover;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::wheel_pixels;

    #[test]
    fn test_swipe_threshold_is_strict() {
        let mut m = RadialMenu::new();
        m.touch_start(500.0);
        assert!(!m.touch_move(450.0));
        assert!(!m.is_open());
        assert!(m.touch_move(449.0));
        assert!(m.is_open());
        assert!(!m.touch_move(300.0));
    }

    #[test]
    fn test_downward_swipe_never_opens() {
        let mut m = RadialMenu::new();
        m.touch_start(100.0);
        assert!(!m.touch_move(400.0));
        m.touch_end();
        assert!(!m.touch_move(0.0));
        assert!(!m.is_open());
    }

    #[test]
    fn test_scroll_threshold_is_strict() {
        let mut m = RadialMenu::new();
        assert!(!m.wheel(-30.0));
        assert!(!m.wheel(80.0));
        assert!(m.wheel(-30.5));
        assert!(m.is_open());
    }

    #[test]
    fn test_one_wheel_notch_opens() {
        let mut m = RadialMenu::new();
        assert!(!m.wheel(wheel_pixels(-0.25)));
        assert!(m.wheel(wheel_pixels(-1.0)));
    }

    #[test]
    fn test_theme_toggle_keeps_menu_open() {
        let mut m = RadialMenu::new();
        m.wheel(-100.0);
        assert_eq!(m.activate(MenuAction::ToggleTheme), MenuOutcome::ToggleTheme);
        assert!(m.is_open());
    }

    #[test]
    fn test_navigation_closes_then_defers() {
        let mut m = RadialMenu::new();
        m.wheel(-100.0);
        assert_eq!(
            m.activate(MenuAction::Contact),
            MenuOutcome::Navigate {
                route: Route::Contact,
                delay: Duration::from_millis(300)
            }
        );
        assert!(!m.is_open());
        assert_eq!(m.activate(MenuAction::About), MenuOutcome::Ignored);
    }

    #[test]
    fn test_item_layout() {
        let up = MenuAction::ToggleTheme.offset();
        assert!(up.x.abs() < 1e-9);
        assert!((up.y + ITEM_ORBIT_RADIUS).abs() < 1e-9);
        assert!(MenuAction::About.offset().x < 0.0);
        assert!(MenuAction::Contact.offset().x > 0.0);
        assert!((MenuAction::About.offset().y - MenuAction::Contact.offset().y).abs() < 1e-9);
    }

    #[test]
    fn test_clicks_resolve_targets() {
        let center = Point::new(400.0, 700.0);
        let mut m = RadialMenu::new();
        m.wheel(-100.0);

        let theme = center + MenuAction::ToggleTheme.offset();
        assert_eq!(m.click(center, theme), MenuOutcome::ToggleTheme);
        assert!(m.is_open());

        assert_eq!(m.click(center, Point::new(10.0, 10.0)), MenuOutcome::Closed);
        assert!(!m.is_open());

        m.wheel(-100.0);
        assert_eq!(m.click(center, center), MenuOutcome::Closed);

        m.wheel(-100.0);
        let about = center + MenuAction::About.offset();
        assert!(matches!(
            m.click(center, about),
            MenuOutcome::Navigate {
                route: Route::About,
                ..
            }
        ));
    }

    #[test]
    fn test_hover_only_while_open() {
        let center = Point::ORIGIN;
        let contact = MenuAction::Contact.offset();
        let mut m = RadialMenu::new();
        assert!(!m.update_cursor(center, contact));
        m.wheel(-100.0);
        assert!(m.update_cursor(center, contact));
        assert_eq!(m.hovered(), Some(MenuAction::Contact));
        assert!(!m.update_cursor(center, contact));
        m.close();
        assert_eq!(m.hovered(), None);
    }

    #[test]
    fn test_theme_label_names_the_other_mode() {
        assert_eq!(MenuAction::ToggleTheme.label(true), "LIGHT");
        assert_eq!(MenuAction::ToggleTheme.label(false), "DARK");
    }
}

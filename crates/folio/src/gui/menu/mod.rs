pub mod view;

pub use view::draw;

use folio_core::Point;
use folio_core::radial::{CENTER_RADIUS, MenuAction};

pub const BOTTOM_MARGIN: f64 = 24.0;
pub const LABEL_FONT_SIZE: f64 = 10.0;
pub const CENTER_MARK_SIZE: f64 = 10.0;
pub const BORDER_WIDTH: f64 = 1.0;

/// Center of the main button, pinned to the bottom edge of the page.
pub fn menu_center(width: f64, height: f64) -> Point {
    Point::new(width / 2.0, height - BOTTOM_MARGIN - CENTER_RADIUS)
}

pub fn item_center(center: Point, action: MenuAction) -> Point {
    center + action.offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::radial::{ITEM_ORBIT_RADIUS, MenuTarget, RadialMenu};

    #[test]
    fn test_menu_center_sits_above_bottom_edge() {
        assert_eq!(menu_center(800.0, 600.0), Point::new(400.0, 536.0));
    }

    #[test]
    fn test_items_hit_where_drawn() {
        let center = menu_center(800.0, 600.0);
        let about = item_center(center, MenuAction::About);
        assert!((center.distance_to(about) - ITEM_ORBIT_RADIUS).abs() < 1e-9);
        for action in [MenuAction::About, MenuAction::ToggleTheme, MenuAction::Contact] {
            assert_eq!(
                RadialMenu::hit_test(center, item_center(center, action)),
                MenuTarget::Item(action)
            );
        }
    }
}

use super::{BORDER_WIDTH, CENTER_MARK_SIZE, LABEL_FONT_SIZE, item_center};
use crate::gui::theme::{ThemeColors, set_source};
use cairo::Context;
use folio_core::radial::{CENTER_RADIUS, ITEM_RADIUS, MenuAction, RadialMenu};
use folio_core::{Point, Size};
use palette::Srgba;
use std::f64::consts::PI;
use strum::IntoEnumIterator;

struct ItemRenderer {
    action: MenuAction,
    center: Point,
    hovered: bool,
    dark: bool,
}

impl ItemRenderer {
    fn new(action: MenuAction, menu_center: Point, hovered: bool, dark: bool) -> Self {
        Self {
            action,
            center: item_center(menu_center, action),
            hovered,
            dark,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_circle(cr, colors)?;
        self.draw_text(cr, colors)?;
        Ok(())
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let state = ItemState::resolve(self.hovered);
        cr.arc(self.center.x, self.center.y, ITEM_RADIUS, 0.0, 2.0 * PI);
        set_source(cr, state.color(colors));
        cr.fill_preserve()?;
        set_source(cr, colors.item_border);
        cr.set_line_width(BORDER_WIDTH);
        cr.stroke()
    }

    fn draw_text(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let text = self.action.label(self.dark);
        set_source(cr, colors.item_text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE);
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(
                self.center.x - ext.width() / 2.0 - ext.x_bearing(),
                self.center.y + ext.height() / 2.0,
            );
            cr.show_text(text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemState {
    Hovered,
    Idle,
}

impl ItemState {
    fn resolve(hovered: bool) -> Self {
        if hovered { Self::Hovered } else { Self::Idle }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Hovered => colors.item_hovered,
            Self::Idle => colors.item,
        }
    }
}

/// Draws the open menu over a page of `size`; a closed menu draws nothing.
pub fn draw(
    cr: &Context,
    menu: &RadialMenu,
    center: Point,
    size: Size,
    dark: bool,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if !menu.is_open() {
        return Ok(());
    }

    set_source(cr, colors.scrim);
    cr.rectangle(0.0, 0.0, size.width, size.height);
    cr.fill()?;

    for action in MenuAction::iter() {
        ItemRenderer::new(action, center, menu.hovered() == Some(action), dark).draw(cr, colors)?;
    }
    draw_center_circle(cr, center, colors)
}

/// The close button: a filled disc with an x.
fn draw_center_circle(
    cr: &Context,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.center);
    cr.arc(center.x, center.y, CENTER_RADIUS, 0.0, 2.0 * PI);
    cr.fill()?;

    let h = CENTER_MARK_SIZE / 2.0;
    set_source(cr, colors.center_mark);
    cr.set_line_width(2.0);
    cr.move_to(center.x - h, center.y - h);
    cr.line_to(center.x + h, center.y + h);
    cr.move_to(center.x + h, center.y - h);
    cr.line_to(center.x - h, center.y + h);
    cr.stroke()
}

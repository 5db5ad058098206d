use crate::config::BackdropConfig;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use folio_core::backdrop::{GridField, GridStyle};
use folio_core::{Point, Size};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

/// Grid drawing area behind one page. It only animates while started; the
/// frame callback is removed again on `stop` or drop.
pub struct Backdrop {
    area: gtk::DrawingArea,
    field: Rc<RefCell<GridField>>,
    tick: Option<gtk::TickCallbackId>,
}

impl Backdrop {
    pub fn new(config: &BackdropConfig) -> Self {
        let area = gtk::DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .can_target(false)
            .build();
        area.add_css_class("backdrop");

        let field = Rc::new(RefCell::new(GridField::new(
            config.style,
            config.spacing,
            config.radius,
        )));

        {
            let field = field.clone();
            area.connect_resize(move |_, w, h| {
                field
                    .borrow_mut()
                    .resize(Size::new(w as f64, h as f64));
            });
        }

        {
            let field = field.clone();
            area.set_draw_func(move |_, cr, _, _| {
                let colors = ThemeColors::current();
                if let Err(e) = draw(cr, &field.borrow(), &colors) {
                    log::error!("Backdrop drawing error: {}", e);
                }
            });
        }

        Self {
            area,
            field,
            tick: None,
        }
    }

    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    /// Feeds pointer movement over `surface` into the grid.
    pub fn track(&self, surface: &impl IsA<gtk::Widget>) {
        let motion = gtk::EventControllerMotion::new();
        {
            let field = self.field.clone();
            motion.connect_motion(move |_, x, y| {
                field.borrow_mut().pointer_moved(Point::new(x, y))
            });
        }
        {
            let field = self.field.clone();
            motion.connect_leave(move |_| field.borrow_mut().pointer_left());
        }
        surface.add_controller(motion);
    }

    pub fn start(&mut self) {
        if self.tick.is_none() {
            self.tick = Some(self.area.add_tick_callback(|area, _| {
                area.queue_draw();
                glib::ControlFlow::Continue
            }));
        }
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.tick.take() {
            id.remove();
        }
    }

    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    pub fn reconfigure(&self, config: &BackdropConfig) {
        let mut field = self.field.borrow_mut();
        field.set_style(config.style);
        field.configure(config.spacing, config.radius);
        self.area.queue_draw();
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn draw(cr: &Context, field: &GridField, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (r, g, b, _) = colors.grid.into_components();
    match field.style() {
        GridStyle::Dots => {
            for dot in field.dots() {
                cr.set_source_rgba(r, g, b, dot.alpha);
                cr.arc(dot.at.x, dot.at.y, dot.size, 0.0, 2.0 * PI);
                cr.fill()?;
            }
        }
        GridStyle::Lattice => {
            cr.set_line_width(1.0);
            for link in field.links() {
                cr.set_source_rgba(r, g, b, link.alpha);
                cr.move_to(link.from.x, link.from.y);
                cr.line_to(link.to.x, link.to.y);
                cr.stroke()?;
            }
        }
    }
    Ok(())
}

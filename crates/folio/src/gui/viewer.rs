use crate::gui::theme::{ThemeColors, set_source};
use cairo::Context;
use folio_core::geometry::wheel_pixels;
use folio_core::viewer::{PointerButton, Timestamp, Viewer, ViewerEvent, WheelOutcome};
use folio_core::{Point, Size};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Full-window lightbox over the carousel.
pub struct ViewerModel {
    viewer: Rc<RefCell<Viewer>>,
    image: Rc<RefCell<Option<Pixbuf>>>,
    open: bool,
    title: String,
    drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum ViewerMsg {
    Open { path: PathBuf, title: String },
    Close,
    Press { button: u32, at: Point, time: u32 },
    Release { at: Point, time: u32 },
    Motion(Point),
    Leave,
    /// Vertical wheel travel in pixels.
    Wheel(f64),
}

impl ViewerModel {
    fn zoom_label(&self) -> String {
        format!("{:.0}%", self.viewer.borrow().scale() * 100.0)
    }
}

#[relm4::component(pub)]
impl SimpleComponent for ViewerModel {
    type Init = ();
    type Input = ViewerMsg;
    type Output = ViewerEvent;

    view! {
        #[root]
        gtk::Overlay {
            add_css_class: "lightbox",
            set_hexpand: true,
            set_vexpand: true,
            #[watch]
            set_visible: model.open,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,

                add_controller = gtk::GestureClick {
                    set_button: 0,
                    connect_pressed[sender] => move |gesture, _, x, y| {
                        let button = gesture.current_button();
                        if PointerButton::from(button) == PointerButton::Secondary {
                            // keep the desktop context menu away
                            gesture.set_state(gtk::EventSequenceState::Claimed);
                        }
                        sender.input(ViewerMsg::Press {
                            button,
                            at: Point::new(x, y),
                            time: gesture.current_event_time(),
                        });
                    },
                    connect_released[sender] => move |gesture, _, x, y| {
                        if PointerButton::from(gesture.current_button()) == PointerButton::Primary {
                            sender.input(ViewerMsg::Release {
                                at: Point::new(x, y),
                                time: gesture.current_event_time(),
                            });
                        }
                    }
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(ViewerMsg::Motion(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(ViewerMsg::Leave);
                    }
                },
            },

            add_overlay = &gtk::Button {
                set_icon_name: "window-close-symbolic",
                set_tooltip_text: Some("Close"),
                set_halign: gtk::Align::End,
                set_valign: gtk::Align::Start,
                set_margin_all: 24,
                add_css_class: "circle-button",
                add_css_class: "on-image",
                connect_clicked => ViewerMsg::Close,
            },

            add_overlay = &gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_halign: gtk::Align::Start,
                set_valign: gtk::Align::End,
                set_margin_all: 24,
                set_spacing: 4,
                set_can_target: false,

                gtk::Label {
                    add_css_class: "lightbox-title",
                    set_halign: gtk::Align::Start,
                    #[watch]
                    set_label: &model.title,
                },
                gtk::Label {
                    add_css_class: "lightbox-hint",
                    set_halign: gtk::Align::Start,
                    #[watch]
                    set_label: &format!(
                        "{}  ·  click to zoom in, right click to zoom out, ctrl + scroll to zoom",
                        model.zoom_label()
                    ),
                },
            },
        }
    }

    fn init(
        _init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = ViewerModel {
            viewer: Rc::new(RefCell::new(Viewer::new())),
            image: Rc::new(RefCell::new(None)),
            open: false,
            title: String::new(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let viewer_draw = model.viewer.clone();
        let image_draw = model.image.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, w, h| {
                let viewport = Size::new(w as f64, h as f64);
                let image = image_draw.borrow();
                if let Err(e) = draw(cr, &viewer_draw.borrow(), image.as_ref(), viewport) {
                    log::error!("Viewer drawing error: {}", e);
                }
            });

        // The wheel has to decide synchronously whether to swallow the
        // scroll, so it reads the viewer state here.
        let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
        let viewer_scroll = model.viewer.clone();
        scroll.connect_scroll(move |controller, _, dy| {
            let modifier = controller
                .current_event_state()
                .intersects(gdk4::ModifierType::CONTROL_MASK | gdk4::ModifierType::META_MASK);
            if modifier && viewer_scroll.borrow().is_open() {
                sender.input(ViewerMsg::Wheel(wheel_pixels(dy)));
                glib::Propagation::Stop
            } else {
                glib::Propagation::Proceed
            }
        });
        widgets.drawing_area.add_controller(scroll);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        let event = {
            let mut viewer = self.viewer.borrow_mut();
            match msg {
                ViewerMsg::Open { path, title } => {
                    let image = match Pixbuf::from_file(&path) {
                        Ok(p) => Some(p),
                        Err(e) => {
                            log::warn!("Failed to load {}: {}", path.display(), e);
                            None
                        }
                    };
                    *self.image.borrow_mut() = image;
                    self.title = title;
                    self.open = true;
                    Some(viewer.open())
                }
                ViewerMsg::Close => {
                    if !viewer.is_open() {
                        return;
                    }
                    self.open = false;
                    *self.image.borrow_mut() = None;
                    Some(viewer.close())
                }
                ViewerMsg::Press { button, at, time } => {
                    viewer.press(PointerButton::from(button), at, Timestamp::from(time));
                    None
                }
                ViewerMsg::Release { at, time } => {
                    if let Some(gesture) = viewer.release(at, Timestamp::from(time)) {
                        log::debug!("viewer {:?} at {:.1}x", gesture, viewer.scale());
                    }
                    None
                }
                ViewerMsg::Motion(at) => {
                    viewer.motion(at);
                    None
                }
                ViewerMsg::Leave => {
                    viewer.leave();
                    None
                }
                ViewerMsg::Wheel(dy) => {
                    if viewer.wheel(dy, true) == WheelOutcome::Ignored {
                        return;
                    }
                    None
                }
            }
        };

        self.drawing_area.queue_draw();
        if let Some(event) = event {
            let _ = sender.output(event);
        }
    }
}

/// Paints the image fitted to `viewport` under the current zoom and pan.
pub fn draw(
    cr: &Context,
    viewer: &Viewer,
    image: Option<&Pixbuf>,
    viewport: Size,
) -> Result<(), cairo::Error> {
    let Some(state) = viewer.state() else {
        return Ok(());
    };
    let Some(pixbuf) = image else {
        return draw_placeholder(cr, viewport);
    };

    let natural = Size::new(pixbuf.width() as f64, pixbuf.height() as f64);
    if natural.is_empty() {
        return Ok(());
    }
    let rect = state.image_rect(viewport, natural);

    cr.save()?;
    cr.translate(rect.origin.x, rect.origin.y);
    cr.scale(rect.size.width / natural.width, rect.size.height / natural.height);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    cr.paint()?;
    cr.restore()
}

fn draw_placeholder(cr: &Context, viewport: Size) -> Result<(), cairo::Error> {
    let text = "Image unavailable";
    set_source(cr, ThemeColors::dark().placeholder);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(14.0);
    if let Ok(ext) = cr.text_extents(text) {
        cr.move_to(
            (viewport.width - ext.width()) / 2.0,
            (viewport.height + ext.height()) / 2.0,
        );
        cr.show_text(text)?;
    }
    Ok(())
}

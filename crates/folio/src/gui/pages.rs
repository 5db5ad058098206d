//! Static page layouts. Behaviour lives in the components that own them.

use crate::gui::app::{AppModel, AppMsg};
use crate::gui::backdrop::Backdrop;
use crate::gui::carousel::{CarouselModel, CarouselMsg};
use crate::gui::window;
use folio_core::Point;
use folio_core::geometry::wheel_pixels;
use folio_core::content::{Link, Profile, ProjectRecord};
use folio_core::route::Route;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::path::Path;

pub const PAGE_MARGIN: i32 = 32;

const CONTACT_BLURB: &str = "Working on something interesting? Need help with a project? \
Feel free to reach out. I'm always open to discussing new ideas.";

fn label(text: &str, class: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text));
    label.add_css_class(class);
    label.set_wrap(true);
    label.set_xalign(0.0);
    label
}

fn eyebrow(text: &str) -> gtk::Label {
    label(&text.to_uppercase(), "eyebrow")
}

fn text_button(text: &str, on_click: impl Fn() + 'static) -> gtk::Button {
    let button = gtk::Button::with_label(text);
    button.add_css_class("text-button");
    button.connect_clicked(move |_| on_click());
    button
}

fn back_button(sender: &ComponentSender<AppModel>) -> gtk::Button {
    let button = gtk::Button::from_icon_name("go-previous-symbolic");
    button.set_tooltip_text(Some("Home"));
    button.add_css_class("circle-button");
    button.set_halign(gtk::Align::End);
    button.set_valign(gtk::Align::End);
    button.set_margin_end(PAGE_MARGIN);
    button.set_margin_bottom(PAGE_MARGIN);
    let sender = sender.clone();
    button.connect_clicked(move |_| sender.input(AppMsg::Back));
    button
}

fn vbox(spacing: i32) -> gtk::Box {
    gtk::Box::new(gtk::Orientation::Vertical, spacing)
}

/// Layers `content` over the page's grid and lets the grid follow the
/// pointer anywhere on the page.
pub fn page(backdrop: &Backdrop, content: &impl IsA<gtk::Widget>) -> gtk::Overlay {
    let overlay = gtk::Overlay::new();
    overlay.add_css_class("page");
    overlay.set_child(Some(backdrop.widget()));
    overlay.add_overlay(content);
    backdrop.track(&overlay);
    overlay
}

pub struct HomePage {
    pub root: gtk::Overlay,
    pub headline: gtk::Label,
    pub tagline: gtk::Label,
    pub swipe_hint: gtk::Label,
    pub menu_area: gtk::DrawingArea,
}

pub fn home(
    profile: &Profile,
    backdrop: &Backdrop,
    sender: &ComponentSender<AppModel>,
) -> HomePage {
    let hero = vbox(32);
    hero.set_halign(gtk::Align::Center);
    hero.set_valign(gtk::Align::Center);

    let headline = label(&profile.headline, "headline");
    headline.set_xalign(0.5);
    let tagline = label(&profile.tagline, "tagline");
    tagline.set_xalign(0.5);
    let explore = {
        let sender = sender.clone();
        text_button("EXPLORE WORK  →", move || {
            sender.input(AppMsg::Navigate(Route::Projects))
        })
    };
    explore.remove_css_class("text-button");
    explore.add_css_class("pill-button");
    explore.set_halign(gtk::Align::Center);
    hero.append(&headline);
    hero.append(&tagline);
    hero.append(&explore);

    let root = page(backdrop, &hero);

    let footer = vbox(16);
    footer.set_halign(gtk::Align::End);
    footer.set_valign(gtk::Align::End);
    footer.set_margin_end(PAGE_MARGIN);
    footer.set_margin_bottom(PAGE_MARGIN);
    for route in [Route::About, Route::Contact] {
        let sender = sender.clone();
        let button = text_button(&route.to_string().to_uppercase(), move || {
            sender.input(AppMsg::Navigate(route))
        });
        button.set_halign(gtk::Align::End);
        footer.append(&button);
    }
    root.add_overlay(&footer);

    let swipe_hint = label("SWIPE UP", "swipe-hint");
    swipe_hint.set_halign(gtk::Align::Center);
    swipe_hint.set_valign(gtk::Align::End);
    swipe_hint.set_margin_bottom(PAGE_MARGIN);
    swipe_hint.set_can_target(false);
    root.add_overlay(&swipe_hint);

    let menu_area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .can_target(false)
        .build();
    menu_area.add_css_class("radial-menu");
    {
        let click = gtk::GestureClick::new();
        let sender = sender.clone();
        click.connect_released(move |_, _, x, y| {
            sender.input(AppMsg::MenuClick(Point::new(x, y)))
        });
        menu_area.add_controller(click);
    }
    {
        let motion = gtk::EventControllerMotion::new();
        let sender = sender.clone();
        motion.connect_motion(move |_, x, y| {
            sender.input(AppMsg::MenuHover(Point::new(x, y)))
        });
        menu_area.add_controller(motion);
    }
    root.add_overlay(&menu_area);

    {
        let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
        let sender = sender.clone();
        scroll.connect_scroll(move |_, _, dy| {
            sender.input(AppMsg::MenuWheel(wheel_pixels(dy)));
            glib::Propagation::Proceed
        });
        root.add_controller(scroll);
    }
    {
        let drag = gtk::GestureDrag::new();
        drag.set_touch_only(true);
        {
            let sender = sender.clone();
            drag.connect_drag_begin(move |_, _, y| sender.input(AppMsg::MenuSwipeStart(y)));
        }
        {
            let sender = sender.clone();
            drag.connect_drag_update(move |gesture, _, dy| {
                if let Some((_, y)) = gesture.start_point() {
                    sender.input(AppMsg::MenuSwipeMove(y + dy));
                }
            });
        }
        {
            let sender = sender.clone();
            drag.connect_drag_end(move |_, _, _| sender.input(AppMsg::MenuSwipeEnd));
        }
        root.add_controller(drag);
    }

    HomePage {
        root,
        headline,
        tagline,
        swipe_hint,
        menu_area,
    }
}

pub fn about(
    profile: &Profile,
    backdrop: &Backdrop,
    sender: &ComponentSender<AppModel>,
) -> gtk::Overlay {
    let column = vbox(40);
    column.set_margin_top(120);
    column.set_margin_bottom(120);
    column.set_margin_start(PAGE_MARGIN);
    column.set_margin_end(PAGE_MARGIN);
    column.set_halign(gtk::Align::Center);
    column.set_width_request(720);

    column.append(&label("About Me", "page-title"));

    let body = vbox(20);
    for paragraph in &profile.about {
        body.append(&label(paragraph, "body"));
    }
    column.append(&body);

    if !profile.skills.is_empty() {
        let skills = vbox(20);
        skills.append(&eyebrow("What I do"));
        let grid = gtk::FlowBox::new();
        grid.set_selection_mode(gtk::SelectionMode::None);
        grid.set_max_children_per_line(3);
        grid.set_min_children_per_line(1);
        grid.set_row_spacing(12);
        grid.set_column_spacing(16);
        for skill in &profile.skills {
            grid.insert(&label(skill, "skill"), -1);
        }
        skills.append(&grid);
        column.append(&skills);
    }

    let scroller = gtk::ScrolledWindow::builder()
        .hscrollbar_policy(gtk::PolicyType::Never)
        .hexpand(true)
        .vexpand(true)
        .child(&column)
        .build();

    let root = page(backdrop, &scroller);
    root.add_overlay(&back_button(sender));
    root
}

pub fn contact(
    profile: &Profile,
    backdrop: &Backdrop,
    sender: &ComponentSender<AppModel>,
) -> gtk::Overlay {
    let column = vbox(40);
    column.set_halign(gtk::Align::Center);
    column.set_valign(gtk::Align::Center);
    column.set_margin_start(PAGE_MARGIN);
    column.set_margin_end(PAGE_MARGIN);

    let centered = |l: gtk::Label| {
        l.set_xalign(0.5);
        l.set_justify(gtk::Justification::Center);
        l.set_max_width_chars(56);
        l
    };
    column.append(&centered(label("Get in Touch", "page-title")));
    column.append(&centered(label(CONTACT_BLURB, "body")));

    let email = {
        let sender = sender.clone();
        let uri = window::mailto(&profile.email);
        text_button(&profile.email, move || {
            sender.input(AppMsg::OpenUri(uri.clone()))
        })
    };
    email.add_css_class("email");
    email.set_halign(gtk::Align::Center);
    column.append(&email);

    if !profile.socials.is_empty() {
        let socials = vbox(20);
        socials.append(&centered(eyebrow("Find me online")));
        let row = gtk::Box::new(gtk::Orientation::Horizontal, 32);
        row.set_halign(gtk::Align::Center);
        for social in &profile.socials {
            let sender = sender.clone();
            let url = social.url.clone();
            row.append(&text_button(&social.label, move || {
                sender.input(AppMsg::OpenUri(url.to_string()))
            }));
        }
        socials.append(&row);
        column.append(&socials);
    }

    let location = vbox(8);
    for line in &profile.location {
        location.append(&centered(label(line, "fine-print")));
    }
    column.append(&location);

    let root = page(backdrop, &column);
    root.add_overlay(&back_button(sender));
    root
}

fn link_button(
    text: &str,
    link: &Link,
    sender: &ComponentSender<CarouselModel>,
) -> gtk::Button {
    let sender = sender.clone();
    let link = link.clone();
    text_button(text, move || sender.input(CarouselMsg::OpenLink(link.clone())))
}

fn slide_image(
    record: &ProjectRecord,
    index: usize,
    assets: &Path,
    sender: &ComponentSender<CarouselModel>,
) -> gtk::Overlay {
    let frame = gtk::Overlay::new();
    frame.add_css_class("slide-image");
    frame.set_hexpand(true);
    frame.set_vexpand(true);
    frame.set_cursor_from_name(Some("zoom-in"));

    let path = assets.join(record.image.as_str());
    if path.is_file() {
        let picture = gtk::Picture::for_filename(&path);
        picture.set_can_shrink(true);
        frame.set_child(Some(&picture));
    } else {
        log::warn!("Missing image for '{}': {}", record.title, path.display());
        let placeholder = label("Image unavailable", "placeholder");
        placeholder.set_xalign(0.5);
        frame.set_child(Some(&placeholder));
    }

    let click = gtk::GestureClick::new();
    let sender = sender.clone();
    click.connect_released(move |_, _, _, _| sender.input(CarouselMsg::OpenViewer(index)));
    frame.add_controller(click);
    frame
}

fn slide_text(record: &ProjectRecord, sender: &ComponentSender<CarouselModel>) -> gtk::Box {
    let column = vbox(20);
    column.set_valign(gtk::Align::Center);
    column.set_hexpand(true);

    let tags = record
        .tags
        .iter()
        .map(|t| t.to_uppercase())
        .collect::<Vec<_>>()
        .join("   ");
    column.append(&label(&tags, "eyebrow"));
    column.append(&label(&record.title, "slide-title"));
    column.append(&label(&record.description, "body"));
    if let Some(long) = &record.long_description {
        column.append(&label(long, "body"));
    }

    if !record.details.is_empty() {
        let list = vbox(8);
        for detail in &record.details {
            list.append(&label(&format!("–  {detail}"), "detail"));
        }
        let scroller = gtk::ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::Never)
            .propagate_natural_height(true)
            .max_content_height(240)
            .child(&list)
            .build();
        column.append(&scroller);
    }

    column.append(&eyebrow(&record.category.to_string()));

    let links = gtk::Box::new(gtk::Orientation::Horizontal, 24);
    if let Some(repository) = &record.repository {
        links.append(&link_button("CODE", repository, sender));
    }
    if let Some(live) = &record.live {
        links.append(&link_button("LIVE", live, sender));
    }
    if links.first_child().is_some() {
        column.append(&links);
    }
    column
}

pub fn project_slide(
    record: &ProjectRecord,
    index: usize,
    assets: &Path,
    sender: &ComponentSender<CarouselModel>,
) -> gtk::Box {
    let slide = gtk::Box::new(gtk::Orientation::Horizontal, 64);
    slide.add_css_class("slide");
    slide.set_homogeneous(true);
    slide.set_margin_start(96);
    slide.set_margin_end(96);
    slide.set_margin_top(96);
    slide.set_margin_bottom(112);
    slide.append(&slide_image(record, index, assets, sender));
    slide.append(&slide_text(record, sender));
    slide
}

pub fn more_projects_slide(
    profile: &Profile,
    sender: &ComponentSender<CarouselModel>,
) -> gtk::Box {
    let column = vbox(28);
    column.add_css_class("slide");
    column.set_halign(gtk::Align::Center);
    column.set_valign(gtk::Align::Center);

    let title = label("More Projects", "slide-title");
    title.set_xalign(0.5);
    let text = label(
        "Check out more of my work and open source contributions on GitHub",
        "body",
    );
    text.set_xalign(0.5);
    text.set_justify(gtk::Justification::Center);
    text.set_max_width_chars(48);
    let visit = link_button("VISIT GITHUB  →", &profile.more_projects_url, sender);
    visit.remove_css_class("text-button");
    visit.add_css_class("pill-button");
    visit.set_halign(gtk::Align::Center);

    column.append(&title);
    column.append(&text);
    column.append(&visit);
    column
}

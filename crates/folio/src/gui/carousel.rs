use crate::gui::pages;
use crate::gui::viewer::{ViewerModel, ViewerMsg};
use crate::gui::window;
use folio_core::carousel::{Carousel, NavDirection, NavKey, Slide, Transition};
use folio_core::content::{ContentStore, Link};
use folio_core::viewer::ViewerEvent;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::path::PathBuf;
use std::rc::Rc;

pub const SLIDE_DURATION_MS: u32 = 450;

pub struct CarouselModel {
    content: Rc<ContentStore>,
    assets: PathBuf,
    carousel: Carousel,
    stack: gtk::Stack,
    viewer: Controller<ViewerModel>,
}

#[derive(Debug)]
pub enum CarouselMsg {
    Step(NavDirection),
    Key(NavKey),
    Escape,
    OpenViewer(usize),
    Viewer(ViewerEvent),
    OpenLink(Link),
    Back,
}

#[derive(Debug)]
pub enum CarouselOutput {
    Back,
}

pub fn slide_name(slide: Slide) -> String {
    match slide {
        Slide::Project(i) => format!("project-{i}"),
        Slide::MoreProjects => "more-projects".to_string(),
    }
}

pub fn transition_type(direction: NavDirection) -> gtk::StackTransitionType {
    match direction {
        NavDirection::Forward => gtk::StackTransitionType::SlideLeft,
        NavDirection::Backward => gtk::StackTransitionType::SlideRight,
    }
}

impl CarouselModel {
    fn show(&self, transition: Transition) {
        log::debug!("slide {} -> {}", transition.from, transition.to);
        self.stack
            .set_transition_type(transition_type(transition.direction));
        self.stack
            .set_visible_child_name(&slide_name(self.carousel.slide()));
    }
}

#[relm4::component(pub)]
impl SimpleComponent for CarouselModel {
    type Init = (Rc<ContentStore>, PathBuf);
    type Input = CarouselMsg;
    type Output = CarouselOutput;

    view! {
        #[root]
        gtk::Overlay {
            add_css_class: "carousel",
            set_hexpand: true,
            set_vexpand: true,

            #[local_ref]
            stack -> gtk::Stack {
                set_hexpand: true,
                set_vexpand: true,
                set_transition_duration: SLIDE_DURATION_MS,
            },

            add_overlay = &gtk::Button {
                #[watch]
                set_visible: model.carousel.chrome_visible(),
                set_icon_name: "go-previous-symbolic",
                set_tooltip_text: Some("Home"),
                set_halign: gtk::Align::Start,
                set_valign: gtk::Align::Start,
                set_margin_all: 32,
                add_css_class: "circle-button",
                connect_clicked => CarouselMsg::Back,
            },

            add_overlay = &gtk::Label {
                #[watch]
                set_visible: model.carousel.chrome_visible(),
                #[watch]
                set_label: &model.carousel.position_label(),
                set_halign: gtk::Align::Start,
                set_valign: gtk::Align::End,
                set_margin_all: 32,
                add_css_class: "counter",
            },

            add_overlay = &gtk::Box {
                #[watch]
                set_visible: model.carousel.chrome_visible(),
                set_halign: gtk::Align::End,
                set_valign: gtk::Align::End,
                set_margin_all: 32,
                set_spacing: 12,

                gtk::Button {
                    set_icon_name: "go-previous-symbolic",
                    add_css_class: "circle-button",
                    #[watch]
                    set_sensitive: model.carousel.can_go_back(),
                    connect_clicked => CarouselMsg::Step(NavDirection::Backward),
                },
                gtk::Button {
                    set_icon_name: "go-next-symbolic",
                    add_css_class: "circle-button",
                    #[watch]
                    set_sensitive: model.carousel.can_go_forward(),
                    connect_clicked => CarouselMsg::Step(NavDirection::Forward),
                },
            },

            add_overlay: model.viewer.widget(),
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (content, assets) = init;

        let stack = gtk::Stack::new();
        for (i, record) in content.projects().iter().enumerate() {
            let slide = pages::project_slide(record, i, &assets, &sender);
            stack.add_named(&slide, Some(slide_name(Slide::Project(i)).as_str()));
        }
        let more = pages::more_projects_slide(content.profile(), &sender);
        stack.add_named(&more, Some(slide_name(Slide::MoreProjects).as_str()));

        let viewer = ViewerModel::builder()
            .launch(())
            .forward(sender.input_sender(), CarouselMsg::Viewer);

        let model = CarouselModel {
            carousel: Carousel::new(content.len()),
            content,
            assets,
            stack: stack.clone(),
            viewer,
        };

        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            CarouselMsg::Step(direction) => {
                if let Some(transition) = self.carousel.goto(direction) {
                    self.show(transition);
                }
            }
            CarouselMsg::Key(key) => {
                if let Some(transition) = self.carousel.handle_key(key) {
                    self.show(transition);
                }
            }
            CarouselMsg::Escape => {
                if self.carousel.viewer_open() {
                    self.viewer.emit(ViewerMsg::Close);
                } else {
                    let _ = sender.output(CarouselOutput::Back);
                }
            }
            CarouselMsg::OpenViewer(index) => {
                if let Some(record) = self.content.get(index) {
                    self.viewer.emit(ViewerMsg::Open {
                        path: self.assets.join(record.image.as_str()),
                        title: record.title.clone(),
                    });
                }
            }
            CarouselMsg::Viewer(event) => self.carousel.on_viewer_event(event),
            CarouselMsg::OpenLink(link) => window::open_uri(&link),
            CarouselMsg::Back => {
                let _ = sender.output(CarouselOutput::Back);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_names_are_distinct() {
        assert_eq!(slide_name(Slide::Project(0)), "project-0");
        assert_ne!(slide_name(Slide::Project(4)), slide_name(Slide::MoreProjects));
    }

    #[test]
    fn test_direction_picks_slide_side() {
        assert_eq!(
            transition_type(NavDirection::Forward),
            gtk::StackTransitionType::SlideLeft
        );
        assert_eq!(
            transition_type(NavDirection::Backward),
            gtk::StackTransitionType::SlideRight
        );
    }
}

use crate::config::{self, Config};
use crate::content;
use crate::events::AppEvent;
use crate::gui::backdrop::Backdrop;
use crate::gui::carousel::{CarouselModel, CarouselMsg, CarouselOutput};
use crate::gui::menu;
use crate::gui::pages;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use folio_core::carousel::NavKey;
use folio_core::content::ContentStore;
use folio_core::preload::{PreloadOutcome, PreloadProgress};
use folio_core::radial::{MenuOutcome, RadialMenu};
use folio_core::route::{Route, RouteChange, Router};
use folio_core::theme::{ThemeChoice, ThemeSignal};
use folio_core::{Point, Size};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use strum::IntoEnumIterator;

/// How long the finished progress bar stays up before the first page shows.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

pub struct AppInit {
    pub config: Config,
    pub config_path: PathBuf,
    pub content: Rc<ContentStore>,
    pub assets: PathBuf,
    pub start: Route,
    pub theme: ThemeChoice,
    pub preload_total: usize,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub config_path: PathBuf,
    assets: PathBuf,
    pub router: Router,
    pub menu: Rc<RefCell<RadialMenu>>,
    pub progress: PreloadProgress,
    pub loading: bool,
    settling: bool,
    backdrops: HashMap<Route, Backdrop>,
    stack: gtk::Stack,
    headline: gtk::Label,
    tagline: gtk::Label,
    swipe_hint: gtk::Label,
    menu_area: gtk::DrawingArea,
    carousel: Controller<CarouselModel>,
}

#[derive(Debug)]
pub enum AppMsg {
    Navigate(Route),
    Back,
    Key(NavKey),
    Escape,
    MenuWheel(f64),
    MenuSwipeStart(f64),
    MenuSwipeMove(f64),
    MenuSwipeEnd,
    MenuHover(Point),
    MenuClick(Point),
    SystemTheme(bool),
    AssetResolved(PreloadOutcome),
    LoadSettled,
    ConfigReload,
    ContentReload,
    OpenUri(String),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::AssetResolved { outcome, .. } => AppMsg::AssetResolved(outcome),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::ContentReload => AppMsg::ContentReload,
        }
    }
}

impl AppModel {
    fn menu_center(&self) -> Point {
        menu::menu_center(
            self.menu_area.width() as f64,
            self.menu_area.height() as f64,
        )
    }

    fn refresh_menu(&self) {
        let open = self.menu.borrow().is_open();
        self.swipe_hint.set_visible(!open);
        self.menu_area.set_can_target(open);
        self.menu_area.queue_draw();
    }

    fn apply_route(&mut self, change: RouteChange) {
        if let Some(backdrop) = self.backdrops.get_mut(&change.from) {
            backdrop.stop();
        }
        if change.from == Route::Home {
            self.menu.borrow_mut().close();
            self.refresh_menu();
        }
        if !self.loading
            && let Some(backdrop) = self.backdrops.get_mut(&change.to)
        {
            backdrop.start();
        }
        self.stack.set_visible_child_name(&change.to.to_string());
    }

    /// Swaps the content-backed pages for ones built from `content`. The
    /// backdrops are moved over, so they are detached from the old pages first.
    fn replace_content(&mut self, content: Rc<ContentStore>, sender: &ComponentSender<Self>) {
        self.carousel = launch_carousel(content.clone(), self.assets.clone(), sender);
        let profile = content.profile();
        self.headline.set_label(&profile.headline);
        self.tagline.set_label(&profile.tagline);

        for route in [Route::Projects, Route::About, Route::Contact] {
            let name = route.to_string();
            if let Some(old) = self.stack.child_by_name(&name) {
                if let Some(overlay) = old.downcast_ref::<gtk::Overlay>() {
                    overlay.set_child(None::<&gtk::Widget>);
                }
                self.stack.remove(&old);
            }
            let backdrop = &self.backdrops[&route];
            let page = match route {
                Route::About => pages::about(profile, backdrop, sender),
                Route::Contact => pages::contact(profile, backdrop, sender),
                _ => pages::page(backdrop, self.carousel.widget()),
            };
            self.stack.add_named(&page, Some(name.as_str()));
        }
        self.stack.set_visible_child_name(&self.router.current().to_string());
    }

    fn schedule_settle(&mut self, sender: &ComponentSender<Self>) {
        if self.settling || !self.loading {
            return;
        }
        self.settling = true;
        let sender = sender.clone();
        glib::timeout_add_local_once(SETTLE_DELAY, move || sender.input(AppMsg::LoadSettled));
    }
}

fn launch_carousel(
    content: Rc<ContentStore>,
    assets: PathBuf,
    sender: &ComponentSender<AppModel>,
) -> Controller<CarouselModel> {
    CarouselModel::builder()
        .launch((content, assets))
        .forward(sender.input_sender(), |output| match output {
            CarouselOutput::Back => AppMsg::Back,
        })
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Folio"),
            add_css_class: "folio",

            add_controller = gtk::EventControllerKey {
                set_propagation_phase: gtk::PropagationPhase::Capture,
                connect_key_pressed[sender] => move |_, key, _, _| {
                    let msg = if key == gtk::gdk::Key::Right {
                        AppMsg::Key(NavKey::Right)
                    } else if key == gtk::gdk::Key::Left {
                        AppMsg::Key(NavKey::Left)
                    } else if key == gtk::gdk::Key::Escape {
                        AppMsg::Escape
                    } else {
                        return glib::Propagation::Proceed;
                    };
                    sender.input(msg);
                    glib::Propagation::Stop
                }
            },

            gtk::Overlay {
                #[local_ref]
                stack -> gtk::Stack {
                    set_transition_type: gtk::StackTransitionType::Crossfade,
                    set_transition_duration: 300,
                    #[watch]
                    set_visible: !model.loading,
                },

                add_overlay = &gtk::Box {
                    #[watch]
                    set_visible: model.loading,
                    set_orientation: gtk::Orientation::Vertical,
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::Center,
                    set_width_request: 320,
                    set_spacing: 20,
                    add_css_class: "loading",

                    gtk::Label {
                        set_label: "LOADING ASSETS",
                        add_css_class: "eyebrow",
                    },
                    gtk::ProgressBar {
                        #[watch]
                        set_fraction: model.progress.percent() as f64 / 100.0,
                    },
                    gtk::Label {
                        add_css_class: "percent",
                        #[watch]
                        set_label: &format!("{}%", model.progress.percent()),
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            content,
            assets,
            start,
            theme: choice,
            preload_total,
            rx,
        } = init;

        theme::load_css();
        window::init_window(&root);

        let settings = gtk::Settings::default();
        let os_dark = settings.as_ref().is_some_and(theme::os_prefers_dark);
        let signal =
            theme::install(ThemeSignal::new(os_dark, config.theme.policy).with_choice(choice));
        if let Some(settings) = &settings {
            let sender = sender.clone();
            theme::watch_os_preference(settings, move |dark| {
                sender.input(AppMsg::SystemTheme(dark))
            });
        }

        let backdrops: HashMap<Route, Backdrop> = Route::iter()
            .map(|route| (route, Backdrop::new(&config.backdrop)))
            .collect();

        let carousel = launch_carousel(content.clone(), assets.clone(), &sender);

        let stack = gtk::Stack::new();
        let home = pages::home(content.profile(), &backdrops[&Route::Home], &sender);
        let projects = pages::page(&backdrops[&Route::Projects], carousel.widget());
        let about = pages::about(content.profile(), &backdrops[&Route::About], &sender);
        let contact = pages::contact(content.profile(), &backdrops[&Route::Contact], &sender);
        for (route, page) in [
            (Route::Home, &home.root),
            (Route::Projects, &projects),
            (Route::About, &about),
            (Route::Contact, &contact),
        ] {
            stack.add_named(page, Some(route.to_string().as_str()));
        }
        stack.set_visible_child_name(&start.to_string());

        let menu = Rc::new(RefCell::new(RadialMenu::new()));
        {
            let menu = menu.clone();
            home.menu_area.set_draw_func(move |_, cr, w, h| {
                let (w, h) = (w as f64, h as f64);
                let dark = theme::is_dark();
                let colors = ThemeColors::for_scheme(dark);
                if let Err(e) = menu::draw(
                    cr,
                    &menu.borrow(),
                    menu::menu_center(w, h),
                    Size::new(w, h),
                    dark,
                    &colors,
                ) {
                    log::error!("Menu drawing error: {}", e);
                }
            });
        }

        {
            let root = root.clone();
            let areas: Vec<gtk::DrawingArea> = backdrops
                .values()
                .map(|b| b.widget().clone())
                .chain([home.menu_area.clone()])
                .collect();
            signal.borrow_mut().subscribe(move |dark| {
                theme::apply_to(&root, dark);
                areas.iter().for_each(|a| a.queue_draw());
            });
        }
        theme::apply_to(&root, signal.borrow().is_dark());

        let model = AppModel {
            config_path,
            assets,
            router: Router::new(start),
            menu,
            progress: PreloadProgress::new(preload_total),
            loading: true,
            settling: false,
            backdrops,
            stack: stack.clone(),
            headline: home.headline,
            tagline: home.tagline,
            swipe_hint: home.swipe_hint,
            menu_area: home.menu_area,
            carousel,
        };

        let widgets = view_output!();

        let mut model = model;
        if model.progress.is_complete() {
            model.schedule_settle(&sender);
        }

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Navigate(route) => {
                if let Some(change) = self.router.navigate(route) {
                    self.apply_route(change);
                }
            }
            AppMsg::Back => {
                if let Some(change) = self.router.back() {
                    self.apply_route(change);
                }
            }
            AppMsg::Key(key) => {
                if !self.loading && self.router.current() == Route::Projects {
                    self.carousel.emit(CarouselMsg::Key(key));
                }
            }
            AppMsg::Escape => match self.router.current() {
                Route::Projects => self.carousel.emit(CarouselMsg::Escape),
                Route::Home => {
                    self.menu.borrow_mut().close();
                    self.refresh_menu();
                }
                Route::About | Route::Contact => sender.input(AppMsg::Back),
            },
            AppMsg::MenuWheel(delta) => {
                if self.menu.borrow_mut().wheel(delta) {
                    self.refresh_menu();
                }
            }
            AppMsg::MenuSwipeStart(y) => self.menu.borrow_mut().touch_start(y),
            AppMsg::MenuSwipeMove(y) => {
                if self.menu.borrow_mut().touch_move(y) {
                    self.refresh_menu();
                }
            }
            AppMsg::MenuSwipeEnd => self.menu.borrow_mut().touch_end(),
            AppMsg::MenuHover(at) => {
                let center = self.menu_center();
                if self.menu.borrow_mut().update_cursor(center, at) {
                    self.menu_area.queue_draw();
                }
            }
            AppMsg::MenuClick(at) => {
                let center = self.menu_center();
                let outcome = self.menu.borrow_mut().click(center, at);
                match outcome {
                    MenuOutcome::Navigate { route, delay } => {
                        let sender = sender.clone();
                        glib::timeout_add_local_once(delay, move || {
                            sender.input(AppMsg::Navigate(route))
                        });
                    }
                    MenuOutcome::ToggleTheme => {
                        theme::signal().borrow_mut().toggle();
                    }
                    MenuOutcome::Closed | MenuOutcome::Ignored => {}
                }
                self.refresh_menu();
            }
            AppMsg::SystemTheme(dark) => {
                theme::signal().borrow_mut().os_changed(dark);
            }
            AppMsg::AssetResolved(outcome) => {
                let percent = self.progress.record(outcome);
                log::debug!("preload {}%", percent);
                if self.progress.is_complete() {
                    self.schedule_settle(&sender);
                }
            }
            AppMsg::LoadSettled => {
                self.loading = false;
                if let Some(backdrop) = self.backdrops.get_mut(&self.router.current()) {
                    backdrop.start();
                }
                log::info!(
                    "Assets ready: {} of {} loaded",
                    self.progress.completed() - self.progress.failed(),
                    self.progress.total()
                );
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(new_config) => {
                    for backdrop in self.backdrops.values() {
                        backdrop.reconfigure(&new_config.backdrop);
                    }
                    theme::signal()
                        .borrow_mut()
                        .set_policy(new_config.theme.policy);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::ContentReload => {
                let config = config::load_or_default(&self.config_path);
                match content::load_content(config.content_path(&self.config_path).as_deref()) {
                    Ok(store) => {
                        log::info!("Content reloaded: {} projects", store.len());
                        self.replace_content(Rc::new(store), &sender);
                    }
                    Err(e) => log::error!("Failed to reload content: {}", e),
                }
            }
            AppMsg::OpenUri(uri) => window::open_uri(&uri),
        }
    }
}

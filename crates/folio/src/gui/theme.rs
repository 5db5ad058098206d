use folio_core::theme::{ThemeError, ThemeSignal};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use std::cell::RefCell;
use std::rc::Rc;

pub struct ThemeColors {
    pub grid: Srgba<f64>,
    pub scrim: Srgba<f64>,
    pub item: Srgba<f64>,
    pub item_hovered: Srgba<f64>,
    pub item_border: Srgba<f64>,
    pub item_text: Srgba<f64>,
    pub center: Srgba<f64>,
    pub center_mark: Srgba<f64>,
    pub placeholder: Srgba<f64>,
}

impl ThemeColors {
    pub fn light() -> Self {
        Self {
            grid: Srgba::new(0.06, 0.09, 0.16, 1.0),
            scrim: Srgba::new(0.0, 0.0, 0.0, 0.1),
            item: Srgba::new(1.0, 1.0, 1.0, 0.95),
            item_hovered: Srgba::new(0.95, 0.96, 0.98, 1.0),
            item_border: Srgba::new(0.8, 0.84, 0.88, 1.0),
            item_text: Srgba::new(0.06, 0.09, 0.16, 1.0),
            center: Srgba::new(0.06, 0.09, 0.16, 1.0),
            center_mark: Srgba::new(1.0, 1.0, 1.0, 1.0),
            placeholder: Srgba::new(0.39, 0.45, 0.55, 1.0),
        }
    }

    pub fn dark() -> Self {
        Self {
            grid: Srgba::new(0.95, 0.96, 0.98, 1.0),
            scrim: Srgba::new(0.0, 0.0, 0.0, 0.3),
            item: Srgba::new(0.06, 0.09, 0.16, 0.95),
            item_hovered: Srgba::new(0.12, 0.16, 0.23, 1.0),
            item_border: Srgba::new(0.2, 0.25, 0.33, 1.0),
            item_text: Srgba::new(0.95, 0.96, 0.98, 1.0),
            center: Srgba::new(0.95, 0.96, 0.98, 1.0),
            center_mark: Srgba::new(0.06, 0.09, 0.16, 1.0),
            placeholder: Srgba::new(0.58, 0.64, 0.72, 1.0),
        }
    }

    pub fn for_scheme(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    pub fn current() -> Self {
        Self::for_scheme(is_dark())
    }
}

pub fn set_source(cr: &cairo::Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(include_str!("../style.css"));

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

thread_local! {
    static SIGNAL: RefCell<Option<Rc<RefCell<ThemeSignal>>>> = const { RefCell::new(None) };
}

/// Makes `signal` the theme for every view built on this thread.
pub fn install(signal: ThemeSignal) -> Rc<RefCell<ThemeSignal>> {
    let signal = Rc::new(RefCell::new(signal));
    SIGNAL.with(|s| *s.borrow_mut() = Some(signal.clone()));
    signal
}

pub fn try_signal() -> Result<Rc<RefCell<ThemeSignal>>, ThemeError> {
    SIGNAL.with(|s| s.borrow().clone().ok_or(ThemeError::NotInstalled))
}

/// Panics when no signal was installed; reading the theme before the app
/// window exists is a programming error.
pub fn signal() -> Rc<RefCell<ThemeSignal>> {
    match try_signal() {
        Ok(signal) => signal,
        Err(e) => panic!("{e}"),
    }
}

/// Listeners run while the signal is borrowed, so they must use the value
/// they are handed rather than calling this.
pub fn is_dark() -> bool {
    signal().borrow().is_dark()
}

/// Maps the desktop color-scheme setting to a dark preference. `None` when
/// the platform does not report one.
pub fn scheme_prefers_dark(scheme: gtk::InterfaceColorScheme) -> Option<bool> {
    match scheme {
        gtk::InterfaceColorScheme::Dark => Some(true),
        gtk::InterfaceColorScheme::Light | gtk::InterfaceColorScheme::Default => Some(false),
        _ => None,
    }
}

/// Reads the desktop color scheme, falling back to the legacy prefer-dark flag
/// and theme name on platforms that do not report one.
pub fn os_prefers_dark(settings: &gtk::Settings) -> bool {
    scheme_prefers_dark(settings.gtk_interface_color_scheme()).unwrap_or_else(|| {
        settings.is_gtk_application_prefer_dark_theme()
            || settings
                .gtk_theme_name()
                .is_some_and(|name| name.to_lowercase().contains("dark"))
    })
}

/// Calls `f` with the fresh preference whenever the desktop theme changes.
pub fn watch_os_preference(settings: &gtk::Settings, f: impl Fn(bool) + Clone + 'static) {
    {
        let f = f.clone();
        settings.connect_gtk_interface_color_scheme_notify(move |s| f(os_prefers_dark(s)));
    }
    {
        let f = f.clone();
        settings.connect_gtk_application_prefer_dark_theme_notify(move |s| f(os_prefers_dark(s)));
    }
    settings.connect_gtk_theme_name_notify(move |s| f(os_prefers_dark(s)));
}

pub fn apply_to(window: &impl IsA<gtk::Widget>, dark: bool) {
    if dark {
        window.add_css_class("dark");
    } else {
        window.remove_css_class("dark");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::theme::ThemePolicy;

    #[test]
    fn test_color_scheme_maps_to_dark() {
        use gtk::InterfaceColorScheme as Scheme;
        assert_eq!(scheme_prefers_dark(Scheme::Dark), Some(true));
        assert_eq!(scheme_prefers_dark(Scheme::Light), Some(false));
        assert_eq!(scheme_prefers_dark(Scheme::Default), Some(false));
        assert_eq!(scheme_prefers_dark(Scheme::Unsupported), None);
    }

    #[test]
    fn test_signal_requires_install() {
        assert_eq!(try_signal().unwrap_err(), ThemeError::NotInstalled);
        let installed = install(ThemeSignal::new(true, ThemePolicy::Sticky));
        assert!(Rc::ptr_eq(&installed, &signal()));
        assert!(is_dark());
    }

    #[test]
    #[should_panic(expected = "outside of its scope")]
    fn test_signal_panics_without_install() {
        signal();
    }

    #[test]
    fn test_schemes_contrast() {
        let (light, dark) = (ThemeColors::light(), ThemeColors::dark());
        assert_ne!(light.grid, dark.grid);
        assert_eq!(ThemeColors::for_scheme(true).center, dark.center);
    }
}

use gtk::gio;
use gtk::prelude::*;
use gtk4 as gtk;

pub const DEFAULT_WIDTH: i32 = 1280;
pub const DEFAULT_HEIGHT: i32 = 800;

pub fn init_window(window: &gtk::ApplicationWindow) {
    window.set_default_size(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    window.set_size_request(360, 480);
}

/// Hands `uri` to the desktop's default handler.
pub fn open_uri(uri: &str) {
    if let Err(e) = gio::AppInfo::launch_default_for_uri(uri, None::<&gio::AppLaunchContext>) {
        log::error!("Failed to open '{}': {}", uri, e);
    }
}

pub fn mailto(address: &str) -> String {
    format!("mailto:{address}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailto() {
        assert_eq!(mailto("a@b.c"), "mailto:a@b.c");
    }
}

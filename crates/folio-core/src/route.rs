use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// The four mutually exclusive full-window views.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[default]
    Home,
    #[strum(to_string = "projects", serialize = "work")]
    Projects,
    About,
    Contact,
}

impl Route {
    pub fn is_secondary(&self) -> bool {
        *self != Route::Home
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteChange {
    pub from: Route,
    pub to: Route,
}

#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Route,
}

impl Router {
    pub fn new(start: Route) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn navigate(&mut self, to: Route) -> Option<RouteChange> {
        if to == self.current {
            return None;
        }
        let change = RouteChange {
            from: self.current,
            to,
        };
        self.current = to;
        log::info!("route {} -> {}", change.from, change.to);
        Some(change)
    }

    /// Every secondary view returns to home.
    pub fn back(&mut self) -> Option<RouteChange> {
        self.navigate(Route::Home)
    }
}

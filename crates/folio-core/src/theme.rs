//! Light/dark theme signal.
//!
//! Two inputs feed one reducer: the OS color-scheme preference and an
//! optional user override. Consumers only ever see the effective value and
//! are notified when it changes.

use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ThemePolicy {
    /// A user toggle pins the theme for the rest of the session.
    #[default]
    Sticky,
    /// An OS change clears any user toggle.
    FollowSystem,
}

/// Initial theme choice from configuration or the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeChoice {
    pub fn as_override(&self) -> Option<bool> {
        match self {
            Self::System => None,
            Self::Light => Some(false),
            Self::Dark => Some(true),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Theme signal used outside of its scope; install it before building any view")]
    NotInstalled,
}

pub fn reduce(os_prefers_dark: bool, user_override: Option<bool>) -> bool {
    user_override.unwrap_or(os_prefers_dark)
}

type Listener = Box<dyn Fn(bool)>;

pub struct ThemeSignal {
    os_prefers_dark: bool,
    user_override: Option<bool>,
    policy: ThemePolicy,
    listeners: Vec<Listener>,
}

impl ThemeSignal {
    pub fn new(os_prefers_dark: bool, policy: ThemePolicy) -> Self {
        Self {
            os_prefers_dark,
            user_override: None,
            policy,
            listeners: Vec::new(),
        }
    }

    pub fn with_choice(mut self, choice: ThemeChoice) -> Self {
        self.user_override = choice.as_override();
        self
    }

    pub fn is_dark(&self) -> bool {
        reduce(self.os_prefers_dark, self.user_override)
    }

    pub fn user_override(&self) -> Option<bool> {
        self.user_override
    }

    pub fn policy(&self) -> ThemePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ThemePolicy) {
        self.policy = policy;
    }

    /// `listener` is called with the new value every time it changes.
    pub fn subscribe(&mut self, listener: impl Fn(bool) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn update(&mut self, f: impl FnOnce(&mut Self)) -> bool {
        let before = self.is_dark();
        f(self);
        let after = self.is_dark();
        if before != after {
            log::info!("{} mode", if after { "dark" } else { "light" });
            self.listeners.iter().for_each(|l| l(after));
        }
        before != after
    }

    pub fn toggle(&mut self) -> bool {
        self.update(|s| s.user_override = Some(!s.is_dark()))
    }

    /// Returns true when the effective theme changed.
    pub fn os_changed(&mut self, prefers_dark: bool) -> bool {
        self.update(|s| {
            s.os_prefers_dark = prefers_dark;
            if s.policy == ThemePolicy::FollowSystem {
                s.user_override = None;
            }
        })
    }
}

impl std::fmt::Debug for ThemeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeSignal")
            .field("os_prefers_dark", &self.os_prefers_dark)
            .field("user_override", &self.user_override)
            .field("policy", &self.policy)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::str::FromStr;

    #[test]
    fn test_reducer() {
        assert!(!reduce(false, None));
        assert!(reduce(true, None));
        assert!(reduce(false, Some(true)));
        assert!(!reduce(true, Some(false)));
    }

    #[test]
    fn test_follows_os_until_toggled_when_sticky() {
        let mut t = ThemeSignal::new(false, ThemePolicy::Sticky);
        assert!(t.os_changed(true));
        assert!(t.is_dark());

        assert!(t.toggle());
        assert!(!t.is_dark());
        assert!(!t.os_changed(false));
        assert!(!t.os_changed(true));
        assert!(!t.is_dark());
    }

    #[test]
    fn test_follow_system_clears_override() {
        let mut t = ThemeSignal::new(false, ThemePolicy::FollowSystem);
        t.toggle();
        assert!(t.is_dark());
        assert!(!t.os_changed(true));
        assert_eq!(t.user_override(), None);
        assert!(t.os_changed(false));
        assert!(!t.is_dark());
    }

    #[test]
    fn test_listeners_fire_on_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut t = ThemeSignal::new(true, ThemePolicy::Sticky);
        let sink = seen.clone();
        t.subscribe(move |dark| sink.borrow_mut().push(dark));

        t.os_changed(true);
        t.toggle();
        t.toggle();
        assert_eq!(*seen.borrow(), vec![false, true]);
    }

    #[test]
    fn test_initial_choice() {
        let t = ThemeSignal::new(true, ThemePolicy::Sticky).with_choice(ThemeChoice::Light);
        assert!(!t.is_dark());
        assert_eq!(ThemeChoice::from_str("DARK").unwrap(), ThemeChoice::Dark);
        assert_eq!(
            ThemePolicy::from_str("follow-system").unwrap(),
            ThemePolicy::FollowSystem
        );
    }
}

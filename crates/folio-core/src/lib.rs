//! Headless core of the folio portfolio viewer.
//!
//! Everything here is toolkit independent: the GTK front end feeds input
//! events in and renders whatever state comes out.

pub mod backdrop;
pub mod carousel;
pub mod content;
pub mod geometry;
mod macros;
pub mod preload;
pub mod radial;
pub mod route;
pub mod theme;
pub mod viewer;

pub use geometry::{Point, Rect, Size};

pub mod app;
pub mod backdrop;
pub mod carousel;
pub mod menu;
pub mod pages;
pub mod theme;
pub mod viewer;
pub mod window;

pub mod preload;
pub mod runtime;

//! Terminal user interface built with [ratatui](https://docs.rs/ratatui).
//!
//! [`grid`] holds the shared table renderer every panel draws through;
//! [`panes`] the per-panel render functions; [`app`] the event loop.

pub mod app;
pub mod grid;
pub mod panes;
pub mod theme;

pub use app::App;

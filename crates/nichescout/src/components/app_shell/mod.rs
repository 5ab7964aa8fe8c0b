//! App shell components: AppBar, Footer
//!
//! These components form the persistent UI framework around the main content area.

mod app_bar;
mod footer;

pub use app_bar::AppBar;
pub use footer::Footer;

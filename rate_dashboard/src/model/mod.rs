//! View-side models built from published snapshots.
//!
//! - `view`: display window, summary statistics and chart points.
//! - `pager`: table pagination.
//! - `share`: share text and WhatsApp/Telegram links.
//! - `theme_store`: persisted theme preference.
pub mod pager;
pub mod share;
pub mod theme_store;
pub mod view;

//! Weekly radio schedule: data model, time normalization, grid projection,
//! now-playing resolution, search and HTML painting.

pub mod config;
pub mod html;
pub mod loader;
pub mod model;
pub mod now;
pub mod platform;
pub mod preference;
pub mod projection;
pub mod search;
pub mod time;

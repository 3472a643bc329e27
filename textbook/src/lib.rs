//! textbook - static textbook renderer
//!
//! Loads a book written as TOML content blocks, validates it once, and
//! renders it as a static HTML site, a Markdown file, or an interactive
//! terminal reader driven by the chapter navigator.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

pub mod cli;
pub mod config;
pub mod content_model;
pub mod loader;
pub mod navigator;
pub mod templates;

// Renderers
pub mod html_renderer;
pub mod markdown_renderer;
pub mod render;

// Output
pub mod session;
pub mod site;

//! Concrete adapter implementations for ports, plus the text and SVG views.

pub mod chart_svg;
pub mod csv_catalog_adapter;
pub mod file_config_adapter;
pub mod memory_session;
pub mod seed_data;
pub mod text_view;
#[cfg(feature = "web")]
pub mod web;

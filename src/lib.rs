pub mod base_path;
pub mod boot;
pub mod config;
pub mod detail;
pub mod error;
pub mod expand;
pub mod filter;
pub mod loader;
pub mod markup;
pub mod models;
pub mod page;
pub mod pipeline;
pub mod prerender;
pub mod sections;
pub mod seo;
pub mod theme;

mod tests;

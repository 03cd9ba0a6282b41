//! VITRIN catalog application.
//!
//! Five modules on the VITRIN kernel: categories, products, videos,
//! company settings and the server-rendered storefront. Documents are
//! shaped by the `hooks` functions before they reach SQLite.

pub mod bootstrap;
pub mod hooks;
pub mod modules;
pub mod utils;

pub use bootstrap::build_registry;

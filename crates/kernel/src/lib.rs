pub mod document;
pub mod module;
pub mod registry;
pub mod settings;
pub mod state;

pub use document::Paginated;
pub use module::{InitCtx, Migration, Module};
pub use registry::ModuleRegistry;
pub use settings::Settings;
pub use state::AppState;

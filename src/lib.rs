// Re-export modules
pub mod backends;
pub mod cache;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod render;
pub mod results;
pub mod session;
pub mod state;
pub mod textview;

// Re-export commonly used types for convenience
pub use client::{SearchClient, UiEvent};
pub use config::{ClientConfig, Features, GalleryMode};
pub use error::{DocumentError, SearchError};
pub use results::{DrugRecord, ResultPage};
pub use session::Session;

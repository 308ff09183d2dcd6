pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod errors;
pub mod factors;
pub mod handlers;
pub mod history;
pub mod location;
pub mod models;
pub mod ring;
pub mod state;
pub mod storage;
pub mod theme;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::ProfileStore;

// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
}

// Data model and pure transformations
pub mod data {
    pub mod migrate;
    pub mod model;
    pub mod reorder;
}

// Search
pub mod search {
    pub mod chosung;
    pub mod engine;
}

// Keyboard, pointer and paging state machines
pub mod nav {
    pub mod drag;
    pub mod grid;
    pub mod paging;
}

// Data storage
pub mod storage {
    pub mod backup;
    pub mod dashboard;
    pub mod kv;
    pub mod synced;
}

// User interfaces
pub mod ui {
    pub mod cli;
    pub mod notice;
    pub mod tui;
}

// Re-export commonly used types
pub use core::config::Config;
pub use core::error::{Error, Result};
pub use data::model::{AppData, Bookmark, Folder, Settings};
pub use search::engine::SearchHit;
pub use storage::dashboard::DashboardStore;
pub use storage::kv::{KeyValueStore, MemoryStore, RedbStore};
pub use storage::synced::SyncedStore;
pub use ui::cli::Cli;
pub use ui::tui::Dashboard;

pub mod bot;
pub mod completion;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod models;
pub mod state;
pub mod supervisor;

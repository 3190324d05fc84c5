// src/services/mod.rs
pub mod extract;
pub mod gemini;
pub mod history;
pub mod metrics_manager;
pub mod relay;
pub mod session;

// Filing Analyst - turns uploaded financial documents into structured tone, risk and guidance summaries

pub mod config;
pub mod models;
pub mod types;
pub mod llm;
pub mod extraction;
pub mod analysis;
pub mod routes;
pub mod middleware;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}

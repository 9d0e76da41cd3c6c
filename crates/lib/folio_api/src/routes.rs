//! Route paths.

pub const POST_API_ARYAN_AI: &str = "/api/aryan-ai";
pub const GET_API_HEALTH: &str = "/api/health";

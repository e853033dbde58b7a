pub mod ids;
pub mod logging;

pub use ids::TenantId;
pub use logging::AppLog;

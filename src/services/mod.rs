pub mod scheduler;
pub mod sync_service;

pub use scheduler::RefreshScheduler;
pub use sync_service::SyncService;

mod legacy;
mod lifecycle;
mod repository;

pub use legacy::LegacyCache;
pub use lifecycle::ApplicationLifecycle;
pub use repository::ApplicationRepository;

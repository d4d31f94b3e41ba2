pub mod config_service;
pub mod meeting_repository;
pub mod paths;
pub mod secret_service;
pub mod storage;
pub mod topic_cache;

pub use crate::config_service::ConfigService;
pub use crate::meeting_repository::{InMemoryMeetingRepository, JsonDirMeetingRepository};
pub use crate::paths::ParliamentPaths;
pub use crate::secret_service::SecretService;
pub use crate::topic_cache::{FileTopicCache, MemoryTopicCache};

//! Infrastructure layer for Mentora.
//!
//! File-backed adapters for the domain ports: a TOML-directory session
//! repository with conditional writes, a TOML user directory, unified path
//! resolution, and configuration loading.

pub mod config_service;
pub mod dir_session_repository;
pub mod paths;
pub mod storage;
pub mod toml_user_directory;

pub use config_service::ConfigService;
pub use dir_session_repository::DirSessionRepository;
pub use paths::MentoraPaths;
pub use toml_user_directory::TomlUserDirectory;

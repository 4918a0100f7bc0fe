pub mod env_parser;
pub mod home_path;
pub mod logger;

pub mod catalog;
pub mod collaborators;
pub mod export;
pub mod handlers;
pub mod jd_parser;
pub mod orchestrator;

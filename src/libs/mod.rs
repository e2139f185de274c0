//! Core library modules for jira-reporter.
//!
//! - **config**: settings loaded once from the environment
//! - **error**: typed pipeline failures
//! - **issue**: report data model
//! - **messages**: user-facing text and output macros
//! - **period**: reporting month arithmetic
//! - **render**: HTML and DOCX generators
//! - **report**: the report assembly pipeline
//! - **repository**: issue source abstraction and its Jira implementation
//! - **work_date**: work date inference from the changelog

pub mod config;
pub mod error;
pub mod issue;
pub mod messages;
pub mod period;
pub mod render;
pub mod report;
pub mod repository;
pub mod work_date;

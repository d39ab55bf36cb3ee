pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod notifications;
pub mod reporting;
pub mod repository;
pub mod service;

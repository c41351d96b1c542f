// src/lib.rs — Library root for PageTurner Books assistant

pub mod admin;
pub mod analytics;
pub mod api;
pub mod catalog;
pub mod cli;
pub mod context;
pub mod engine;
pub mod infra;
pub mod responder;
pub mod session;
pub mod storage;

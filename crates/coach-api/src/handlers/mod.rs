//! HTTP request handlers

pub mod broadcasts;
pub mod health;
pub mod threads;

//! HTTP request handlers

pub mod audio;
pub mod health;
pub mod index;
pub mod speech;
pub mod tutor;

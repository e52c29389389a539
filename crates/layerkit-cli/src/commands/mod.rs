//! CLI commands

pub mod classify;
pub mod explode;
pub mod extract;
pub mod init;
pub mod inspect;
pub mod layers;

pub mod board;
pub mod controls;
pub mod integration;
pub mod settings;
pub mod style;

pub mod app;
pub mod events;
pub mod footer;
pub mod forms;
pub mod header;
pub mod input;
pub mod layout;
pub mod login;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod session;
pub mod terminal_guard;
pub mod theme;
pub mod views;
pub mod worker;

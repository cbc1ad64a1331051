pub use eframe::egui;

pub mod interface;
pub mod worker;
pub mod gui;

//! Input processing module
//! Handles file description, type detection and upload admission

pub mod descriptor;
pub mod file_detector;
pub mod gate;
pub mod manager;

// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the input/rendering side and the stores
// - Commands come in, snapshots go out
// - The ViewController is the only writer of navigation state

pub mod commands;
pub mod controller;
pub mod dto;
pub mod error_handling;
pub mod state;


pub use commands::Command;
pub use controller::ViewController;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;

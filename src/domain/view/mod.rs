pub mod state;
pub use state::{ActiveTab, LaunchForm, ViewState, DEFAULT_SAVE_SLOT};

pub mod app_state;
pub mod orrery;
pub mod solar_system;

pub use app_state::AppState;
pub use orrery::Orrery;

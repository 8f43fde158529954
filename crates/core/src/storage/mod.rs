pub mod seen;
pub mod state;

//! Vertical shooter: a player fighter against a descending enemy formation

pub mod state;
pub mod tick;

pub use state::{Enemy, Fighter, Formation, Projectile, ShooterState};
pub use tick::tick;

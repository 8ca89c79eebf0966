pub mod health;
pub mod reset;

pub use health::health;
pub use reset::reset;

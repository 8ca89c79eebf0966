pub mod login;
pub mod refresh;
pub mod revoke;

pub use login::login;
pub use refresh::refresh;
pub use revoke::revoke;

pub mod create_user;
pub mod update_user;

pub use create_user::create_user;
pub use update_user::update_user;

pub mod create_chirp;
pub mod delete_chirp;
pub mod get_chirp;
pub mod list_chirps;

pub use create_chirp::create_chirp;
pub use delete_chirp::delete_chirp;
pub use get_chirp::get_chirp;
pub use list_chirps::list_chirps;

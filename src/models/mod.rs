mod home;
mod message;
mod user;

pub use home::*;
pub use message::*;
pub use user::*;

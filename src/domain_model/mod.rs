mod notice;
mod session;
mod token;
mod user;

pub use notice::*;
pub use session::*;
pub use token::*;
pub use user::*;

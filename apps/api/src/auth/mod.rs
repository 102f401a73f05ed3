mod login;
mod session;

pub use login::{login_handler, register_admin_handler};
pub use session::{logout_handler, me_handler};

/// Session key holding the authenticated identity.
pub const SESSION_USER_KEY: &str = "user_identity";

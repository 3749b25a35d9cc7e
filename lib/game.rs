mod config;
mod intent;
mod notification;
mod projection;
mod promotion;
mod session;
mod state;

pub use config::*;
pub use intent::*;
pub use notification::*;
pub use projection::*;
pub use promotion::*;
pub use session::*;
pub use state::*;

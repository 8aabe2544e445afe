mod config;
mod contact;
mod entities;
mod error;
mod request;
mod response;
mod state;

pub use config::*;
pub use contact::*;
pub use entities::*;
pub use error::*;
pub use request::*;
pub use response::*;
pub use state::*;

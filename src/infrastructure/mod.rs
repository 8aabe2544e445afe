mod aggregator_totals;
mod clock_system;
mod connectivity_tcp;
mod fetcher_rest;
mod fetcher_retrier;
mod persister_postgresql;
mod sender_emailjs;
mod submitter_contact;
mod watcher_totals;

pub use aggregator_totals::*;
pub use clock_system::*;
pub use connectivity_tcp::*;
pub use fetcher_rest::*;
pub use fetcher_retrier::*;
pub use persister_postgresql::*;
pub use sender_emailjs::*;
pub use submitter_contact::*;
pub use watcher_totals::*;

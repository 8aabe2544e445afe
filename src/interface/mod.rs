mod aggregator;
mod clock;
mod connectivity;
mod fetcher;
mod persister;
mod sender;
mod submitter;

pub use aggregator::*;
pub use clock::*;
pub use connectivity::*;
pub use fetcher::*;
pub use persister::*;
pub use sender::*;
pub use submitter::*;

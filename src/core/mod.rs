pub mod engine;
pub mod session;
pub mod time;

pub use engine::{EngineResult, LedgerEngine};
pub use session::{LedgerSession, SessionResult};
pub use time::{Clock, FixedClock, SystemClock};

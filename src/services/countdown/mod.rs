mod error;
mod persistence;
mod service;
pub mod share_link;
mod timer;

pub use error::CountdownError;
pub use persistence::{load_snapshot, save_snapshot};
pub use service::{CountdownService, CountdownView, TargetProposal};
pub use share_link::ShareLinkParams;
pub use timer::{
    clamp_tick_interval, CountdownFields, CountdownPhase, CountdownTimer, PrimaryAction,
    TickOutcome, DEFAULT_TICK_INTERVAL_MS,
};

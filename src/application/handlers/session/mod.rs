//! Session command handlers.

mod expire_session;
mod grant_bonus;
mod record_usage;
mod start_session;

pub use expire_session::{ExpireSessionCommand, ExpireSessionHandler, ExpireSessionResult};
pub use grant_bonus::{GrantBonusCommand, GrantBonusHandler, GrantBonusResult};
pub use record_usage::{RecordUsageCommand, RecordUsageHandler, RecordUsageResult};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};

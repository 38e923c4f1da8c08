pub mod affect;
pub mod cues;
pub mod habituation;
pub mod history;
pub mod reserve;
pub mod subject;
pub mod traits;

pub use affect::{Affect, Dimension};
pub use cues::CueSalience;
pub use habituation::{HabituationRecord, Streak};
pub use history::{ActionHistory, HISTORY_LIMIT};
pub use reserve::HedonicReserve;
pub use subject::{PendingAftereffect, Subject};
pub use traits::Traits;

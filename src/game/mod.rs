mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

mod session;
pub use session::{Attempt, Cooldown, GameState, Session, StartGame, UserId};

mod store;
pub use store::SessionStore;

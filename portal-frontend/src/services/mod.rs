pub mod clock;
pub mod metrics;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::metrics::{get_metrics, init_metrics};

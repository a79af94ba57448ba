pub mod envelope;
pub mod high_low;
pub mod info;
pub mod moving_average;
pub mod overview;
pub mod peaks;
pub mod performance;
pub mod prices;

pub use envelope::*;
pub use high_low::*;
pub use info::*;
pub use moving_average::*;
pub use overview::*;
pub use peaks::*;
pub use performance::*;
pub use prices::*;

pub mod error;
pub mod parable;
pub mod projection;
pub mod sampling;
pub mod window;

pub use error::ParableError;
pub use parable::{Parable, Segment, Segments};

mod bracket;
mod compensation;
mod jurisdiction;

pub use bracket::{BracketCap, BracketEntry, BracketSchedule, RawBracketRow};
pub use compensation::{CompensationFigures, CompensationInput};
pub use jurisdiction::Jurisdiction;

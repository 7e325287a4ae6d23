pub mod m6809;

pub use m6809::{Cc, DecodeFault, InterruptLines, M6809, RunState};

pub mod bus;
pub mod host;
pub mod machine;

pub use bus::{Bus, BusError, IoDevice, IoHandle, MemKind};
pub use host::{CassetteDeck, HostPort, NullDeck, NullHost};
pub use machine::{InputButton, Machine};

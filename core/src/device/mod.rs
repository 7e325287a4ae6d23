pub mod font;
pub mod pia;
pub mod sam;
pub mod vdg;

pub use pia::{AudioMux, Pia0, Pia1};
pub use sam::Sam;
pub use vdg::{Vdg, VdgSignals, VideoMode};

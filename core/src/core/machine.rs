/// Describes a single input a machine accepts.
pub struct InputButton {
    /// Machine-defined identifier, passed to `set_input()`.
    pub id: u8,
    /// Human-readable name for display/configuration (e.g., "A", "Break").
    pub name: &'static str,
}

/// Machine-agnostic interface for emulated systems.
///
/// Each machine implements this trait to give the front-end a uniform
/// surface. The front-end is a pure rendering engine that does not know
/// about the hardware behind it (SAM, PIAs, VDG modes, palettes).
pub trait Machine {
    /// Current native display resolution as (width, height) in pixels.
    /// May change between frames when the video hardware switches modes.
    fn display_size(&self) -> (u32, u32);

    /// Run one frame of emulation (advance the machine by one render
    /// slot's worth of CPU work).
    fn run_frame(&mut self);

    /// Render the current video state into an RGB24 pixel buffer.
    ///
    /// The buffer must be at least `width * height * 3` bytes (from
    /// `display_size()`), left-to-right, top-to-bottom, 3 bytes per pixel.
    /// The machine converts its internal representation (indexed frame +
    /// fixed palette) into this standard format.
    fn render_frame(&self, buffer: &mut [u8]);

    /// Handle an input event. `button` is a machine-defined ID from
    /// `input_map()`; `pressed` is true for key-down, false for key-up.
    ///
    /// Called per-event, not per-frame; each call latches state so that
    /// `run_frame()` sees the accumulated input.
    fn set_input(&mut self, button: u8, pressed: bool);

    /// The inputs this machine accepts. The front-end uses this to build
    /// key mappings.
    fn input_map(&self) -> &[InputButton];

    /// Pulse the machine's hardware reset.
    fn reset(&mut self);
}

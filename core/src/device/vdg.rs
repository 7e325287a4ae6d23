//! MC6847 Video Display Generator.
//!
//! The VDG owns an 8-bpp indexed frame buffer and a fixed 16-entry BGR
//! palette. SAM and PIA publish their video bits into a shared
//! [`VdgSignals`] record from inside their bus traps; the renderer reads
//! the signals and video RAM at scheduler time, so no synchronization is
//! needed beyond the shared cells.
//!
//! References:
//! <https://en.wikipedia.org/wiki/Motorola_6847>

use crate::core::Bus;
use crate::device::font;
use std::cell::Cell;
use std::rc::Rc;

const SCREEN_WIDTH_PIX: usize = 256;
const SCREEN_HEIGHT_PIX: usize = 192;
const SCREEN_WIDTH_CHAR: usize = 32;
const SCREEN_HEIGHT_CHAR: usize = 16;

const FB_BLACK: u8 = 0;
const FB_CYAN: u8 = 3;
const FB_BROWN: u8 = 6;
const FB_LIGHT_BLUE: u8 = 9;
const FB_LIGHT_GREEN: u8 = 10;
const FB_LIGHT_RED: u8 = 12;
const FB_LIGHT_MAGENTA: u8 = 13;
const FB_YELLOW: u8 = 14;
const FB_WHITE: u8 = 15;

const CHAR_SEMI_GRAPHICS: u8 = 0x80;
const CHAR_INVERSE: u8 = 0x40;

const SEMIG8_SEG_HEIGHT: usize = 3;
const SEMIG12_SEG_HEIGHT: usize = 2;

/// CSS bit in the PIA mode byte.
const PIA_COLOR_SET: u8 = 0x01;

/// Color-set base indexes into [`COLORS`].
const DEF_COLOR_CSS_0: usize = 0;
const DEF_COLOR_CSS_1: usize = 4;

/// VDG color lookup: CSS=0 set first, CSS=1 set at offset 4.
/// Index 4 should be buff; white is the closest palette entry.
const COLORS: [u8; 8] = [
    FB_LIGHT_GREEN,
    FB_YELLOW,
    FB_LIGHT_BLUE,
    FB_LIGHT_RED,
    FB_WHITE,
    FB_CYAN,
    FB_LIGHT_MAGENTA,
    FB_BROWN,
];

/// The sixteen raster programs selectable through SAM + PIA mode bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoMode {
    //                    Colors   Res.     Bytes  BASIC
    AlphaInternal,     // 2 color  32x16    512    Default
    AlphaExternal,     // 4 color  32x16    512
    SemiGraphics4,     // 8 color  64x32    512
    SemiGraphics6,     // 8 color  64x48    512
    SemiGraphics8,     // 8 color  64x64    2048
    SemiGraphics12,    // 8 color  64x96    3072
    SemiGraphics24,    // 8 color  64x192   6144
    Graphics1C,        // 4 color  64x64    1024
    Graphics1R,        // 2 color  128x64   1024
    Graphics2C,        // 4 color  128x64   2048
    Graphics2R,        // 2 color  128x96   1536   PMODE 0
    Graphics3C,        // 4 color  128x96   3072   PMODE 1
    Graphics3R,        // 2 color  128x192  3072   PMODE 2
    Graphics6C,        // 4 color  128x192  6144   PMODE 3
    Graphics6R,        // 2 color  256x192  6144   PMODE 4
    Dma,               // 2 color  256x192  6144
    Undefined,
}

impl VideoMode {
    /// Frame-buffer resolution and the video RAM byte count scanned per
    /// refresh.
    pub fn resolution(self) -> (usize, usize, usize) {
        use VideoMode::*;
        match self {
            AlphaInternal | AlphaExternal | SemiGraphics4 | SemiGraphics6 => {
                (SCREEN_WIDTH_PIX, SCREEN_HEIGHT_PIX, 512)
            }
            SemiGraphics8 => (SCREEN_WIDTH_PIX, SCREEN_HEIGHT_PIX, 2048),
            SemiGraphics12 => (SCREEN_WIDTH_PIX, SCREEN_HEIGHT_PIX, 3072),
            SemiGraphics24 => (SCREEN_WIDTH_PIX, SCREEN_HEIGHT_PIX, 6144),
            Graphics1C => (64, 64, 1024),
            Graphics1R => (128, 64, 1024),
            Graphics2C => (128, 64, 2048),
            Graphics2R => (128, 96, 1536),
            Graphics3C => (128, 96, 3072),
            Graphics3R => (256, 192, 3072),
            Graphics6C => (256, 192, 6144),
            Graphics6R | Dma | Undefined => (256, 192, 6144),
        }
    }

    pub fn name(self) -> &'static str {
        use VideoMode::*;
        match self {
            AlphaInternal => "ALPHA_INT",
            AlphaExternal => "ALPHA_EXT",
            SemiGraphics4 => "SEMI_GR4",
            SemiGraphics6 => "SEMI_GR6",
            SemiGraphics8 => "SEMI_GR8",
            SemiGraphics12 => "SEMI_GR12",
            SemiGraphics24 => "SEMI_GR24",
            Graphics1C => "GRAPH_1C",
            Graphics1R => "GRAPH_1R",
            Graphics2C => "GRAPH_2C",
            Graphics2R => "GRAPH_2R",
            Graphics3C => "GRAPH_3C",
            Graphics3R => "GRAPH_3R",
            Graphics6C => "GRAPH_6C",
            Graphics6R => "GRAPH_6R",
            Dma => "DMA",
            Undefined => "UNDEFINED",
        }
    }
}

/// Video mode bits published by SAM and PIA traps and consumed by the
/// renderer at raster time.
#[derive(Clone, Default)]
pub struct VdgSignals {
    inner: Rc<Signals>,
}

struct Signals {
    sam_mode: Cell<u8>,
    pia_mode: Cell<u8>,
    video_offset: Cell<u8>,
}

impl Default for Signals {
    fn default() -> Self {
        Self {
            sam_mode: Cell::new(0),
            pia_mode: Cell::new(0),
            // Dragon text page at 0x0400.
            video_offset: Cell::new(2),
        }
    }
}

impl VdgSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// SAM video mode, 0..7.
    pub fn set_mode_sam(&self, mode: u8) {
        self.inner.sam_mode.set(mode & 0x07);
    }

    /// PIA video mode bits, already shifted right by 3:
    /// bit 4 = G/^A, bits 3..1 = GM2..GM0, bit 0 = CSS.
    pub fn set_mode_pia(&self, mode: u8) {
        self.inner.pia_mode.set(mode & 0x1F);
    }

    /// Display start offset: video RAM base = offset << 9.
    pub fn set_video_offset(&self, offset: u8) {
        self.inner.video_offset.set(offset & 0x7F);
    }

    pub fn sam_mode(&self) -> u8 {
        self.inner.sam_mode.get()
    }

    pub fn pia_mode(&self) -> u8 {
        self.inner.pia_mode.get()
    }

    pub fn video_offset(&self) -> u8 {
        self.inner.video_offset.get()
    }
}

/// VDG raster state and frame buffer.
pub struct Vdg {
    signals: VdgSignals,
    current_mode: VideoMode,
    prev_mode: VideoMode,
    frame: Vec<u8>,
    width: usize,
    height: usize,
    mode_change: Option<VideoMode>,
}

impl Vdg {
    /// Fixed frame-buffer palette, BGR triples. The low eight entries
    /// are the dim set, 8..15 the bright set the VDG colors map onto.
    pub const PALETTE: [[u8; 3]; 16] = [
        [0x00, 0x00, 0x00], // black
        [0xAA, 0x00, 0x00], // blue
        [0x00, 0xAA, 0x00], // green
        [0xAA, 0xAA, 0x00], // cyan
        [0x00, 0x00, 0xAA], // red
        [0xAA, 0x00, 0xAA], // magenta
        [0x00, 0x55, 0xAA], // brown
        [0xAA, 0xAA, 0xAA], // gray
        [0x55, 0x55, 0x55], // dark gray
        [0xFF, 0x55, 0x55], // light blue
        [0x55, 0xFF, 0x55], // light green
        [0xFF, 0xFF, 0x55], // light cyan
        [0x55, 0x55, 0xFF], // light red
        [0xFF, 0x55, 0xFF], // light magenta
        [0x55, 0xFF, 0xFF], // yellow
        [0xFF, 0xFF, 0xFF], // white
    ];

    /// Startup mode of the Dragon 32: internal alphanumerics.
    pub fn new(signals: VdgSignals) -> Self {
        let (width, height, _) = VideoMode::AlphaInternal.resolution();
        Self {
            signals,
            current_mode: VideoMode::AlphaInternal,
            prev_mode: VideoMode::AlphaInternal,
            frame: vec![0; width * height],
            width,
            height,
            mode_change: None,
        }
    }

    pub fn mode(&self) -> VideoMode {
        self.current_mode
    }

    /// Current frame-buffer resolution.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Indexed frame contents, `width * height` bytes.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Mode switch since the last call, if any (for host-side window
    /// reconfiguration and reporting).
    pub fn take_mode_change(&mut self) -> Option<VideoMode> {
        self.mode_change.take()
    }

    /// Redraw the full visible region from video RAM. There is no dirty
    /// tracking; the scheduler paces calls to the refresh rate.
    pub fn render(&mut self, bus: &mut Bus) {
        self.current_mode = resolve_mode(self.signals.sam_mode(), self.signals.pia_mode());
        if self.current_mode != self.prev_mode {
            let (width, height, _) = self.current_mode.resolution();
            self.width = width;
            self.height = height;
            self.frame = vec![0; width * height];
            self.prev_mode = self.current_mode;
            self.mode_change = Some(self.current_mode);
        }

        let base = (self.signals.video_offset() as usize) << 9;
        let (_, _, scan_bytes) = self.current_mode.resolution();

        use VideoMode::*;
        match self.current_mode {
            AlphaInternal | SemiGraphics4 => {
                for row in 0..SCREEN_HEIGHT_CHAR {
                    for col in 0..SCREEN_WIDTH_CHAR {
                        let c = bus.read((base + col + row * SCREEN_WIDTH_CHAR) as u16);
                        self.draw_char(c, col, row);
                    }
                }
            }

            // External alphanumerics have no character ROM here; bit 7
            // cells render as semigraphics-6, the rest fall back to the
            // internal font.
            AlphaExternal | SemiGraphics6 => {
                for row in 0..SCREEN_HEIGHT_CHAR {
                    for col in 0..SCREEN_WIDTH_CHAR {
                        let c = bus.read((base + col + row * SCREEN_WIDTH_CHAR) as u16);
                        if c & CHAR_SEMI_GRAPHICS != 0 {
                            self.draw_semig6(c, col, row);
                        } else {
                            self.draw_char(c, col, row);
                        }
                    }
                }
            }

            Graphics1C | Graphics2C | Graphics3C | Graphics6C => {
                self.draw_color_graphics(bus, base, scan_bytes);
            }

            Graphics1R | Graphics2R | Graphics3R | Graphics6R => {
                self.draw_resolution_graphics(bus, base, scan_bytes);
            }

            SemiGraphics8 => self.draw_semig_ext(bus, base, scan_bytes, SEMIG8_SEG_HEIGHT),
            SemiGraphics12 => self.draw_semig_ext(bus, base, scan_bytes, SEMIG12_SEG_HEIGHT),

            // Not generated by Dragon 32 software; left unrendered.
            SemiGraphics24 | Dma | Undefined => {}
        }
    }

    /// Text or semigraphics-4 cell. Character bit 7 selects the SG4 block
    /// set with the foreground from bits 4..6; otherwise the internal
    /// font, optionally inverse-video on bit 6, colored by CSS.
    fn draw_char(&mut self, c: u8, col: usize, row: usize) {
        let px = col * font::FONT_WIDTH;
        let py = row * font::FONT_HEIGHT;

        if c & CHAR_SEMI_GRAPHICS != 0 {
            let fg = COLORS[((c & 0x70) >> 4) as usize];
            for cell_row in 0..font::FONT_HEIGHT {
                let pattern = font::sg4_row(c, cell_row);
                self.draw_pattern_row(pattern, px, py + cell_row, fg, FB_BLACK);
            }
        } else {
            let css = self.signals.pia_mode() & PIA_COLOR_SET != 0;
            let mut fg = COLORS[if css { DEF_COLOR_CSS_1 } else { DEF_COLOR_CSS_0 }];
            let mut bg = FB_BLACK;
            if c & CHAR_INVERSE != 0 {
                std::mem::swap(&mut fg, &mut bg);
            }
            for cell_row in 0..font::FONT_HEIGHT {
                let pattern = font::glyph_row(c & !(CHAR_SEMI_GRAPHICS | CHAR_INVERSE), cell_row);
                self.draw_pattern_row(pattern, px, py + cell_row, fg, bg);
            }
        }
    }

    /// Semigraphics-6 cell: 2x3 block pattern, foreground from bits 6..7
    /// plus the CSS color-set offset.
    fn draw_semig6(&mut self, c: u8, col: usize, row: usize) {
        let css = (self.signals.pia_mode() & PIA_COLOR_SET) as usize;
        let fg = COLORS[((c >> 6) & 0x03) as usize + 4 * css];
        let px = col * font::FONT_WIDTH;
        let py = row * font::FONT_HEIGHT;
        for cell_row in 0..font::FONT_HEIGHT {
            let pattern = font::sg6_row(c, cell_row);
            self.draw_pattern_row(pattern, px, py + cell_row, fg, FB_BLACK);
        }
    }

    /// Color graphics: two bits per pixel through the CSS-selected
    /// 4-color palette; GRAPHICS_6C doubles pixels horizontally.
    fn draw_color_graphics(&mut self, bus: &mut Bus, base: usize, scan_bytes: usize) {
        let css = (self.signals.pia_mode() & PIA_COLOR_SET) as usize;
        let double = self.current_mode == VideoMode::Graphics6C;
        let mut offset = 0;
        for index in 0..scan_bytes {
            let data = bus.read((base + index) as u16);
            for element in 0..4 {
                let color = COLORS[((data >> (2 * (3 - element))) & 0x03) as usize + 4 * css];
                self.frame[offset] = color;
                offset += 1;
                if double {
                    self.frame[offset] = color;
                    offset += 1;
                }
            }
        }
    }

    /// Resolution graphics: one bit per pixel, green or white on black
    /// per CSS; GRAPHICS_3R doubles pixels horizontally.
    fn draw_resolution_graphics(&mut self, bus: &mut Bus, base: usize, scan_bytes: usize) {
        let css = self.signals.pia_mode() & PIA_COLOR_SET != 0;
        let fg = COLORS[if css { DEF_COLOR_CSS_1 } else { DEF_COLOR_CSS_0 }];
        let double = self.current_mode == VideoMode::Graphics3R;
        let mut offset = 0;
        for index in 0..scan_bytes {
            let data = bus.read((base + index) as u16);
            for element in 0..8 {
                let color = if (data >> (7 - element)) & 0x01 != 0 {
                    fg
                } else {
                    FB_BLACK
                };
                self.frame[offset] = color;
                offset += 1;
                if double {
                    self.frame[offset] = color;
                    offset += 1;
                }
            }
        }
    }

    /// Extended semigraphics (SG8/SG12): the text buffer is scanned
    /// repeatedly, each byte contributing `seg_height` scan rows of its
    /// SG4 or font pattern; the glyph row cursor advances at every
    /// 32-byte row boundary and wraps at the cell height.
    fn draw_semig_ext(&mut self, bus: &mut Bus, base: usize, scan_bytes: usize, seg_height: usize) {
        let css = self.signals.pia_mode() & PIA_COLOR_SET != 0;
        let mut glyph_row_index = 0;

        for index in 0..scan_bytes {
            let c = bus.read((base + index) as u16);

            let px = (index & 0x1F) * font::FONT_WIDTH;
            let py = (index >> 5) * seg_height;

            for seg_row in 0..seg_height {
                let (pattern, fg, bg);
                if c & CHAR_SEMI_GRAPHICS != 0 {
                    pattern = font::sg4_row(c, glyph_row_index + seg_row);
                    fg = COLORS[((c & 0x70) >> 4) as usize];
                    bg = FB_BLACK;
                } else {
                    pattern = font::glyph_row(
                        c & !(CHAR_SEMI_GRAPHICS | CHAR_INVERSE),
                        glyph_row_index + seg_row,
                    );
                    let text = COLORS[if css { DEF_COLOR_CSS_1 } else { DEF_COLOR_CSS_0 }];
                    if c & CHAR_INVERSE != 0 {
                        fg = FB_BLACK;
                        bg = text;
                    } else {
                        fg = text;
                        bg = FB_BLACK;
                    }
                }
                self.draw_pattern_row(pattern, px, py + seg_row, fg, bg);
            }

            if index & 0x1F == 0x1F {
                glyph_row_index += seg_height;
                if glyph_row_index >= font::FONT_HEIGHT {
                    glyph_row_index = 0;
                }
            }
        }
    }

    /// Paint one 8-pixel pattern row, MSB leftmost.
    fn draw_pattern_row(&mut self, pattern: u8, px: usize, py: usize, fg: u8, bg: u8) {
        let start = py * self.width + px;
        for bit in 0..font::FONT_WIDTH {
            let lit = pattern & (0x80 >> bit) != 0;
            self.frame[start + bit] = if lit { fg } else { bg };
        }
    }
}

/// Resolve SAM + PIA mode bits to a raster program.
///
/// SAM mode 7 is DMA regardless of the PIA bits; PIA bit 4 selects the
/// graphics family, decoded from GM2..GM0; otherwise the alpha and
/// semigraphics modes decode from the SAM mode and PIA bit 1.
fn resolve_mode(sam_mode: u8, pia_mode: u8) -> VideoMode {
    use VideoMode::*;

    if sam_mode == 7 {
        return Dma;
    }

    if pia_mode & 0x10 != 0 {
        return match pia_mode & 0x0E {
            0x00 => Graphics1C,
            0x02 => Graphics1R,
            0x04 => Graphics2C,
            0x06 => Graphics2R,
            0x08 => Graphics3C,
            0x0A => Graphics3R,
            0x0C => Graphics6C,
            _ => Graphics6R,
        };
    }

    if sam_mode == 0 && pia_mode & 0x02 == 0 {
        // Character bit 7 selects SEMI_GRAPHICS_4 per cell.
        AlphaInternal
    } else if sam_mode == 0 {
        // Character bit 7 selects SEMI_GRAPHICS_6 per cell.
        AlphaExternal
    } else if sam_mode == 2 && pia_mode & 0x02 == 0 {
        SemiGraphics8
    } else if sam_mode == 4 && pia_mode & 0x02 == 0 {
        SemiGraphics12
        // SEMI_GRAPHICS_24 shares this exact guard in the SAM
        // documentation, so the SG12 arm above always wins and SG24 is
        // unreachable. TODO: confirm the SG24 entry condition against
        // real hardware before wiring it in.
    } else {
        Undefined
    }
}

use ember_core::core::Bus;
use ember_core::device::vdg::{Vdg, VdgSignals, VideoMode};

fn rig() -> (Vdg, VdgSignals, Bus) {
    let signals = VdgSignals::new();
    let vdg = Vdg::new(signals.clone());
    (vdg, signals, Bus::new())
}

#[test]
fn test_mode_resolution_table() {
    let cases: &[(u8, u8, VideoMode)] = &[
        // SAM mode 7 always wins.
        (7, 0x00, VideoMode::Dma),
        (7, 0x1F, VideoMode::Dma),
        // Graphics family: PIA bit 4 set, GM bits select the program.
        (6, 0x10, VideoMode::Graphics1C),
        (6, 0x12, VideoMode::Graphics1R),
        (6, 0x14, VideoMode::Graphics2C),
        (6, 0x16, VideoMode::Graphics2R),
        (6, 0x18, VideoMode::Graphics3C),
        (6, 0x1A, VideoMode::Graphics3R),
        (6, 0x1C, VideoMode::Graphics6C),
        (6, 0x1E, VideoMode::Graphics6R),
        // Alpha / semigraphics family.
        (0, 0x00, VideoMode::AlphaInternal),
        (0, 0x01, VideoMode::AlphaInternal),
        (0, 0x02, VideoMode::AlphaExternal),
        (2, 0x00, VideoMode::SemiGraphics8),
        (4, 0x00, VideoMode::SemiGraphics12),
        // Combinations outside the table resolve to Undefined.
        (1, 0x00, VideoMode::Undefined),
        (2, 0x02, VideoMode::Undefined),
    ];

    for &(sam, pia, expected) in cases {
        let (mut vdg, signals, mut bus) = rig();
        signals.set_mode_sam(sam);
        signals.set_mode_pia(pia);
        vdg.render(&mut bus);
        assert_eq!(vdg.mode(), expected, "sam={sam} pia={pia:#04x}");
    }
}

#[test]
fn test_mode_change_resizes_frame() {
    let (mut vdg, signals, mut bus) = rig();
    assert_eq!(vdg.size(), (256, 192));

    signals.set_mode_pia(0x10); // Graphics1C
    vdg.render(&mut bus);
    assert_eq!(vdg.size(), (64, 64));
    assert_eq!(vdg.frame().len(), 64 * 64);
    assert_eq!(vdg.take_mode_change(), Some(VideoMode::Graphics1C));
    assert_eq!(vdg.take_mode_change(), None);

    // Rendering again in the same mode raises no change.
    vdg.render(&mut bus);
    assert_eq!(vdg.take_mode_change(), None);
}

#[test]
fn test_alpha_space_renders_black() {
    let (mut vdg, _signals, mut bus) = rig();
    // Video RAM offset 2 -> base 0x0400; character 0x20 is a space.
    for addr in 0x0400..0x0600u16 {
        bus.write(addr, 0x20).unwrap();
    }
    vdg.render(&mut bus);
    assert!(vdg.frame().iter().all(|&px| px == 0));
}

#[test]
fn test_alpha_glyph_uses_css_color() {
    let (mut vdg, signals, mut bus) = rig();
    for addr in 0x0400..0x0600u16 {
        bus.write(addr, 0x20).unwrap();
    }
    bus.write(0x0400, 0x01).unwrap(); // 'A' in cell (0,0)
    vdg.render(&mut bus);

    // CSS=0 text renders light green (palette index 10); 'A' row 2 of
    // the cell has its peak pixel at the glyph center.
    let lit: Vec<u8> = vdg
        .frame()
        .iter()
        .copied()
        .filter(|&px| px != 0)
        .collect();
    assert!(!lit.is_empty());
    assert!(lit.iter().all(|&px| px == 10));

    // CSS=1 switches the text color to the second set.
    signals.set_mode_pia(0x01);
    vdg.render(&mut bus);
    let lit: Vec<u8> = vdg
        .frame()
        .iter()
        .copied()
        .filter(|&px| px != 0)
        .collect();
    assert!(lit.iter().all(|&px| px == 15));
}

#[test]
fn test_inverse_video_swaps_colors() {
    let (mut vdg, _signals, mut bus) = rig();
    for addr in 0x0400..0x0600u16 {
        bus.write(addr, 0x60).unwrap(); // inverse space: solid text color
    }
    vdg.render(&mut bus);
    assert!(vdg.frame().iter().all(|&px| px == 10));
}

#[test]
fn test_semigraphics4_cell() {
    let (mut vdg, _signals, mut bus) = rig();
    for addr in 0x0400..0x0600u16 {
        bus.write(addr, 0x20).unwrap();
    }
    // SG4: bit 7 set, color bits 4..6 = 1 (yellow), pattern 0b1000
    // lights only the upper-left quadrant.
    bus.write(0x0400, 0x80 | 0x10 | 0x08).unwrap();
    vdg.render(&mut bus);

    let frame = vdg.frame();
    // Upper-left quadrant pixel of cell (0,0): yellow (palette 14).
    assert_eq!(frame[0], 14);
    assert_eq!(frame[3 + 2 * 256], 14);
    // Upper-right and lower-left quadrants stay black.
    assert_eq!(frame[4], 0);
    assert_eq!(frame[6 * 256], 0);
}

#[test]
fn test_semigraphics6_color_set() {
    let (mut vdg, signals, mut bus) = rig();
    signals.set_mode_pia(0x02); // alpha external: SG6 on bit 7
    for addr in 0x0400..0x0600u16 {
        bus.write(addr, 0x00).unwrap();
    }
    // All six blocks lit, color bits 6..7 = 0b01.
    bus.write(0x0400, 0x80 | 0x3F).unwrap();
    vdg.render(&mut bus);

    assert_eq!(vdg.mode(), VideoMode::AlphaExternal);
    // SG6 foreground from bits 6..7 (here 0b10) with CSS=0: light blue.
    assert_eq!(vdg.frame()[0], 9);
}

#[test]
fn test_resolution_graphics_pixels() {
    let (mut vdg, signals, mut bus) = rig();
    signals.set_mode_sam(6);
    signals.set_mode_pia(0x1E); // Graphics6R, CSS=0
    signals.set_video_offset(0x06); // base 0x0C00
    bus.write(0x0C00, 0b1010_0000).unwrap();
    vdg.render(&mut bus);

    let frame = vdg.frame();
    assert_eq!(vdg.size(), (256, 192));
    assert_eq!(frame[0], 10); // light green on
    assert_eq!(frame[1], 0);
    assert_eq!(frame[2], 10);
    assert_eq!(frame[3], 0);

    // CSS=1 renders white.
    signals.set_mode_pia(0x1F);
    vdg.render(&mut bus);
    assert_eq!(vdg.frame()[0], 15);
}

#[test]
fn test_color_graphics_pixel_pairs() {
    let (mut vdg, signals, mut bus) = rig();
    signals.set_mode_sam(1);
    signals.set_mode_pia(0x10); // Graphics1C, CSS=0
    signals.set_video_offset(0x06);
    // Pixels 3,2,1,0 from the high bits down: colors 0,1,2,3.
    bus.write(0x0C00, 0b00_01_10_11).unwrap();
    vdg.render(&mut bus);

    let frame = vdg.frame();
    assert_eq!(frame[0], 10); // light green
    assert_eq!(frame[1], 14); // yellow
    assert_eq!(frame[2], 9); // light blue
    assert_eq!(frame[3], 12); // light red
}

#[test]
fn test_graphics3r_doubles_pixels() {
    let (mut vdg, signals, mut bus) = rig();
    signals.set_mode_sam(5);
    signals.set_mode_pia(0x1A); // Graphics3R
    signals.set_video_offset(0x06);
    bus.write(0x0C00, 0b1000_0000).unwrap();
    vdg.render(&mut bus);

    let frame = vdg.frame();
    assert_eq!(vdg.size(), (256, 192));
    assert_eq!(frame[0], 10);
    assert_eq!(frame[1], 10); // doubled
    assert_eq!(frame[2], 0);
}

#[test]
fn test_semigraphics8_segments() {
    let (mut vdg, signals, mut bus) = rig();
    signals.set_mode_sam(2); // SG8
    signals.set_video_offset(0x06);
    // First text row: SG4 char lighting the upper half; the first
    // 32-byte sweep covers scan rows 0..3 of each cell.
    for addr in 0x0C00..(0x0C00 + 2048u16) {
        bus.write(addr, 0x80 | 0x0C).unwrap(); // upper quadrants lit
    }
    vdg.render(&mut bus);

    assert_eq!(vdg.mode(), VideoMode::SemiGraphics8);
    let frame = vdg.frame();
    // Row 0 lit (upper half of the SG4 pattern), color set 0 ->
    // light green.
    assert_eq!(frame[0], 10);
    // Rows 6..11 of the pattern are the dark lower half; they appear
    // in the third sweep (scan rows 6..8).
    assert_eq!(frame[6 * 256], 0);
}

#[test]
fn test_palette_is_bgr() {
    // Spot checks: black, light green, white.
    assert_eq!(Vdg::PALETTE[0], [0x00, 0x00, 0x00]);
    assert_eq!(Vdg::PALETTE[10], [0x55, 0xFF, 0x55]);
    assert_eq!(Vdg::PALETTE[15], [0xFF, 0xFF, 0xFF]);
}

use std::sync::atomic::Ordering;

use ember_core::core::machine::Machine;
use ember_machines::Dragon32System;
use sdl2::event::Event;

use crate::audio;
use crate::input::KeyMap;
use crate::video::Video;

/// Samples fed per video frame (50 Hz refresh).
const SAMPLES_PER_FRAME: u32 = audio::SAMPLE_RATE / 50;

pub fn run(machine: &mut Dragon32System, key_map: &KeyMap, scale: u32) {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");
    let sdl_audio = sdl_context.audio().expect("Failed to init SDL audio");

    let (width, height) = machine.display_size();
    let mut video = Video::new(&sdl_video, "Ember - Dragon 32", width, height, scale);
    let mut event_pump = sdl_context.event_pump().expect("Failed to get event pump");

    let (audio_device, audio_ring, fade_out) = audio::init(&sdl_audio);
    audio_device.resume();

    let mut framebuffer = vec![0u8; (width * height * 3) as usize];

    'main: loop {
        // Poll pending SDL events and translate them to machine input.
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,

                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, true);
                    }
                }

                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    if let Some(button_id) = key_map.get(sc) {
                        machine.set_input(button_id, false);
                    }
                }

                _ => {}
            }
        }

        // Run one render slot of emulation.
        machine.run_frame();

        // F1 is the machine's escape into the cassette loader; without
        // an SD card there is nothing to browse, so point at --cas.
        if machine.function_key() == 1 {
            eprintln!("Loader: mount cassettes with --cas <file>");
        }

        // The VDG may have switched modes mid-frame.
        if let Some(mode) = machine.video_mode_change() {
            eprintln!("VDG mode: {}", mode.name());
        }
        let (width, height) = machine.display_size();
        video.set_native_size(width, height);
        let needed = (width * height * 3) as usize;
        if framebuffer.len() != needed {
            framebuffer.resize(needed, 0);
        }

        machine.render_frame(&mut framebuffer);
        video.present(&framebuffer);

        // Feed the audio ring with this frame's DAC level. Good enough
        // for keyclicks and cassette tones; the DAC is sampled once per
        // frame, not per write.
        let sample = audio::dac_to_sample(machine.dac_level());
        {
            let mut ring = audio_ring.lock().unwrap();
            if ring.len() < (SAMPLES_PER_FRAME * 4) as usize {
                for _ in 0..SAMPLES_PER_FRAME {
                    ring.push_back(sample);
                }
            }
        }

        // Frame timing is handled by VSync (present_vsync in Video::new).
    }

    // Fade the audio out before tearing the device down.
    fade_out.store(true, Ordering::Relaxed);
    std::thread::sleep(audio::fade_out_duration());
    audio_device.pause();
}

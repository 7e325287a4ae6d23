use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use ember_core::core::machine::Machine;
use ember_machines::Dragon32System;
use ember_machines::registry;
use ember_machines::rom_loader::RomImage;

mod audio;
mod config;
mod emulator;
mod input;
mod video;

#[derive(Parser)]
#[command(name = "ember", about = "Dragon 32 emulator", version)]
struct Args {
    /// Machine to run (see --list).
    #[arg(default_value = "dragon32")]
    machine: String,

    /// ROM image path. Defaults to `<rom_dir>/<machine rom>` from the
    /// config file.
    #[arg(long)]
    rom: Option<PathBuf>,

    /// CAS cassette image to mount.
    #[arg(long)]
    cas: Option<PathBuf>,

    /// Integer window scale factor.
    #[arg(long)]
    scale: Option<u32>,

    /// List registered machines and exit.
    #[arg(long)]
    list: bool,
}

fn main() {
    let args = Args::parse();
    let config = config::load();

    if args.list {
        for spec in registry::available() {
            println!("{} (ROM: {})", spec.name, spec.rom_file);
        }
        return;
    }

    let Some(spec) = registry::lookup(&args.machine) else {
        eprintln!("Unknown machine: {}", args.machine);
        eprintln!(
            "Available: {}",
            registry::available()
                .iter()
                .map(|s| s.name)
                .collect::<Vec<_>>()
                .join(", ")
        );
        exit(1);
    };

    let rom_path = args
        .rom
        .or_else(|| config.rom_dir.as_ref().map(|dir| dir.join(spec.rom_file)))
        .unwrap_or_else(|| {
            eprintln!("No ROM path: pass --rom or set rom_dir in the config file");
            exit(1);
        });

    let rom = RomImage::from_file(&rom_path).unwrap_or_else(|e| {
        eprintln!("Failed to load ROM {}: {e}", rom_path.display());
        exit(1);
    });
    eprintln!(
        "Loaded ROM {} (CRC32 {:08X})",
        rom_path.display(),
        rom.crc32()
    );

    // The registry covers discovery; the emulation loop wants the
    // concrete Dragon for cassette mounting and the F1 escape.
    let mut machine = Dragon32System::new(&rom).unwrap_or_else(|e| {
        eprintln!("Failed to build machine: {e}");
        exit(1);
    });

    if let Some(cas_path) = args.cas {
        match std::fs::read(&cas_path) {
            Ok(data) => {
                eprintln!("Mounted cassette {}", cas_path.display());
                machine.mount_cassette(data);
            }
            Err(e) => {
                eprintln!("Failed to read cassette {}: {e}", cas_path.display());
                exit(1);
            }
        }
    }

    let scale = args.scale.or(config.scale).unwrap_or(3);
    let key_map = input::default_key_map(machine.input_map());
    machine.reset();
    emulator::run(&mut machine, &key_map, scale);
}

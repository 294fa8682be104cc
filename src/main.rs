//! # Voxel World Entry Point
//!
//! Headless driver for the voxel world. It calls into the library's `run()` function,
//! which streams terrain around a falling body and logs what it does.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() {
    if let Err(error) = voxel_world::run() {
        log::error!("{}", error);
        eprintln!("voxel-world: {}", error);
        std::process::exit(1);
    }
}

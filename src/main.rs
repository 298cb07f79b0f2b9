//! IR Pong host entry point
//!
//! Runs one device in the terminal with a UDP socket standing in for the
//! infrared link. Start a second copy with `bind` and `peer` swapped in its
//! settings file to play against it.

use std::io;

use ir_pong::Settings;
use ir_pong::device::Device;
use ir_pong::platform::pacer::FixedPacer;
use ir_pong::platform::terminal::{KeyboardNav, TerminalDisplay};
use ir_pong::platform::udp::UdpLink;

fn main() {
    env_logger::init();
    log::info!("IR Pong starting...");

    let settings = Settings::load();
    if let Err(e) = run(&settings) {
        log::error!("IR Pong failed: {e}");
        eprintln!("IR Pong failed: {e}");
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> io::Result<()> {
    let link = UdpLink::connect(settings.link.bind.as_str(), settings.link.peer.as_str())?;

    let mut display = TerminalDisplay::new(settings.ticks_per_char());
    display.init()?;

    let mut device = Device::new(display, KeyboardNav::new(), link);
    let mut pacer = FixedPacer::new(settings.pacer_rate_hz);
    device.run(&mut pacer, |d| !d.nav().quit_requested());

    device.display_mut().cleanup()
}

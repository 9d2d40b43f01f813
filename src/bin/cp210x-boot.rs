//! Command-line front end: reset a target MCU through CP210x GPIOs,
//! optionally activating its bootloader.

use clap::Parser;
use cp210x_gpio::{BootPins, Cp210x, GpioPin};

#[derive(Parser, Debug)]
#[command(name = "cp210x-boot", version, about = "Reset a target MCU via CP210x GPIOs, optionally holding its active-low bootloader-activation pin")]
struct Cli {
    /// CP210x GPIO number wired to the target's nRESET pin
    #[arg(short, long, value_name = "PIN")]
    reset: u8,

    /// CP210x GPIO number wired to the target's active-low
    /// bootloader-activation pin; omit to reset without bootloader entry
    #[arg(short, long, value_name = "PIN")]
    bootload: Option<u8>,

    /// USB interface number; only meaningful for CP2105 (ECI = 0, SCI = 1)
    #[arg(short, long, value_name = "NUM", default_value_t = 0)]
    interface: u8,
}

fn run(cli: &Cli) -> cp210x_gpio::Result<()> {
    let reset = GpioPin::new(cli.reset)?;
    let bootload = cli.bootload.map(GpioPin::new).transpose()?;
    let pins = BootPins::new(reset, bootload)?;

    let device = Cp210x::open_first(cli.interface)?;
    println!("{} detected", device.variant());
    if pins.bootload().is_some() {
        println!("Resetting target with bootloader activation");
    } else {
        println!("Resetting target only (without bootloader activation)");
    }

    device.enter_bootloader(&pins)?;
    println!("Success!");
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

mod app;
mod config;

use std::env::var;
use std::thread;
use dotenv::dotenv;
use log::{debug, info};
use sysinfo::System;
use segpanel_gpio::GpioDriver;
use segpanel_gpio::gpiod::GpiodDriver;
use segpanel_gpio::lcd::ht1621::SegmentLcd;
use segpanel_gpio::lcd::ht1621::driver::GpioHT1621Driver;
use segpanel_gpio::trace::TraceGpioDriver;
use crate::app::App;
use crate::config::Config;

/// Pins of the HT1621 bus, from the environment.
#[derive(Debug)]
struct PinConfig {
    cs: usize,
    wr: usize,
    data: usize,
    backlight: Option<usize>,
}

impl PinConfig {
    fn from_env() -> eyre::Result<Self> {
        let backlight = match var("SEGPANEL_PIN_BACKLIGHT") {
            Ok(pin) if !pin.trim().is_empty() => Some(pin.trim().parse()?),
            _ => None,
        };
        Ok(PinConfig {
            cs: var("SEGPANEL_PIN_CS")?.trim().parse()?,
            wr: var("SEGPANEL_PIN_WR")?.trim().parse()?,
            data: var("SEGPANEL_PIN_DATA")?.trim().parse()?,
            backlight,
        })
    }
}

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    const UNKNOWN_STR: &str = "???";

    info!("segpanel starting...");
    info!(
        "Host {} running {}",
        System::host_name().as_deref().unwrap_or(UNKNOWN_STR),
        System::long_os_version().as_deref().unwrap_or(UNKNOWN_STR),
    );

    let pins = PinConfig::from_env()?;
    info!("LCD @ CS: {}, WR: {}, DATA: {}, backlight: {:?}",
        pins.cs, pins.wr, pins.data, pins.backlight);

    debug!("Trying to load config...");
    let config = if let Some(config) = Config::try_load()? {
        info!("Config loaded.");
        config
    } else {
        info!("Config not found. Using default");
        let config = Config::default();
        config.save()?;
        info!("Default config saved to {}.", Config::path().display());
        config
    };
    debug!("{:?}", config);

    let dry_run = var("SEGPANEL_DRY_RUN").is_ok_and(|value| value == "1" || value == "true");
    if dry_run {
        info!("Dry run, recording the bus instead of driving it.");
        let highest = [Some(pins.cs), Some(pins.wr), Some(pins.data), pins.backlight]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(0);
        let gpio = TraceGpioDriver::new(highest + 1);
        run(&gpio, &pins, &config)?;
        info!("Recorded {} transitions.", gpio.events().len());
    } else {
        let chip = var("SEGPANEL_GPIOCHIP").unwrap_or_else(|_| "/dev/gpiochip0".to_string());
        let gpio = GpiodDriver::open(&chip)?;
        debug!("{:?} initialized.", gpio);
        run(&gpio, &pins, &config)?;
    }

    Ok(())
}

fn run(gpio: &dyn GpioDriver, pins: &PinConfig, config: &Config) -> eyre::Result<()> {
    debug!("Initializing LCD driver...");
    let mut cs_pin = gpio.get_pin(pins.cs)?;
    let cs_out = cs_pin.as_output()?;
    let mut wr_pin = gpio.get_pin(pins.wr)?;
    let wr_out = wr_pin.as_output()?;
    let mut data_pin = gpio.get_pin(pins.data)?;
    let data_out = data_pin.as_output()?;
    let mut backlight_pin = pins.backlight.map(|pin| gpio.get_pin(pin)).transpose()?;
    let backlight_out = backlight_pin.as_mut().map(|pin| pin.as_output()).transpose()?;

    let mut driver = GpioHT1621Driver::new(&*cs_out, &*wr_out, &*data_out)
        .with_timing(config.timing());
    if let Some(backlight_out) = &backlight_out {
        driver = driver.with_backlight(&**backlight_out);
    }
    debug!("{:?} initialized.", driver);

    let mut app = App::new(SegmentLcd::new(&mut driver));
    app.start(config.backlight)?;

    info!("Starting main loop...");
    let mut frame = 0u64;
    while config.frame_limit.is_none_or(|limit| frame < limit) {
        app.update()?;
        thread::sleep(config.refresh_period());
        frame += 1;
    }

    app.stop()?;
    Ok(())
}

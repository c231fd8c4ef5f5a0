use std::env::var_os;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use eyre::WrapErr;
use serde::{Serialize, Deserialize};
use segpanel_gpio::lcd::ht1621::driver::HT1621Timing;

/// Bus timing, in microseconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub write_low_us: u64,
    pub write_high_us: u64,
    pub cs_setup_us: u64,
    pub cs_hold_us: u64,
    pub backlight_settle_us: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        let timing = HT1621Timing::default();
        TimingConfig {
            write_low_us: timing.write_low.as_micros() as u64,
            write_high_us: timing.write_high.as_micros() as u64,
            cs_setup_us: timing.cs_setup.as_micros() as u64,
            cs_hold_us: timing.cs_hold.as_micros() as u64,
            backlight_settle_us: timing.backlight_settle.as_micros() as u64,
        }
    }
}

impl From<&TimingConfig> for HT1621Timing {
    fn from(config: &TimingConfig) -> Self {
        HT1621Timing {
            write_low: Duration::from_micros(config.write_low_us),
            write_high: Duration::from_micros(config.write_high_us),
            cs_setup: Duration::from_micros(config.cs_setup_us),
            cs_hold: Duration::from_micros(config.cs_hold_us),
            backlight_settle: Duration::from_micros(config.backlight_settle_us),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub timing: TimingConfig,
    /// Time between two display refreshes.
    pub refresh_ms: u64,
    pub backlight: bool,
    /// Stops after this many refreshes. Runs forever if unset.
    pub frame_limit: Option<u64>,
}

impl Config {
    /// Gets the config file path, from `CONFIG_FILE` or `config.json` by default.
    pub fn path() -> PathBuf {
        var_os("CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    /// Loads the config file.
    ///
    /// Returns `Ok(None)` only if the file doesn't exist. A file that can't be read or parsed is
    /// an error, so it never gets replaced by the defaults.
    pub fn try_load() -> eyre::Result<Option<Self>> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(config_path: &Path) -> eyre::Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(config_path)
            .wrap_err_with(|| format!("Couldn't open {}", config_path.display()))?;
        let reader = std::io::BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .wrap_err_with(|| format!("Invalid config in {}", config_path.display()))?;
        Ok(Some(config))
    }

    pub fn save(&self) -> eyre::Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, config_path: &Path) -> eyre::Result<()> {
        let file = std::fs::File::create(config_path)?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn timing(&self) -> HT1621Timing {
        (&self.timing).into()
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timing: TimingConfig::default(),
            refresh_ms: 100,
            backlight: true,
            frame_limit: None,
        }
    }
}

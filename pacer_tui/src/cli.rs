use std::path::PathBuf;

use clap::Parser;
use pacer_sim::{error::PacerSimResult, Settings};

#[derive(Parser, Debug)]
#[command(name = "pacer", version, about = "Transvenous pacing simulator")]
pub struct Cli {
    /// YAML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long, value_name = "FILE", default_value = "pacer.log")]
    pub log_file: PathBuf,

    /// Generator tick period in milliseconds
    #[arg(long, value_name = "N")]
    pub tick_ms: Option<u64>,

    /// Display refresh rate
    #[arg(long, value_name = "N")]
    pub fps: Option<u32>,
}

impl Cli {
    /// Settings from file and environment, with command-line overrides on top.
    pub fn settings(&self) -> PacerSimResult<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_ms = tick_ms;
        }
        if let Some(fps) = self.fps {
            settings.frame_ms = (1000 / u64::from(fps.max(1))).max(1);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use clap::Parser;

    use super::Cli;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pacer"]).unwrap();
        assert_eq!(cli.config, None);
        assert_eq!(cli.log_file, PathBuf::from("pacer.log"));
        assert_eq!(cli.tick_ms, None);
        assert_eq!(cli.fps, None);
    }

    #[test]
    fn test_overrides_apply_on_top_of_settings() {
        let cli = Cli::try_parse_from(["pacer", "--tick-ms", "10", "--fps", "50"]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.tick_ms, 10);
        assert_eq!(settings.frame_ms, 20);
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        let cli = Cli::try_parse_from(["pacer", "--fps", "0"]).unwrap();
        assert_eq!(cli.settings().unwrap().frame_ms, 1000);
    }

    #[test]
    fn test_frame_period_never_reaches_zero() {
        let cli = Cli::try_parse_from(["pacer", "--fps", "5000"]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings.frame_ms, 1);
        assert!(!settings.frame_period().is_zero());
    }

    #[test]
    fn test_rejects_non_numeric_tick() {
        assert!(Cli::try_parse_from(["pacer", "--tick-ms", "fast"]).is_err());
    }
}

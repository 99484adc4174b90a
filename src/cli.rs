use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(name = "versebar")]
#[command(about = "Minimal audio player bar with drag-to-seek")]
pub struct Cli {
    /// Audio file to play.
    pub source: String,

    /// Initial volume (0.0 - 1.0), overrides the settings file.
    #[arg(long)]
    pub volume: Option<f32>,

    /// Loop the source, overrides the settings file.
    #[arg(long)]
    pub repeat: bool,

    /// Read and write settings at this path instead of the config dir.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_only() {
        let cli = Cli::try_parse_from(["versebar", "song.ogg"]).unwrap();
        assert_eq!(cli.source, "song.ogg");
        assert_eq!(cli.volume, None);
        assert!(!cli.repeat);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "versebar",
            "--volume",
            "0.5",
            "--repeat",
            "--config",
            "/tmp/vb.json",
            "song.ogg",
        ])
        .unwrap();
        assert_eq!(cli.volume, Some(0.5));
        assert!(cli.repeat);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/vb.json")));
    }

    #[test]
    fn test_source_required() {
        assert!(Cli::try_parse_from(["versebar"]).is_err());
    }
}

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "popread",
    version,
    about = "A terminal reader that pages plain text and pops up sentences on click.",
    long_about = None
)]
pub struct Cli {
    /// Print the segmented, paginated text instead of opening the reader
    #[clap(short, long)]
    pub dump: bool,

    /// Page width in cells used by --dump
    #[clap(long, default_value_t = 80, value_name = "COLS")]
    pub width: u16,

    /// Page height in cells used by --dump
    #[clap(long, default_value_t = 24, value_name = "ROWS")]
    pub height: u16,

    /// Font size (12-24); defaults to the configured size
    #[clap(long, value_name = "SIZE")]
    pub font_size: Option<u16>,

    /// Use a specific configuration file
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Enable debug output
    #[clap(long)]
    pub debug: bool,

    /// Text file to open, or `-` for stdin
    #[clap(name = "FILE")]
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["popread"]);
        assert!(!cli.dump);
        assert_eq!(cli.width, 80);
        assert_eq!(cli.height, 24);
        assert_eq!(cli.font_size, None);
        assert_eq!(cli.file, None);
    }

    #[test]
    fn test_parse_dump_options() {
        let cli = Cli::parse_from([
            "popread", "--dump", "--width", "40", "--height", "10", "--font-size", "20", "-vv",
            "notes.txt",
        ]);
        assert!(cli.dump);
        assert_eq!(cli.width, 40);
        assert_eq!(cli.height, 10);
        assert_eq!(cli.font_size, Some(20));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file.as_deref(), Some("notes.txt"));
    }
}

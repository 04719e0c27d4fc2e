use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "trendboard", version, about = "Trending keywords dashboard")]
pub struct CliArgs {
    /// Print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the trends snapshot path
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Override the dashboard config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Write the dashboard as a static HTML page and exit
    #[arg(long = "export-html", value_name = "PATH")]
    pub export_html: Option<PathBuf>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(data) = &self.data {
            std::env::set_var("TRENDS_PATH", data);
        }
        if let Some(config) = &self.config {
            std::env::set_var("TRENDBOARD_CONFIG", config);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parses_export_and_overrides() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "trendboard",
            "--data",
            "snapshots/today.json",
            "--export-html",
            "out/index.html",
        ])?;

        assert_eq!(args.data.as_deref(), Some("snapshots/today.json"));
        assert_eq!(args.export_html, Some(PathBuf::from("out/index.html")));
        assert!(!args.headless);
        Ok(())
    }

    #[test]
    fn help_mentions_every_mode() {
        let help = CliArgs::command().render_help().to_string();
        assert!(help.contains("--headless"));
        assert!(help.contains("--export-html"));
    }
}

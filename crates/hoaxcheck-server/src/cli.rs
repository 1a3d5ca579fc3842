use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hoaxcheck")]
#[command(
    author,
    version,
    about = "Classify news articles and social-media posts as REAL or HOAX"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Classifier bundles config path
    #[arg(
        short,
        long,
        global = true,
        env = "HOAXCHECK_CONFIG",
        default_value = "./classifiers.yaml"
    )]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single text
    Classify {
        /// Domain: news (berita) or social (sosmed)
        #[arg(short, long, default_value = "news")]
        domain: String,

        /// Report the most influential terms and tag them in the text
        #[arg(long)]
        highlight: bool,

        /// Number of influential terms (defaults to the config's top_n)
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Text to classify; read from stdin when omitted
        text: Option<String>,
    },

    /// Start the HTTP API
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,
    },

    /// Show the load status of every configured bundle
    Domains,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify() {
        let cli = Cli::parse_from([
            "hoaxcheck",
            "classify",
            "--domain",
            "sosmed",
            "--highlight",
            "-n",
            "3",
            "free prize",
        ]);

        match cli.command {
            Commands::Classify {
                domain,
                highlight,
                top_n,
                json,
                text,
            } => {
                assert_eq!(domain, "sosmed");
                assert!(highlight);
                assert_eq!(top_n, Some(3));
                assert!(!json);
                assert_eq!(text.as_deref(), Some("free prize"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_default_domain() {
        let cli = Cli::parse_from(["hoaxcheck", "classify", "x"]);
        assert!(matches!(cli.command, Commands::Classify { ref domain, .. } if domain == "news"));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["hoaxcheck", "domains", "--config", "/etc/hoaxcheck.yaml"]);
        assert_eq!(cli.config, PathBuf::from("/etc/hoaxcheck.yaml"));
        assert!(matches!(cli.command, Commands::Domains));
    }
}

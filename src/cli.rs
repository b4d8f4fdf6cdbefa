use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Folio - render blueprints and Panel views from YAML
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Locale used for translated labels (overrides config)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Config file (default: ./folio.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Single-line JSON output
    #[arg(long, global = true)]
    pub compact: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a blueprint for a model
    Render {
        /// Blueprint file, e.g. blueprints/pages/blog.yml
        blueprint: PathBuf,

        /// YAML fixture describing the site
        #[arg(long)]
        site: PathBuf,

        /// Model id to render against (default: site)
        #[arg(long, default_value = "site")]
        model: String,
    },

    /// Build the Panel view of a file
    File {
        /// YAML fixture describing the site
        fixture: PathBuf,

        /// File id, e.g. blog/first-post/cover.jpg
        file_id: String,

        /// Blueprint directory used for the file and its parents
        #[arg(long)]
        blueprints: Option<PathBuf>,

        /// Selected tab
        #[arg(long)]
        tab: Option<String>,

        /// Print the dropdown items instead of the view
        #[arg(long)]
        dropdown: bool,
    },

    /// Set up a component and print its data
    Component {
        /// Component type
        #[arg(value_name = "TYPE")]
        component_type: String,

        /// Attribute as key=value (value parsed as YAML)
        #[arg(long = "attr", value_name = "KEY=VALUE")]
        attrs: Vec<String>,

        /// Definition directory (overrides [components] dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Validate every blueprint in a directory
    Check {
        /// Blueprint directory
        #[arg(default_value = "blueprints")]
        dir: PathBuf,
    },
}

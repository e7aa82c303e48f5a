//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "npw",
    bin_name = "npw",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Flutter project and module wizard",
    long_about = "npw walks the Flutter \"new project\" wizard from the command \
                  line: it suggests, validates and deduplicates every template \
                  parameter before handing the result to `flutter create`.",
    after_help = "EXAMPLES:\n\
        \x20 npw new my_shop --type app --sdk /opt/flutter\n\
        \x20 npw new payments --type plugin --org com.acme --dry-run\n\
        \x20 npw new billing --module --project ~/work/shop --type package\n\
        \x20 npw list --module\n\
        \x20 npw completions bash > /usr/share/bash-completion/completions/npw",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Flutter project or module.
    #[command(
        visible_alias = "n",
        about = "Create a new project or module",
        after_help = "EXAMPLES:\n\
            \x20 npw new my_shop --type app --sdk /opt/flutter\n\
            \x20 npw new payments --type plugin --org com.acme --offline\n\
            \x20 npw new billing --module --project ~/work/shop --type package"
    )]
    New(NewArgs),

    /// List the templates in the catalog.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 npw list\n\
            \x20 npw list --module\n\
            \x20 npw list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 npw completions bash > ~/.local/share/bash-completion/completions/npw\n\
            \x20 npw completions zsh  > ~/.zfunc/_npw\n\
            \x20 npw completions fish > ~/.config/fish/completions/npw.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the npw configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 npw config get defaults.base_package\n\
            \x20 npw config set defaults.base_package com.acme\n\
            \x20 npw config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `npw new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project (or module) name.  Omit it in interactive mode to be prompted.
    #[arg(value_name = "NAME", help = "Project or module name")]
    pub name: Option<String>,

    /// What kind of Flutter artifact to create.
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_enum,
        default_value = "app",
        help = "Project type"
    )]
    pub kind: ProjectKind,

    /// Add a module to an existing project instead of creating a new one.
    #[arg(long = "module", help = "Add a module to an existing project")]
    pub module: bool,

    /// Root of the existing project (used for uniqueness probes and as the
    /// default location when adding a module).
    #[arg(
        long = "project",
        value_name = "DIR",
        help = "Existing project root",
        requires = "module"
    )]
    pub project: Option<PathBuf>,

    /// Flutter SDK installation directory.
    #[arg(
        short = 's',
        long = "sdk",
        value_name = "DIR",
        env = "FLUTTER_SDK",
        help = "Flutter SDK path"
    )]
    pub sdk: Option<PathBuf>,

    /// Organization used to compose the package name, e.g. `com.acme`.
    #[arg(long = "org", value_name = "ORG", help = "Organization (reverse domain)")]
    pub org: Option<String>,

    /// Explicit package name.  Overrides the value derived from `--org` and
    /// the project name.
    #[arg(long = "package", value_name = "PACKAGE", help = "Full package name")]
    pub package: Option<String>,

    /// Directory the project is created under.
    #[arg(
        short = 'o',
        long = "location",
        value_name = "DIR",
        help = "Parent directory for the new project"
    )]
    pub location: Option<PathBuf>,

    /// Language for the Android host code.
    #[arg(
        long = "android-language",
        value_name = "LANG",
        value_enum,
        default_value = "kotlin",
        help = "Android host language"
    )]
    pub android_language: AndroidLanguage,

    /// Language for the iOS host code.
    #[arg(
        long = "ios-language",
        value_name = "LANG",
        value_enum,
        default_value = "swift",
        help = "iOS host language"
    )]
    pub ios_language: IosLanguage,

    /// Use the legacy android.support libraries instead of AndroidX.
    #[arg(long = "legacy-android-libraries", help = "Use android.support instead of AndroidX")]
    pub legacy_android_libraries: bool,

    /// Create the project without fetching packages from the network.
    #[arg(long = "offline", help = "Run flutter create with --offline")]
    pub offline: bool,

    /// Describe what would be created without running anything.
    #[arg(long = "dry-run", help = "Print the flutter create invocation and exit")]
    pub dry_run: bool,

    /// Accept the computed configuration without prompting.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and prompts")]
    pub yes: bool,
}

/// The kinds of Flutter artifact the catalog knows how to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectKind {
    /// A standalone Flutter application.
    App,
    /// A plugin exposing platform APIs to Dart.
    Plugin,
    /// A pure-Dart shared package.
    Package,
    /// A module embeddable in a host application.
    Module,
    /// An import wrapper around an existing Flutter project.
    Import,
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::App => "app",
            Self::Plugin => "plugin",
            Self::Package => "package",
            Self::Module => "module",
            Self::Import => "import",
        };
        f.write_str(s)
    }
}

/// Host language for the Android side of the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AndroidLanguage {
    Kotlin,
    Java,
}

/// Host language for the iOS side of the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IosLanguage {
    Swift,
    /// Objective-C.
    Objc,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `npw list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show the module gallery (includes the empty "None" entry).
    #[arg(long = "module", help = "List module templates")]
    pub module: bool,

    /// Output format for the listing.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "table",
        help = "Listing format"
    )]
    pub format: ListFormat,
}

/// How `npw list` renders the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned human-readable table.
    Table,
    /// One template name per line.
    List,
    /// JSON array on stdout.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `npw completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}

/// Supported completion shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config ────────────────────────────────────────────────────────────────────

/// Subcommands of `npw config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print a single configuration value.
    Get {
        /// Dotted key, e.g. `defaults.base_package`.
        key: String,
    },
    /// Set a configuration value and persist it.
    Set {
        /// Dotted key, e.g. `defaults.base_package`.
        key: String,
        /// New value.
        value: String,
    },
    /// Print the whole configuration.
    List,
    /// Print the path of the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse")
    }

    #[test]
    fn new_with_defaults() {
        let cli = parse(&["npw", "new", "my_shop"]);
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.name.as_deref(), Some("my_shop"));
                assert_eq!(args.kind, ProjectKind::App);
                assert_eq!(args.android_language, AndroidLanguage::Kotlin);
                assert_eq!(args.ios_language, IosLanguage::Swift);
                assert!(!args.module);
                assert!(!args.offline);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn new_module_takes_a_project_root() {
        let cli = parse(&[
            "npw", "new", "billing", "--module", "--project", "/work/shop", "--type", "package",
        ]);
        match cli.command {
            Commands::New(args) => {
                assert!(args.module);
                assert_eq!(args.project.as_deref(), Some(std::path::Path::new("/work/shop")));
                assert_eq!(args.kind, ProjectKind::Package);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn project_flag_requires_module() {
        assert!(Cli::try_parse_from(["npw", "new", "x", "--project", "/work"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["npw", "-v", "-q", "list"]).is_err());
    }

    #[test]
    fn list_format_parses() {
        let cli = parse(&["npw", "list", "--format", "json", "--module"]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.format, ListFormat::Json);
                assert!(args.module);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_set_parses_key_and_value() {
        let cli = parse(&["npw", "config", "set", "defaults.base_package", "com.acme"]);
        match cli.command {
            Commands::Config(ConfigCommands::Set { key, value }) => {
                assert_eq!(key, "defaults.base_package");
                assert_eq!(value, "com.acme");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

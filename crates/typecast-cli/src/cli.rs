// this_file: crates/typecast-cli/src/cli.rs

//! CLI argument definitions using Clap v4

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Typecast - glyph layout skeletons and outlines from the command line
#[derive(Parser, Debug)]
#[command(name = "typecast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out text and emit the skeleton and glyph geometry as JSON
    #[command(alias = "l")]
    Layout(Box<LayoutArgs>),

    /// Show metrics, axes, instances, and features of a font
    #[command(alias = "i")]
    Info(InfoArgs),
}

/// Arguments for the layout command
#[derive(Parser, Debug)]
pub struct LayoutArgs {
    /// Text to lay out; `\n` separates lines (reads stdin if omitted)
    pub text: Option<String>,

    /// Font file path (.ttf, .otf, .ttc, .otc)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: PathBuf,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,

    /// JSON layout configuration; flags below are applied on top of it
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Split lines into bidirectional runs before shaping
    #[arg(long = "bidi", action = ArgAction::SetTrue)]
    pub bidi: bool,

    /// Merge overlapping contours of each glyph
    #[arg(long = "remove-overlaps", action = ArgAction::SetTrue)]
    pub remove_overlaps: bool,

    /// Skip kerning recovery for per-glyph variation
    #[arg(long = "no-kerning-recovery", action = ArgAction::SetTrue)]
    pub no_kerning_recovery: bool,

    /// Reshape whole runs per glyph to catch variation-driven substitutions
    #[arg(long = "reprocess-glyph-substitution", action = ArgAction::SetTrue)]
    pub reprocess_glyph_substitution: bool,

    /// Do not seed features from the default-state table
    #[arg(long = "no-feature-defaults", action = ArgAction::SetTrue)]
    pub no_feature_defaults: bool,

    /// Font feature settings, e.g. "-liga,+ss01,kern=0"
    #[arg(short = 'F', long = "features")]
    pub features: Option<String>,

    /// Variation settings, e.g. "wght=700,wdth=85"
    #[arg(short = 'V', long = "variations")]
    pub variations: Option<String>,

    /// Read variation values as 0..1 between axis minimum and maximum
    #[arg(long = "unit-space", action = ArgAction::SetTrue)]
    pub unit_space: bool,

    /// Output file path (stdout if omitted)
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pub pretty: bool,

    /// Print a one-line summary to stderr
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Font file path
    #[arg(short = 'f', long = "font-file")]
    pub font_file: PathBuf,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,

    /// Report named instance coordinates in 0..1 unit space
    #[arg(long = "unit-space", action = ArgAction::SetTrue)]
    pub unit_space: bool,

    /// Emit JSON instead of text
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,
}

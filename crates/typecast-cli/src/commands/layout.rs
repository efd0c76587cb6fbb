// this_file: crates/typecast-cli/src/commands/layout.rs

//! Layout command implementation
//!
//! Loads a font, lays the text out, and writes the resulting skeleton and
//! geometry records as JSON.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use typecast_core::{VariationSpace, VariationState};
use typecast_layout::LayoutConfig;

use crate::cli::LayoutArgs;

pub fn run(args: &LayoutArgs) -> Result<()> {
    let text = input_text(args)?;
    let config = build_config(args)?;
    log::debug!("Layout config: {config:?}");

    let layout = typecast::layout_file(&args.font_file, args.face_index, &text, &config)
        .with_context(|| format!("Failed to lay out text with {}", args.font_file.display()))?;

    if args.verbose {
        eprintln!(
            "{} glyphs, {} unique outlines, bezier order {}",
            layout.glyph_count(),
            layout.records().len(),
            layout.bezier_order.order()
        );
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&layout)?
    } else {
        serde_json::to_string(&layout)?
    };

    match &args.output_file {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn input_text(args: &LayoutArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(decode_escapes(text));
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// Config file first, then flags on top
fn build_config(args: &LayoutArgs) -> Result<LayoutConfig> {
    let mut config = match &args.config {
        Some(path) => LayoutConfig::from_file(path)?,
        None => LayoutConfig::default(),
    };

    if args.bidi {
        config.use_bidi_segmentation = true;
    }
    if args.remove_overlaps {
        config.remove_overlaps = true;
    }
    if args.no_kerning_recovery {
        config.recover_kerning = false;
    }
    if args.reprocess_glyph_substitution {
        config.reprocess_for_glyph_substitution = true;
    }
    if args.no_feature_defaults {
        config.apply_feature_defaults = false;
    }
    if args.unit_space {
        config.variation_space = VariationSpace::Unit;
    }
    if let Some(list) = &args.features {
        config.features.extend(parse_features(list)?);
    }
    if let Some(list) = &args.variations {
        config.variations = config.variations.overlaid(&parse_variations(list)?);
    }
    Ok(config)
}

/// `+tag`, `-tag`, `tag=0|1`, or a bare `tag` (on)
pub fn parse_features(list: &str) -> Result<BTreeMap<String, bool>> {
    let mut features = BTreeMap::new();
    for part in list.split([',', ' ']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (tag, enabled) = if let Some(tag) = part.strip_prefix('+') {
            (tag, true)
        } else if let Some(tag) = part.strip_prefix('-') {
            (tag, false)
        } else if let Some((tag, value)) = part.split_once('=') {
            let value: u32 = value
                .parse()
                .with_context(|| format!("Invalid feature value: {part}"))?;
            (tag, value != 0)
        } else {
            (part, true)
        };

        if tag.len() != 4 || !tag.is_ascii() {
            bail!("Invalid feature tag: {tag:?}");
        }
        features.insert(tag.to_string(), enabled);
    }
    Ok(features)
}

/// `tag=value` pairs separated by commas or spaces
pub fn parse_variations(list: &str) -> Result<VariationState> {
    let mut state = VariationState::new();
    for part in list.split([',', ' ']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let Some((tag, value)) = part.split_once('=') else {
            bail!("Variation must look like tag=value: {part:?}");
        };
        if tag.len() != 4 || !tag.is_ascii() {
            bail!("Invalid axis tag: {tag:?}");
        }
        let value: f32 = value
            .parse()
            .with_context(|| format!("Invalid axis value: {part}"))?;
        state.set(tag, value);
    }
    Ok(state)
}

/// `\n` for line breaks and `\u{XXXX}` / `\uXXXX` for code points
pub fn decode_escapes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                chars.next();
                result.push('\n');
            }
            Some('u') => {
                chars.next();
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|&c| c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => result.push(decoded),
                    None => {
                        result.push_str("\\u");
                        result.push_str(&hex);
                    }
                }
            }
            _ => result.push(ch),
        }
    }
    result
}

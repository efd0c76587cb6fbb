// this_file: crates/typecast-cli/src/commands/info.rs

//! Info command implementation

use anyhow::{Context, Result};
use serde_json::json;
use typecast_core::{FontRef, VariationSpace};
use typecast_fontdb::{FeatureGroup, Font};

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let font = Font::from_file_index(&args.font_file, args.face_index)
        .with_context(|| format!("Failed to load font {}", args.font_file.display()))?;
    let space = if args.unit_space {
        VariationSpace::Unit
    } else {
        VariationSpace::Design
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&describe(&font, space))?);
    } else {
        print_text(&font, space);
    }
    Ok(())
}

fn group_name(group: FeatureGroup) -> &'static str {
    match group {
        FeatureGroup::General => "general",
        FeatureGroup::StylisticSet => "stylistic_set",
        FeatureGroup::CharacterVariant => "character_variant",
    }
}

fn describe(font: &Font, space: VariationSpace) -> serde_json::Value {
    let instances: Vec<_> = font
        .named_instances(space)
        .into_iter()
        .map(|instance| json!({ "name": instance.name, "coords": instance.coords }))
        .collect();
    let features: Vec<_> = font
        .feature_toggles(true)
        .into_iter()
        .map(|toggle| {
            json!({
                "tag": toggle.tag,
                "label": toggle.label,
                "enabled": toggle.enabled,
                "group": group_name(toggle.group),
            })
        })
        .collect();

    json!({
        "family": font.family_name(),
        "subfamily": font.subfamily_name(),
        "units_per_em": font.units_per_em(),
        "glyph_count": font.glyph_count(),
        "bezier_order": font.bezier_order(),
        "line_spacing": font.best_line_spacing(),
        "metrics": font.metrics(),
        "axes": font.axes(),
        "named_instances": instances,
        "features": features,
        "stylistic_sets": font.stylistic_set_names(),
    })
}

fn print_text(font: &Font, space: VariationSpace) {
    let family = font.family_name().unwrap_or_else(|| "(unnamed)".to_string());
    let subfamily = font.subfamily_name().unwrap_or_default();
    println!("{family} {subfamily}");
    println!("  units per em:  {}", font.units_per_em());
    if let Some(count) = font.glyph_count() {
        println!("  glyphs:        {count}");
    }
    println!("  bezier order:  {}", font.bezier_order().order());
    println!("  line spacing:  {}", font.best_line_spacing());

    let axes = font.axes();
    if !axes.is_empty() {
        println!("\nAxes:");
        for axis in axes {
            let name = axis.name.as_deref().unwrap_or("");
            println!(
                "  {} {:<16} {} .. {} (default {})",
                axis.tag, name, axis.min, axis.max, axis.default
            );
        }
    }

    let instances = font.named_instances(space);
    if !instances.is_empty() {
        println!("\nNamed instances:");
        for instance in instances {
            let coords: Vec<String> = instance
                .coords
                .iter()
                .map(|(tag, value)| format!("{tag}={value}"))
                .collect();
            println!("  {:<24} {}", instance.name, coords.join(","));
        }
    }

    let toggles = font.feature_toggles(true);
    if !toggles.is_empty() {
        println!("\nFeatures:");
        for toggle in toggles {
            let mark = if toggle.enabled { '+' } else { '-' };
            println!("  {mark}{} {} [{}]", toggle.tag, toggle.label, group_name(toggle.group));
        }
    }
}

//! Text reports for `inspect` and `route`

use deck_core::{AssetTemplate, SlideRegistry};
use deck_playback::{format_clock, Address};

/// One line per slide with its narration address
pub fn deck_inventory(registry: &SlideRegistry, template: &AssetTemplate) -> Vec<String> {
    let mut lines = Vec::with_capacity(registry.len() + 2);
    lines.push(format!(
        "{} ({} slides, {})",
        registry.title().unwrap_or("Untitled deck"),
        registry.len(),
        format_clock(registry.total_duration().as_secs_f64())
    ));

    for (index, slide) in registry.iter().enumerate() {
        let mut line = format!(
            "{:>3}. {:<12} {:>6}  {}",
            index + 1,
            slide.id,
            format_clock(slide.duration_seconds),
            template.resolve(&slide.id)
        );
        if slide.notes.is_some() {
            line.push_str("  [notes]");
        }
        if slide.narration_script.is_some() {
            line.push_str("  [script]");
        }
        lines.push(line);
    }

    lines
}

/// Describe how an address resolves, optionally against a deck size
pub fn route(raw: &str, slides: Option<usize>) -> String {
    match Address::parse(raw) {
        Some(address) if !matches!(slides, Some(n) if address.index() >= n) => {
            format!("{} -> index {}", address.to_fragment(), address.index())
        }
        Some(address) => format!("{} -> ignored (out of range)", address.to_fragment()),
        None => "ignored".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::SlideDescriptor;

    #[test]
    fn inventory_lists_assets() {
        let registry = SlideRegistry::from_slides(
            Some("Talk".to_string()),
            vec![
                SlideDescriptor::new("intro", 20.0).with_notes("hello"),
                SlideDescriptor::new("outro", 45.0),
            ],
        )
        .unwrap();

        let lines = deck_inventory(&registry, &AssetTemplate::default());

        assert_eq!(lines[0], "Talk (2 slides, 1:05)");
        assert!(lines[1].contains("/audio/slide-intro.mp3"));
        assert!(lines[1].ends_with("[notes]"));
        assert!(lines[2].contains("0:45"));
    }

    #[test]
    fn route_reports_index_or_ignored() {
        assert_eq!(route("#/slide/3", None), "#/slide/3 -> index 2");
        assert_eq!(route("slide/3", Some(2)), "#/slide/3 -> ignored (out of range)");
        assert_eq!(route("slide/abc", None), "ignored");
    }
}

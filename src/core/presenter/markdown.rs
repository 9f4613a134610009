//! Markdown views.

use super::{tag_label, title_case};
use crate::core::models::{CatalogRecord, CompositionResult};

pub fn composition(record: &CatalogRecord, composition: &CompositionResult) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Constellation Composition: {}\n\n", record.name));
    md.push_str(&format!("**Story:** {}\n\n", record.story));
    md.push_str(&format!("**Themes:** {}\n\n", record.theme));
    md.push_str(&format!("**Visual Character:** {}\n\n", record.visual_character));

    md.push_str("## Focal Points\n\n");
    for (i, point) in composition.focal_points.iter().enumerate() {
        md.push_str(&format!(
            "{}. Position: ({:.2}, {:.2}) - Weight: {:.2}\n",
            i + 1,
            point.x,
            point.y,
            point.weight
        ));
    }

    md.push_str("\n## Visual Flow\n\n");
    for (key, value) in composition.visual_flow.fields() {
        md.push_str(&format!("- **{}:** {}\n", tag_label(key), value));
    }

    let balance = &composition.balance;
    md.push_str("\n## Balance\n\n");
    md.push_str(&format!("- **Type:** {}\n", balance.balance_type.as_str()));
    md.push_str(&format!(
        "- **Center of Mass:** ({:.2}, {:.2})\n",
        balance.center_of_mass.x, balance.center_of_mass.y
    ));
    md.push_str(&format!("- **Symmetry:** {}\n", balance.symmetry.as_str()));
    md.push_str(&format!("- **Stability:** {}\n", balance.stability.as_str()));

    md.push_str("\n## Spatial Distribution\n\n");
    md.push_str(&format!("{}\n", tag_label(composition.spatial_distribution.as_str())));

    if !composition.mythology_themes.is_empty() {
        md.push_str("\n## Mythology Themes\n\n");
        for theme in &composition.mythology_themes {
            md.push_str(&format!("- {}\n", title_case(theme)));
        }
    }

    md.push_str("\n## Suggested Visual Elements\n\n");
    for (category, elements) in composition.suggested_elements.categories() {
        md.push_str(&format!("### {}\n\n", tag_label(category)));
        for element in elements {
            md.push_str(&format!("- {}\n", element));
        }
        md.push('\n');
    }

    md
}

pub fn search(matches: &[&CatalogRecord]) -> String {
    let mut md = format!("# Found {} Constellation(s)\n\n", matches.len());

    for (i, record) in matches.iter().enumerate() {
        md.push_str(&format!("## {}. {}\n\n", i + 1, record.name));
        md.push_str(&format!("**Abbreviation:** {}\n\n", record.abbreviation));
        md.push_str(&format!("**Story:** {}\n\n", record.story));
        md.push_str(&format!("**Themes:** {}\n\n", record.theme));
        md.push_str(&format!("**Visual Character:** {}\n\n", record.visual_character));
        md.push_str(&format!("**Shape:** {}\n\n", tag_label(&record.shape)));
        md.push_str(&format!("**Brightness:** {}\n\n", tag_label(&record.brightness)));
        md.push_str("---\n\n");
    }

    md
}

pub fn list(records: &[&CatalogRecord]) -> String {
    let mut md = format!("# Available Constellations ({})\n\n", records.len());

    for record in records {
        md.push_str(&format!("## {} ({})\n\n", record.name, record.abbreviation));
        md.push_str(&format!("**Theme:** {}\n\n", record.theme));
        md.push_str(&format!("**Shape Pattern:** {}\n\n", tag_label(&record.shape)));
        md.push_str("---\n\n");
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{Catalog, SearchQuery};
    use crate::core::composition::map_composition;
    use crate::core::models::CanvasSize;

    fn render(name: &str, include_mythology: bool) -> String {
        let record = Catalog::builtin().find(name).unwrap();
        let result = map_composition(record, CanvasSize::default(), include_mythology).unwrap();
        composition(record, &result)
    }

    #[test]
    fn test_composition_sections() {
        let md = render("Orion", true);
        assert!(md.starts_with("# Constellation Composition: Orion\n\n"));
        assert!(md.contains("**Story:** Great hunter with belt and sword"));
        assert!(md.contains("1. Position: (0.50, 0.45) - Weight: 0.40\n"));
        assert!(md.contains("- **Primary Direction:** "));
        assert!(md.contains("- **Type:** centered\n"));
        assert!(md.contains("\n## Spatial Distribution\n\nLinear Arrangement\n"));
        assert!(md.contains("- Hunting Prowess\n"));
        assert!(md.contains("- The Hunt\n"));
        assert!(md.contains("### Color Palette\n\n"));
    }

    #[test]
    fn test_mythology_section_omitted_when_empty() {
        let md = render("Orion", false);
        assert!(!md.contains("## Mythology Themes"));
        assert!(md.contains("## Suggested Visual Elements"));
    }

    #[test]
    fn test_search_listing() {
        let matches = Catalog::builtin().search(&SearchQuery::default().shape("compact"));
        let md = search(&matches);
        assert!(md.starts_with("# Found 4 Constellation(s)\n\n## 1. Aries\n\n"));
        assert!(md.contains("## 4. Lyra\n\n**Abbreviation:** Lyr\n\n"));
        assert!(md.contains("**Shape:** Compact Curved\n\n**Brightness:** Bright\n\n"));
        assert!(md.ends_with("---\n\n"));
    }

    #[test]
    fn test_list_entries() {
        let records = Catalog::builtin().sorted_by_name();
        let md = list(&records);
        assert!(md.starts_with("# Available Constellations (22)\n\n## Andromeda (And)\n\n"));
        assert!(md.contains("**Shape Pattern:** Hourglass Belt\n\n"));
    }
}

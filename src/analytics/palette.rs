/// Display colors for common languages, matching GitHub's linguist palette.
const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("TypeScript", "#3178c6"),
    ("JavaScript", "#f7df1e"),
    ("Python", "#3776ab"),
    ("Go", "#00add8"),
    ("Rust", "#dea584"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C#", "#178600"),
    ("Ruby", "#701516"),
    ("PHP", "#4F5D95"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#A97BFF"),
    ("Dart", "#00B4AB"),
    ("Scala", "#c22d40"),
    ("Shell", "#89e051"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("Vue", "#41b883"),
    ("React", "#61dafb"),
];

/// Returns the display color for a language name.
///
/// Names outside the fixed table get a color derived from an FNV-1a hash of
/// the name, so the same language maps to the same color on every platform
/// and in every run.
pub fn color_for(name: &str) -> String {
    if let Some((_, color)) = LANGUAGE_COLORS.iter().find(|(lang, _)| *lang == name) {
        return (*color).to_string();
    }
    format!("#{:06x}", fnv1a(name) & 0x00ff_ffff)
}

fn fnv1a(input: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in input.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages_use_the_table() {
        assert_eq!(color_for("TypeScript"), "#3178c6");
        assert_eq!(color_for("Rust"), "#dea584");
    }

    #[test]
    fn test_generated_color_is_deterministic() {
        let first = color_for("Gleam");
        let second = color_for("Gleam");
        assert_eq!(first, second);
    }

    #[test]
    fn test_generated_color_is_well_formed() {
        let color = color_for("Befunge");
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_distinct_names_rarely_collide() {
        assert_ne!(color_for("Gleam"), color_for("Befunge"));
    }
}

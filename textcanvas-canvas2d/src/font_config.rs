use std::collections::HashSet;
use std::path::PathBuf;

/// Font configuration for a canvas context.
///
/// Only standard library types appear here; [`font_config_to_fontdb`] turns it into
/// the font database the text renderer uses.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
    /// Raw font files (TTF/OTF) to register.
    pub font_data: Vec<Vec<u8>>,
    /// Mappings from generic CSS family names to concrete font family names.
    pub generic_families: GenericFamilyMap,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            font_data: Vec::new(),
            generic_families: GenericFamilyMap::defaults(),
        }
    }
}

/// Concrete font families for the CSS generic families, in priority order.
#[derive(Clone, Debug, Default)]
pub struct GenericFamilyMap {
    pub serif: Vec<String>,
    pub sans_serif: Vec<String>,
    pub monospace: Vec<String>,
}

impl GenericFamilyMap {
    /// The default generic family mappings matching browser behavior.
    pub fn defaults() -> Self {
        Self {
            sans_serif: vec![
                "Arial".into(),
                "Helvetica".into(),
                "Liberation Sans".into(),
                "DejaVu Sans".into(),
            ],
            monospace: vec![
                "Courier New".into(),
                "Courier".into(),
                "Liberation Mono".into(),
                "DejaVu Sans Mono".into(),
            ],
            serif: vec![
                "Times New Roman".into(),
                "Times".into(),
                "Liberation Serif".into(),
                "DejaVu Serif".into(),
            ],
        }
    }
}

/// Convert a [`FontConfig`] into a [`fontdb::Database`].
pub fn font_config_to_fontdb(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();

    if config.load_system_fonts {
        db.load_system_fonts();
    }

    for dir in &config.font_dirs {
        db.load_fonts_dir(dir);
    }

    for data in &config.font_data {
        db.load_font_data(data.clone());
    }

    apply_generic_families(&mut db, &config.generic_families);
    log::debug!("font database contains {} faces", db.len());

    db
}

/// Point each generic family at the first available family of its priority list.
fn apply_generic_families(db: &mut fontdb::Database, families: &GenericFamilyMap) {
    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(family, _lang)| family.clone()))
        .collect();

    if let Some(family) = first_available(&available, &families.sans_serif) {
        db.set_sans_serif_family(family);
    }
    if let Some(family) = first_available(&available, &families.serif) {
        db.set_serif_family(family);
    }
    if let Some(family) = first_available(&available, &families.monospace) {
        db.set_monospace_family(family);
    }
}

fn first_available<'a>(available: &HashSet<String>, preferred: &'a [String]) -> Option<&'a str> {
    preferred
        .iter()
        .find(|family| available.contains(*family))
        .map(String::as_str)
}

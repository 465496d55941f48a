//! Property renaming and name derivation shared by the passes

use renaissance_core::{META_SRC, META_SRC_KEY, Properties, PropertyValue};
use regex::Regex;
use std::sync::LazyLock;

pub const SIMPLE_NAME: &str = "simpleName";
pub const QUALIFIED_NAME: &str = "qualifiedName";

/// Extractor key for the short symbol name.
const SYMBOL: &str = "symbol";
/// Extractor key for the qualified name (or path, for files and folders).
const NAME: &str = "name";

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));

/// Rename `symbol` → `simpleName` and `name` → `qualifiedName`, and stamp the
/// provenance marker.
pub fn rename_properties(props: &Properties) -> Properties {
    let mut renamed = props.clone();
    if let Some(symbol) = renamed.remove(SYMBOL) {
        renamed.insert(SIMPLE_NAME.to_string(), symbol);
    }
    if let Some(name) = renamed.remove(NAME) {
        renamed.insert(QUALIFIED_NAME.to_string(), name);
    }
    renamed.insert(META_SRC_KEY.to_string(), META_SRC.into());
    renamed
}

/// Combine two property maps where `primary` wins on key collisions and
/// `fallback` fills the gaps, then rename as [`rename_properties`] does.
pub fn merge_properties(primary: &Properties, fallback: &Properties) -> Properties {
    let mut merged = fallback.clone();
    merged.extend(primary.iter().map(|(k, v)| (k.clone(), v.clone())));
    rename_properties(&merged)
}

/// Copy keys from `other` that `target` does not have yet.
pub fn fill_missing(target: &mut Properties, other: &Properties) {
    for (key, value) in other {
        target.entry(key.clone()).or_insert_with(|| value.clone());
    }
}

/// Treat `name` as a path: `qualifiedName` is the whole path and
/// `simpleName` its last segment, with `\` normalized to `/`.
///
/// Without a `name`, `symbol` (then `old_id`) supplies both names.
pub fn parse_path_as_name(props: &Properties, old_id: &str) -> Properties {
    let mut parsed = props.clone();
    let path = parsed.remove(NAME);
    let symbol = parsed.remove(SYMBOL);

    let (simple, qualified) = match path {
        Some(path) => {
            let simple = match &path {
                PropertyValue::String(p) => PropertyValue::String(last_path_segment(p).to_string()),
                other => other.clone(),
            };
            (simple, path)
        }
        None => match symbol {
            Some(symbol) if !is_blank(&symbol) => (symbol.clone(), symbol),
            _ => (old_id.into(), old_id.into()),
        },
    };

    parsed.insert(SIMPLE_NAME.to_string(), simple);
    parsed.insert(QUALIFIED_NAME.to_string(), qualified);
    parsed.insert(META_SRC_KEY.to_string(), META_SRC.into());
    parsed
}

/// Last `/`-delimited segment of `path` after normalizing `\` to `/`. A path
/// ending in a separator yields the whole normalized path.
pub fn last_path_segment(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    match normalized.rsplit('/').next() {
        Some(last) if !last.is_empty() => last.to_string(),
        _ => normalized,
    }
}

/// Split camel-case boundaries and lower-case: `HeaderFile` → `header file`.
pub fn humanize_label(label: &str) -> String {
    CAMEL_BOUNDARY.replace_all(label, "${1} ${2}").to_lowercase()
}

fn is_blank(value: &PropertyValue) -> bool {
    matches!(value, PropertyValue::Null) || value.as_str().is_some_and(str::is_empty)
}

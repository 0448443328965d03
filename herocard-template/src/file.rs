//! Template files on disk.

use anyhow::Context;
use chrono::Utc;
use herocard_core::{DisplaySettings, HeroData};
use std::fs;
use std::path::Path;

use crate::codec::{decode_with_report, Template, UNTITLED_HERO};
use crate::repair::Repair;

/// Suffix appended to every exported template file name.
pub const TEMPLATE_FILE_EXT: &str = "-template.json";

/// Lowercase, collapse every run of non-alphanumerics into one hyphen, trim hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// `<slug>-template.json` for a hero name.
pub fn template_file_name(hero_name: &str) -> String {
    let mut slug = slugify(hero_name);
    if slug.is_empty() {
        slug = slugify(UNTITLED_HERO);
    }
    format!("{}{}", slug, TEMPLATE_FILE_EXT)
}

/// Save the live state as a template file stamped with the current time.
pub fn save_template(
    path: impl AsRef<Path>,
    hero: &HeroData,
    display: &DisplaySettings,
) -> anyhow::Result<()> {
    write_template(path, &Template::from_state(hero, display, Utc::now()))
}

/// Write a template as pretty JSON, creating parent directories as needed.
pub fn write_template(path: impl AsRef<Path>, template: &Template) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir: {}", parent.display()))?;
        }
    }

    let json = template.to_json().context("serialize template to json")?;
    fs::write(path, json).with_context(|| format!("write template file: {}", path.display()))?;
    tracing::info!(path = %path.display(), name = %template.name, "template saved");
    Ok(())
}

/// Load and repair a template file. A `FormatError` stays reachable via `downcast_ref`.
pub fn load_template(path: impl AsRef<Path>) -> anyhow::Result<Template> {
    load_template_with_report(path).map(|(template, _)| template)
}

/// Same as `load_template`, also returning every repair that was applied.
pub fn load_template_with_report(
    path: impl AsRef<Path>,
) -> anyhow::Result<(Template, Vec<Repair>)> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read template file: {}", path.display()))?;
    let loaded = decode_with_report(&data)
        .with_context(|| format!("decode template file: {}", path.display()))?;
    tracing::info!(path = %path.display(), repairs = loaded.1.len(), "template loaded");
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Storm"), "storm");
        assert_eq!(slugify("  Doctor   Strange!! "), "doctor-strange");
        assert_eq!(slugify("Cloak & Dagger"), "cloak-dagger");
        assert_eq!(slugify("--Jeff the Land-Shark--"), "jeff-the-land-shark");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_template_file_name() {
        assert_eq!(template_file_name("Star-Lord"), "star-lord-template.json");
        assert_eq!(template_file_name("Peni Parker 2"), "peni-parker-2-template.json");
        assert_eq!(template_file_name(""), "untitled-hero-template.json");
        assert_eq!(template_file_name("???"), "untitled-hero-template.json");
    }
}

//! herocard-template: portable JSON templates for hero pages.
//!
//! Design rules:
//! - Export writes a versioned envelope with the full hero and an allow-listed slice of display settings.
//! - Import never panics and never rejects a file it can repair.
//! - Only four defects are fatal: bad JSON, non-object root, no `heroData`, no `heroData.name`.
//! - Well-typed values pass through untouched, even when they look odd (difficulty 99 stays 99).

pub mod codec;
pub mod file;
pub mod repair;

pub use codec::{
    decode, decode_with_report, encode, encode_at, FormatError, Template, TemplateDisplaySettings,
    TEMPLATE_VERSION, UNTITLED_HERO,
};
pub use file::{
    load_template, load_template_with_report, save_template, slugify, template_file_name,
    write_template, TEMPLATE_FILE_EXT,
};
pub use repair::{Repair, RepairKind};

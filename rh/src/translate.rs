//! Translating producer summaries into card facts
//!
//! Deterministic mapping from one upstream summary to a sequence of fact
//! rows on a [`MessageCard`], under a caller-selected projection. Returns
//! the display name extracted from the summary so callers can build the
//! card headline.

use msgcard::MessageCard;
use tracing::debug;

use crate::error::NotifyError;
use crate::summary::{ImportResult, StagingResult};

/// Rendered in place of a missing icon path at full verbosity
const NO_ICON_PLACEHOLDER: &str = "no icon path given";

/// How a summary projects into fact rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationMode {
    /// One fact per attribute, gated by verbosity (0 brief - 3 all details).
    /// Each level emits a strict superset of the level below.
    Detailed { verbosity: u8 },
    /// One dense line per summary, keyed by the item name; verbosity does
    /// not apply
    Compact,
}

/// Append facts for a package import result. Fails only on a missing name.
pub fn apply_import(
    card: &mut MessageCard,
    summary: &ImportResult,
    mode: TranslationMode,
) -> Result<String, NotifyError> {
    if summary.name.is_empty() {
        return Err(NotifyError::MalformedSummary { origin: "import" });
    }

    debug!(
        name = %summary.name,
        version = %summary.version,
        catalogs = ?summary.catalogs,
        pkginfo_path = %summary.pkginfo_path,
        pkg_path = %summary.pkg_path,
        icon_path = ?summary.icon_path,
        "import summary"
    );

    match mode {
        TranslationMode::Detailed { verbosity } => {
            if verbosity >= 3 {
                card.add_fact("Name", &summary.name);
            }
            card.add_fact("new Version", &summary.version);
            if verbosity >= 1 {
                card.add_fact("in Catalogs", summary.catalogs.join(", "));
            }
            if verbosity >= 2 {
                card.add_fact("PkgInfo Path", &summary.pkginfo_path);
                card.add_fact("Package Path", &summary.pkg_path);
            }
            if verbosity >= 3 {
                card.add_fact(
                    "Icon Path",
                    summary.icon_path.as_deref().unwrap_or(NO_ICON_PLACEHOLDER),
                );
            }
        }
        TranslationMode::Compact => {
            card.add_fact(
                &summary.name,
                format!(
                    "imported ver. {} -> {}",
                    summary.version,
                    summary.catalogs.join(", ")
                ),
            );
        }
    }

    Ok(summary.name.clone())
}

/// Append facts for a catalog staging result. Fails only on a missing name.
pub fn apply_staging(
    card: &mut MessageCard,
    summary: &StagingResult,
    mode: TranslationMode,
) -> Result<String, NotifyError> {
    if summary.name.is_empty() {
        return Err(NotifyError::MalformedSummary { origin: "staging" });
    }

    debug!(
        name = %summary.name,
        versions = ?summary.versions,
        staging_catalog = %summary.staging_catalog,
        production_catalog = %summary.production_catalog,
        "staging summary"
    );

    match mode {
        TranslationMode::Detailed { verbosity } => {
            if verbosity >= 3 {
                card.add_fact("Name", &summary.name);
            }
            card.add_fact("autostaged Versions", summary.versions.join(", "));
            if verbosity >= 1 {
                card.add_fact("from Staging Catalog", &summary.staging_catalog);
                card.add_fact("to Production Catalogs", &summary.production_catalog);
            }
        }
        TranslationMode::Compact => {
            card.add_fact(
                &summary.name,
                format!(
                    "staged ver. {} {} -> {}",
                    summary.versions.join(", "),
                    summary.staging_catalog,
                    summary.production_catalog
                ),
            );
        }
    }

    Ok(summary.name.clone())
}

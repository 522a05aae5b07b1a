use log::{error, info, warn};
use std::fs;
use std::path::Path;

use crate::base_path::RENDER_SCRIPT;
use crate::config::{SiteConfig, DEFAULT_CONFIG_FILE};
use crate::error::BuildError;
use crate::loader::Resource;
use crate::sections::LISTING_PAGE;

/// Page templates the build rewrites in place. Missing ones abort.
const CRITICAL_TEMPLATES: &[&str] = &["index.html", LISTING_PAGE];

/// Static assets the pages load at runtime.
const STATIC_ASSETS: &[&str] = &[RENDER_SCRIPT, "assets/css/style.css"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    pub warnings: u32,
    pub errors: u32,
}

/// Run all boot checks against the site root. Call this before building.
/// Warns about missing optional files and fails if the build could not
/// produce a complete site.
pub fn check(root: &Path, config: &SiteConfig) -> Result<BootReport, BuildError> {
    info!("Vitae boot check starting...");

    let mut report = BootReport::default();

    // ── 1. Data ────────────────────────────────────────
    match &config.data_url {
        Some(url) => info!("  Data served from {}", url),
        None => {
            let data_dir = root.join(&config.data_dir);
            if !data_dir.is_dir() {
                error!("  MISSING data directory: {}", data_dir.display());
                report.errors += 1;
            } else {
                for resource in Resource::ALL {
                    let file = data_dir.join(resource.file_name());
                    if !file.is_file() {
                        error!("  MISSING data file: {}", file.display());
                        report.errors += 1;
                    }
                }
            }
        }
    }

    // ── 2. Page templates ──────────────────────────────
    for file in CRITICAL_TEMPLATES {
        if !root.join(file).is_file() {
            error!("  MISSING page template: {}", file);
            report.errors += 1;
        }
    }

    // ── 3. Static assets ───────────────────────────────
    for file in STATIC_ASSETS {
        if !root.join(file).exists() {
            warn!("  Missing static asset: {} (pages will not render client-side)", file);
            report.warnings += 1;
        }
    }

    // ── 4. Site root writable ──────────────────────────
    if root.is_dir() {
        let test_file = root.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                error!("  Site root not writable: {}", e);
                report.errors += 1;
            }
        }
    } else {
        error!("  Site root does not exist: {}", root.display());
        report.errors += 1;
    }

    // ── 5. Config file ─────────────────────────────────
    if !root.join(DEFAULT_CONFIG_FILE).exists() {
        warn!("  {} not found, using default config", DEFAULT_CONFIG_FILE);
        report.warnings += 1;
    }

    // ── Summary ────────────────────────────────────────
    if report.errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        return Err(BuildError::Boot(report.errors));
    }

    if report.warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some pages may not render correctly.",
            report.warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
    Ok(report)
}

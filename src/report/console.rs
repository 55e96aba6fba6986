use crate::migrate::compare::VariantDisagreement;
use crate::report::report_model::MigrationReport;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a migration report for terminal output.
///
/// Produces output like:
/// ```text
/// === Dropdown Migration (consolidated -> file:out.json) ===
///
/// Rows: 120 read, 96 eligible
/// Dropdowns: 14 (12 inserted, 1 updated, 1 failed)
///
/// ✗ FAIL  mortgage_step2_bank: store rejected ... with status 500
///
/// Low-confidence mappings (1):
///     [FALLBACK] credit_step3: xyz123??? -> xyz123___
///
/// === Results: 13 migrated, 1 failed in 0.2s ===
/// ```
pub fn format_console_report(report: &MigrationReport) -> String {
    let mut out = String::new();

    let mode = if report.dry_run { " [dry run]" } else { "" };
    out.push_str(&format!(
        "=== Dropdown Migration ({} -> {}){} ===\n\n",
        report.variant, report.store, mode
    ));

    out.push_str(&format!(
        "Rows: {} read, {} eligible\n",
        report.total_rows, report.eligible_rows
    ));
    out.push_str(&format!(
        "Dropdowns: {} ({} inserted, {} updated, {} failed)\n",
        report.dropdowns,
        report.inserted,
        report.updated,
        report.failed.len()
    ));

    let d = &report.diagnostics;
    if d.blank_values > 0 || d.unsupported_languages > 0 || d.ignored_components > 0 {
        out.push_str(&format!(
            "Skipped: {} blank values, {} unsupported-language rows, {} non-dropdown rows\n",
            d.blank_values, d.unsupported_languages, d.ignored_components
        ));
    }

    if !report.failed.is_empty() {
        out.push('\n');
        for failure in &report.failed {
            out.push_str(&format!(
                "\u{2717} FAIL  {}: {}\n",
                failure.dropdown_key, failure.error
            ));
        }
    }

    if !d.fallback_mappings.is_empty() {
        out.push_str(&format!(
            "\nLow-confidence mappings ({}):\n",
            d.fallback_mappings.len()
        ));
        for m in &d.fallback_mappings {
            out.push_str(&format!(
                "    [FALLBACK] {}: {} -> {}\n",
                m.screen_location, m.content_key, m.field_name
            ));
        }
    }

    if !d.best_effort_slots.is_empty() {
        out.push_str(&format!(
            "\nBest-effort option slots ({}):\n",
            d.best_effort_slots.len()
        ));
        for s in &d.best_effort_slots {
            out.push_str(&format!(
                "    [SLOT] {}: {} -> {}\n",
                s.dropdown_key, s.content_key, s.slot
            ));
        }
    }

    if !d.conflicts.is_empty() {
        out.push_str(&format!("\nConflicting values ({}):\n", d.conflicts.len()));
        for c in &d.conflicts {
            out.push_str(&format!(
                "    [CONFLICT] {} {} [{}]: \"{}\" replaced by \"{}\" ({})\n",
                c.dropdown_key, c.cell, c.language, c.previous, c.replacement, c.content_key
            ));
        }
    }

    // Summary line
    out.push_str(&format!(
        "\n=== Results: {} migrated, {} failed",
        report.inserted + report.updated,
        report.failed.len()
    ));

    if let Some(ms) = report.duration_ms {
        let secs = ms as f64 / 1000.0;
        out.push_str(&format!(" in {:.1}s", secs));
    }

    out.push_str(" ===\n");

    out
}

/// Format the pattern-variant comparison as a review list.
pub fn format_variant_report(disagreements: &[VariantDisagreement]) -> String {
    let mut out = String::new();

    out.push_str("=== Pattern Variant Comparison (consolidated vs railway) ===\n\n");

    if disagreements.is_empty() {
        out.push_str("Both variants resolve every key identically.\n");
        return out;
    }

    for d in disagreements {
        out.push_str(&format!(
            "{} {} ({})\n    consolidated: {} [{}]\n    railway:      {} [{}]\n",
            d.screen_location,
            d.content_key,
            d.component_type,
            d.consolidated.field_name,
            d.consolidated.pattern,
            d.railway.field_name,
            d.railway.pattern,
        ));
    }

    out.push_str(&format!(
        "\n=== {} key(s) resolve differently; review before trusting either variant ===\n",
        disagreements.len()
    ));

    out
}

//! Console output utilities
//!
//! Plain text renderings of the derived tables. Rates are shown as percentages
//! rounded to one decimal place.

use std::fmt;

use crate::models::MetricsReport;

/// Format a ratio as a percentage label, e.g. `0.1234` -> `12.3%`
#[must_use]
pub fn format_percentage(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Headline summary of a report, rendered through `Display`
pub struct SummaryTable<'a>(pub &'a MetricsReport);

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let summary = &report.summary;
        writeln!(f, "Hospital Stay Summary:")?;
        writeln!(f, "  Stays: {}", summary.stays)?;
        writeln!(f, "  Patients: {}", summary.patients)?;
        writeln!(f, "  Wards: {}", summary.wards)?;
        writeln!(
            f,
            "  Period: {} to {}",
            summary.first_admission, summary.last_discharge
        )?;
        writeln!(
            f,
            "  Mean Length of Stay: {:.1} days",
            summary.mean_length_of_stay
        )?;
        writeln!(
            f,
            "  Readmitted Stays ({}-day window): {}",
            summary.readmission_window_days, summary.readmitted_stays
        )?;
        if let Some(peak) = report.peak_census() {
            writeln!(
                f,
                "  Peak Census: {} beds on {}",
                peak.occupied_beds, peak.date
            )?;
        }
        Ok(())
    }
}

/// Per-ward tables of a report, rendered through `Display`
pub struct WardTables<'a>(pub &'a MetricsReport);

impl fmt::Display for WardTables<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let width = report
            .ward_volume
            .iter()
            .map(|w| w.ward.len())
            .max()
            .unwrap_or(4)
            .max(4);

        writeln!(f, "\nAverage Length of Stay by Ward:")?;
        for row in &report.ward_averages {
            writeln!(
                f,
                "  {:<width$}  {:>6.1} days  ({} stays)",
                row.ward, row.average_days, row.stays
            )?;
        }

        writeln!(f, "\nBed Occupancy Rate by Ward:")?;
        for row in &report.bed_occupancy {
            writeln!(
                f,
                "  {:<width$}  {:>7}  ({} bed days)",
                row.ward,
                format_percentage(row.occupancy_rate),
                row.bed_days_used
            )?;
        }

        writeln!(f, "\nReadmission Rate by Ward:")?;
        for row in &report.readmission_rates {
            writeln!(
                f,
                "  {:<width$}  {:>7}  ({}/{})",
                row.ward,
                format_percentage(row.readmission_rate),
                row.readmissions,
                row.total_discharges
            )?;
        }

        writeln!(f, "\nWard-Level Congestion:")?;
        for row in &report.ward_volume {
            writeln!(f, "  {:<width$}  {:>6} stays", row.ward, row.stays)?;
        }

        writeln!(f, "\nDay-wise Admissions:")?;
        for row in &report.weekday_admissions {
            writeln!(f, "  {:<3}  {:>6}", row.weekday.to_string(), row.admissions)?;
        }
        Ok(())
    }
}

/// Render the headline summary of a report
#[must_use]
pub fn format_summary(report: &MetricsReport) -> String {
    SummaryTable(report).to_string()
}

/// Render the per-ward tables of a report
#[must_use]
pub fn format_ward_tables(report: &MetricsReport) -> String {
    WardTables(report).to_string()
}

/// Print a full text report to stdout
pub fn print_report(report: &MetricsReport) {
    print!("{}{}", SummaryTable(report), WardTables(report));
}

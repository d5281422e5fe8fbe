//! Appointment export formatting.
//!
//! Turns appointment records into delimiter-separated text: standard CSV,
//! or tab-separated values with CRLF line endings, which Excel opens
//! without an import wizard. Formatting only - records are assumed valid.

use std::str::FromStr;

use rdv_types::{AppError, Appointment};

/// Column headers, in output order.
const HEADER: [&str; 6] = ["Date", "Client", "Email", "Service", "Provider", "Status"];

/// Export formatting errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("Formatting error: {0}")]
    Format(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Format(err.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnknownFormat(_) => AppError::BadRequest(err.to_string()),
            ExportError::Format(msg) => AppError::Internal(msg),
        }
    }
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    /// MIME type for the HTTP response.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Excel => "text/tab-separated-values; charset=utf-8",
        }
    }

    /// Suggested download file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "appointments.csv",
            ExportFormat::Excel => "appointments.tsv",
        }
    }

    /// Cache key for formatted output of this format.
    pub fn cache_key(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "export_csv",
            ExportFormat::Excel => "export_excel",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "tsv" | "xls" => Ok(ExportFormat::Excel),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Formats appointments as comma-separated values with a header row.
pub fn to_csv(appointments: &[Appointment]) -> Result<String, ExportError> {
    write_with(csv::WriterBuilder::new(), appointments)
}

/// Formats appointments as Excel-compatible TSV (tabs, CRLF).
pub fn to_excel_tsv(appointments: &[Appointment]) -> Result<String, ExportError> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(b'\t')
        .terminator(csv::Terminator::CRLF);
    write_with(builder, appointments)
}

fn write_with(
    builder: csv::WriterBuilder,
    appointments: &[Appointment],
) -> Result<String, ExportError> {
    let mut writer = builder.from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for appointment in appointments {
        writer.write_record(row(appointment))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Format(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Format(e.to_string()))
}

fn row(a: &Appointment) -> [String; 6] {
    [
        a.starts_at.format("%Y-%m-%d %H:%M").to_string(),
        a.client_name.clone(),
        a.client_email.clone(),
        a.service.clone(),
        a.provider.clone(),
        a.status.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rdv_types::AppointmentStatus;

    fn appointment(client: &str, email: &str) -> Appointment {
        Appointment::new(
            Utc.with_ymd_and_hms(2025, 6, 10, 14, 30, 0).unwrap(),
            client.into(),
            email.into(),
            "Consultation".into(),
            "Dr Ndiaye".into(),
            AppointmentStatus::Confirmed,
        )
        .unwrap()
    }

    #[test]
    fn test_csv_header_and_rows() {
        let rows = vec![appointment("Awa Diop", "awa@example.com")];
        let csv = to_csv(&rows).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Date,Client,Email,Service,Provider,Status"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2025-06-10 14:30,Awa Diop,awa@example.com,Consultation,Dr Ndiaye,confirmed"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_quotes_fields_with_delimiters() {
        let rows = vec![appointment("Diop, Awa", "awa@example.com")];
        let csv = to_csv(&rows).unwrap();
        assert!(csv.contains("\"Diop, Awa\""));
    }

    #[test]
    fn test_empty_export_is_just_the_header() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "Date,Client,Email,Service,Provider,Status");
    }

    #[test]
    fn test_tsv_uses_tabs_and_crlf() {
        let rows = vec![appointment("Awa Diop", "awa@example.com")];
        let tsv = to_excel_tsv(&rows).unwrap();

        assert!(tsv.starts_with("Date\tClient\tEmail\tService\tProvider\tStatus\r\n"));
        assert!(tsv.contains("Awa Diop\tawa@example.com"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("Excel".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
    }
}

use std::io::{self, Write};

use finx_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_envelope(&mut out, envelope, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn write_envelope(
    out: &mut impl Write,
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Ndjson => write_ndjson(out, envelope)?,
        OutputFormat::Table => write_table(out, envelope)?,
    }
    Ok(())
}

fn write_ndjson(out: &mut impl Write, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "{}", serde_json::to_string(&envelope.meta)?)?;
    match &envelope.data {
        Value::Array(records) => {
            for record in records {
                writeln!(out, "{}", serde_json::to_string(record)?)?;
            }
        }
        other => writeln!(out, "{}", serde_json::to_string(other)?)?,
    }
    Ok(())
}

fn write_table(out: &mut impl Write, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    writeln!(out, "component   : {}", envelope.meta.component)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    writeln!(out, "data:")?;
    let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
    for line in pretty_data.lines() {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use finx_core::EnvelopeMeta;
    use serde_json::json;

    use super::*;

    fn envelope(data: Value) -> Envelope<Value> {
        let mut meta = EnvelopeMeta::new("request-0001", "v1.0.0", "dv").expect("meta");
        meta.push_warning("2 of 3 symbols lacked history");
        Envelope::new(meta, data).expect("envelope")
    }

    #[test]
    fn ndjson_writes_one_line_per_record() {
        let mut buffer = Vec::new();
        write_envelope(
            &mut buffer,
            &envelope(json!([{"symbol": "A"}, {"symbol": "B"}])),
            OutputFormat::Ndjson,
            false,
        )
        .expect("render");

        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\"component\":\"dv\""));
        assert_eq!(lines[2], r#"{"symbol":"B"}"#);
    }

    #[test]
    fn table_lists_warnings_and_indents_data() {
        let mut buffer = Vec::new();
        write_envelope(&mut buffer, &envelope(json!({"total": 3})), OutputFormat::Table, false)
            .expect("render");

        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.contains("component   : dv"));
        assert!(text.contains("  - 2 of 3 symbols lacked history"));
        assert!(text.contains("    \"total\": 3"));
    }
}

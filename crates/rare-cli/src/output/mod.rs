use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: &Value) -> anyhow::Result<String> {
    match value {
        Value::Array(items) => Ok(render_rows(items)),
        Value::Object(map) => Ok(render_fields(map)),
        scalar => Ok(table::render_grid(
            &["value"],
            &[vec![value_to_cell(scalar)]],
            options(),
        )),
    }
}

/// One row per array element; columns are the union of object keys in
/// first-seen order.
fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![value_to_cell(item)]).collect();
        return table::render_grid(&["value"], &rows, options());
    }

    let mut headers: Vec<&str> = Vec::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), value_to_cell))
                .collect()
        })
        .collect();

    table::render_grid(&headers, &rows, options())
}

/// Key/value listing for a single object.
fn render_fields(map: &Map<String, Value>) -> String {
    let rows: Vec<Vec<String>> = map
        .iter()
        .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
        .collect();
    table::render_grid(&["field", "value"], &rows, options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{render, table::render_grid, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Summary {
        session: &'static str,
        outcome: &'static str,
        iterations: u32,
    }

    fn summary() -> Summary {
        Summary {
            session: "ses-0000beef",
            outcome: "accepted",
            iterations: 3,
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&summary(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["outcome"], "accepted");
        assert_eq!(parsed["iterations"], 3);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&summary(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["session"], "ses-0000beef");
    }

    #[test]
    fn table_render_for_object_lists_fields() {
        let out = render(&summary(), OutputFormat::Table).expect("table render should work");
        let first = out.lines().next().unwrap_or_default();
        assert!(first.contains("field"));
        assert!(out.contains("outcome"));
        assert!(out.contains("accepted"));
    }

    #[test]
    fn table_render_for_rows_has_one_line_per_item() {
        let out = render(&vec![summary(), summary()], OutputFormat::Table)
            .expect("table render should work");
        assert_eq!(out.lines().count(), 4);
        assert!(out.lines().next().is_some_and(|l| l.contains("iterations")));
    }

    #[test]
    fn string_arrays_render_as_lists() {
        assert_eq!(value_to_cell(&json!(["GBA1", "GLA"])), "GBA1, GLA");
        assert_eq!(value_to_cell(&json!(null)), "-");
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["target", "source", "priority"];
        let rows = vec![
            vec!["GLA".to_string(), "hint".to_string(), "1".to_string()],
            vec!["SMPD1".to_string(), "uniprot".to_string(), "0.5".to_string()],
        ];

        let table = render_grid(
            &headers,
            &rows,
            super::table::TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("target"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2].len(), lines[3].len());
    }
}

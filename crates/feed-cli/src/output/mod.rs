use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Columns shown first, in this order; anything else follows alphabetically.
const LEADING_COLUMNS: &[&str] = &["page", "id", "title", "count", "at"];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Objects become a key/value table of their scalar fields, followed by one
/// table per field that holds a list of records (a page of posts, say).
fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_records(&items, options)),
        Value::Object(map) => Ok(render_object(map, options)),
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options,
        )),
    }
}

fn render_object(map: Map<String, Value>, options: table::TableOptions) -> String {
    let mut summary = Vec::new();
    let mut sections = Vec::new();

    for (key, value) in map {
        match value {
            Value::Array(items) if items.iter().all(Value::is_object) => {
                sections.push(format!("{key}:\n{}", render_records(&items, options)));
            }
            other => summary.push(vec![key, value_to_cell(&other)]),
        }
    }

    let mut blocks = Vec::with_capacity(sections.len() + 1);
    if !summary.is_empty() {
        blocks.push(table::render_entity_table(&["key", "value"], &summary, options));
    }
    blocks.extend(sections);
    blocks.join("\n\n")
}

fn render_records(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let headers = column_order(items.iter().filter_map(Value::as_object));
    if headers.is_empty() {
        return String::from("(no columns)");
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn column_order<'a>(records: impl Iterator<Item = &'a Map<String, Value>>) -> Vec<String> {
    let mut rest = Vec::<String>::new();
    let mut leading = Vec::<&str>::new();

    for map in records {
        for key in map.keys() {
            if let Some(known) = LEADING_COLUMNS.iter().find(|column| **column == key.as_str()) {
                if !leading.contains(known) {
                    leading.push(known);
                }
            } else if !rest.contains(key) {
                rest.push(key.clone());
            }
        }
    }

    leading.sort_by_key(|column| LEADING_COLUMNS.iter().position(|c| c == column));
    rest.sort();

    leading
        .into_iter()
        .map(str::to_string)
        .chain(rest)
        .collect()
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

//! HTML renderings of the export views.
//!
//! Pages are self-contained: the projected records are embedded as JSON at
//! render time and the download buttons build files client-side from that
//! snapshot, so the page never refetches.

use serde_json::Value;

use super::view::{envelope, ExportView};
use crate::types::Document;

const PAGE_STYLE: &str = "body { font-family: sans-serif; margin: 2rem; }
      table { border-collapse: collapse; margin-top: 1rem; }
      th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }
      th { background: #f3f3f3; }";

const DOWNLOAD_SCRIPT: &str = r#"(function () {
        var payload = JSON.parse(document.getElementById("export-data").textContent);
        var rows = payload[document.body.dataset.envelope] || [];
        function save(filename, value) {
          var blob = new Blob([JSON.stringify(value, null, 2)], { type: "application/json" });
          var url = URL.createObjectURL(blob);
          var link = document.createElement("a");
          link.href = url;
          link.download = filename;
          document.body.appendChild(link);
          link.click();
          document.body.removeChild(link);
          URL.revokeObjectURL(url);
        }
        document.getElementById("download-all").addEventListener("click", function () {
          save(this.dataset.filename, payload);
        });
        document.querySelectorAll("button.download-row").forEach(function (button) {
          button.addEventListener("click", function () {
            save(button.dataset.filename, rows[Number(button.dataset.row)]);
          });
        });
      })();"#;

/// Template for one view's table page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage {
    pub view_name: &'static str,
    pub title: &'static str,
    pub envelope_key: &'static str,
    pub columns: &'static [&'static str],
    pub filename_prefix: String,
}

impl TablePage {
    /// File name for the whole view
    pub fn bulk_filename(&self) -> String {
        format!("{}_all.json", self.filename_prefix)
    }

    /// File name for one row. Uses the entry's `id` when it has one, else the
    /// 1-based row position.
    pub fn row_filename(&self, position: usize, row: &Document) -> String {
        match row.get("id") {
            Some(Value::Number(id)) => format!("{}_{}.json", self.filename_prefix, id),
            Some(Value::String(id)) if !id.is_empty() => {
                format!("{}_{}.json", self.filename_prefix, escape_filename(id))
            }
            _ => format!("{}_row{}.json", self.filename_prefix, position),
        }
    }

    /// Render the page for one snapshot of projected records
    pub fn render(&self, rows: &[Document]) -> String {
        let mut html = String::with_capacity(2048 + rows.len() * 256);
        html.push_str("<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\" />\n");
        html.push_str(&format!(
            "    <title>EmoGo Export: {}</title>\n    <style>\n      {}\n    </style>\n  </head>\n",
            escape_html(self.title),
            PAGE_STYLE
        ));
        html.push_str(&format!(
            "  <body data-view=\"{}\" data-envelope=\"{}\">\n    <h1>{}</h1>\n",
            self.view_name,
            self.envelope_key,
            escape_html(self.title)
        ));
        html.push_str(&format!(
            "    <p>{} record(s). <a href=\"/export\">Back to export index</a> | \
             <a href=\"/export/{}\">JSON</a></p>\n",
            rows.len(),
            self.view_name
        ));
        html.push_str(&format!(
            "    <button type=\"button\" id=\"download-all\" data-filename=\"{}\">Download all</button>\n",
            escape_html(&self.bulk_filename())
        ));

        html.push_str("    <table>\n      <thead>\n        <tr><th>#</th>");
        for column in self.columns {
            html.push_str(&format!("<th>{}</th>", escape_html(column)));
        }
        html.push_str("<th></th></tr>\n      </thead>\n      <tbody>\n");

        if rows.is_empty() {
            html.push_str(&format!(
                "        <tr><td colspan=\"{}\">No entries yet.</td></tr>\n",
                self.columns.len() + 2
            ));
        }
        for (index, row) in rows.iter().enumerate() {
            let position = index + 1;
            html.push_str(&format!("        <tr><td>{}</td>", position));
            for column in self.columns {
                let cell = row.get(*column).map(cell_text).unwrap_or_default();
                html.push_str(&format!("<td>{}</td>", escape_html(&cell)));
            }
            html.push_str(&format!(
                "<td><button type=\"button\" class=\"download-row\" data-row=\"{}\" data-filename=\"{}\">Download</button></td></tr>\n",
                index,
                escape_html(&self.row_filename(position, row))
            ));
        }
        html.push_str("      </tbody>\n    </table>\n");

        html.push_str(&format!(
            "    <script type=\"application/json\" id=\"export-data\">{}</script>\n",
            embed_json(&envelope(self.envelope_key, rows))
        ));
        html.push_str(&format!("    <script>\n      {}\n    </script>\n", DOWNLOAD_SCRIPT));
        html.push_str("  </body>\n</html>\n");
        html
    }
}

/// Navigation page linking both renderings of every view
pub fn render_index_page() -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\" />\n    <title>EmoGo Data Export</title>\n  </head>\n  <body>\n    <h1>EmoGo Data Export</h1>\n    <p>Download EmoGo data as JSON or browse it as a table with per-row downloads.</p>\n    <ul>\n",
    );
    for view in ExportView::ALL {
        html.push_str(&format!(
            "      <li>{}: <a href=\"/export/{}\">JSON</a> | <a href=\"/export/{}/html\">Table</a></li>\n",
            escape_html(view.title()),
            view.name(),
            view.name()
        ));
    }
    html.push_str("    </ul>\n  </body>\n</html>\n");
    html
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Escape text for element content and quoted attribute values
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// JSON inside a script element must not contain `</script>` or an HTML
// comment opener; the \u escapes keep the value identical for JSON.parse.
fn embed_json(value: &Value) -> String {
    value
        .to_string()
        .replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

fn escape_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

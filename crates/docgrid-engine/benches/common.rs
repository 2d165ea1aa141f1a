// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_prose_html(paragraphs: usize) -> String {
    let base = "<p>Revenue grew by 12<span>%</span> in the second quarter, \
                driven by <b>strong</b> demand in Europe.</p>";
    format!("<html><body>{}</body></html>", base.repeat(paragraphs))
}

/// A document with `tables` tables of `rows` x `cols` cells, with a spanning
/// header row and the occasional rowspan to exercise the occupancy scan.
#[allow(dead_code)]
pub fn generate_table_html(tables: usize, rows: usize, cols: usize) -> String {
    let mut html = String::from("<html><body>");
    for t in 0..tables {
        html.push_str(&format!("<h2>Table {t}</h2><table>"));
        html.push_str(&format!("<tr><th colspan=\"{cols}\">Header {t}</th></tr>"));
        for r in 0..rows {
            html.push_str("<tr>");
            for c in 0..cols {
                if r % 4 == 0 && c == 0 {
                    html.push_str(&format!("<td rowspan=\"2\">{r}.{c}</td>"));
                } else if r % 4 == 1 && c == 0 {
                    continue;
                } else {
                    html.push_str(&format!("<td>value {r} {c}</td>"));
                }
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
    }
    html.push_str("</body></html>");
    html
}

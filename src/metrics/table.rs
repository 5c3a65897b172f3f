/// Two-row HTML table: one header cell and one value cell per column.
pub fn render_table(columns: &[(&str, String)]) -> String {
    let mut html = String::from(concat!(
        "<table class=\"table table-bordered border-black\">\n",
        "    <tr class=\"table-active\">"
    ));
    for (header, _) in columns {
        html.push_str(&format!("\n        <th>{}</th>", escape(header)));
    }
    html.push_str("\n    </tr>\n    <tr>");
    for (_, value) in columns {
        html.push_str(&format!("\n        <td>{}</td>", escape(value)));
    }
    html.push_str("\n    </tr>\n</table>");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_value_rows() {
        let html = render_table(&[
            ("Latency", "12.00 ms".to_string()),
            ("Real-Time Factor", "0.50".to_string()),
        ]);
        assert_eq!(
            html,
            concat!(
                "<table class=\"table table-bordered border-black\">\n",
                "    <tr class=\"table-active\">\n",
                "        <th>Latency</th>\n",
                "        <th>Real-Time Factor</th>\n",
                "    </tr>\n",
                "    <tr>\n",
                "        <td>12.00 ms</td>\n",
                "        <td>0.50</td>\n",
                "    </tr>\n",
                "</table>"
            )
        );
    }
}

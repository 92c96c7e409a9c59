use diagram_ox::Diagram;
use html_escape::{encode_double_quoted_attribute, encode_text};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Diagram generator</title>
<style>
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }
textarea { width: 100%; }
pre { background: #f4f4f4; padding: 1rem; overflow-x: auto; }
</style>
</head>
<body>
<h1>Diagram generator</h1>
"#;

const TAIL: &str = "</body>\n</html>\n";

/// The single page of the app: the form, plus the result when there is one.
pub(crate) fn render(diagram: Option<&Diagram>) -> String {
    let input = diagram.map_or("", |d| d.description.as_str());
    let mut html = String::from(HEAD);
    html.push_str(r#"<form method="post" action="/">"#);
    html.push_str("\n<label for=\"input\">Describe your diagram</label>\n");
    html.push_str(r#"<textarea id="input" name="input" rows="6">"#);
    html.push_str(&encode_text(input));
    html.push_str("</textarea>\n<button type=\"submit\">Generate</button>\n</form>\n");

    if let Some(diagram) = diagram {
        html.push_str("<h2>Diagram</h2>\n");
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"Generated diagram\">\n",
            encode_double_quoted_attribute(diagram.reference())
        ));
        html.push_str("<h2>PlantUML</h2>\n<pre><code>");
        html.push_str(&encode_text(&diagram.markup));
        html.push_str("</code></pre>\n");
    }

    html.push_str(TAIL);
    html
}

use pkggraph::GraphData;

const TEMPLATE: &str = include_str!("../templates/cytoscape.html");
const PLACEHOLDER: &str = "<!--GRAPH_DATA_PLACEHOLDER-->";

/// Render Cytoscape graph data into the bundled HTML template.
pub fn render_cytoscape_html(graph_data: &GraphData) -> Result<String, serde_json::Error> {
    // `</` would let a package name close the surrounding <script> element.
    let graph_json = serde_json::to_string(graph_data)?.replace("</", "<\\/");
    let html = TEMPLATE.replace(PLACEHOLDER, &graph_json);

    Ok(html)
}

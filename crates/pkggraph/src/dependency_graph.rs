use crate::{GraphConfig, GraphData, GraphEdge, GraphNode};
use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Identifier trait for nodes stored in the dependency graph.
/// Implementations provide the slash-separated path used for ordering; the
/// label defaults to that path, with `.` standing in for the root.
pub trait GraphId: Eq + std::hash::Hash + Clone {
    fn to_path(&self) -> String;

    fn label(&self) -> String {
        let path = self.to_path();
        if path.is_empty() { ".".to_string() } else { path }
    }
}

fn sanitize_mermaid_id(path: &str) -> String {
    if path.is_empty() {
        return "pkg".to_string();
    }
    let body: String = path
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("pkg_{body}")
}

fn escape_dot(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

struct DotNodeSpec {
    name: String,
    attrs: &'static str,
}

impl DotNodeSpec {
    fn render(&self) -> String {
        let attrs = if self.attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", self.attrs)
        };
        format!("    \"{}\"{attrs};\n", escape_dot(&self.name))
    }
}

#[derive(Clone, Copy)]
enum MermaidShape {
    Package,
    ImportOnly,
}

struct MermaidNodeSpec {
    id: String,
    label: String,
    shape: MermaidShape,
}

impl MermaidNodeSpec {
    fn render_definition(&self, highlighted: bool) -> String {
        let label = self.label.replace('"', "#quot;");
        let base = match self.shape {
            MermaidShape::Package => format!("    {}(\"{label}\")\n", self.id),
            MermaidShape::ImportOnly => format!("    {}[\"{label}\"]\n", self.id),
        };

        if highlighted {
            format!("{base}    class {} highlighted\n", self.id)
        } else {
            base
        }
    }
}

/// Directed package graph backed by `petgraph`.
///
/// Parallel edges are kept as added; renderers collapse them into one edge
/// carrying the number of declarations behind it.
pub struct DependencyGraph<T: GraphId> {
    graph: DiGraph<T, ()>,
    node_indices: HashMap<T, NodeIndex>,
    highlighted: HashSet<T>,
    import_only: HashSet<T>,
}

impl<T: GraphId> DependencyGraph<T> {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            highlighted: HashSet::new(),
            import_only: HashSet::new(),
        }
    }

    pub fn mark_highlighted(&mut self, node: &T) {
        self.highlighted.insert(node.clone());
    }

    pub fn is_highlighted(&self, node: &T) -> bool {
        self.highlighted.contains(node)
    }

    /// Mark a node that is imported but owns no scanned source file.
    pub fn mark_import_only(&mut self, node: &T) {
        self.import_only.insert(node.clone());
    }

    pub fn is_import_only(&self, node: &T) -> bool {
        self.import_only.contains(node)
    }

    pub fn ensure_node(&mut self, node: T) {
        let _ = self.get_or_create_node(node);
    }

    fn get_or_create_node(&mut self, node: T) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(&node) {
            idx
        } else {
            let idx = self.graph.add_node(node.clone());
            self.node_indices.insert(node, idx);
            idx
        }
    }

    pub fn add_dependency(&mut self, from: T, to: T) {
        let from_idx = self.get_or_create_node(from);
        let to_idx = self.get_or_create_node(to);
        self.graph.add_edge(from_idx, to_idx, ());
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges including parallel ones.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn sorted_nodes(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<_> = self.graph.node_indices().collect();
        nodes.sort_by_key(|idx| self.graph[*idx].to_path());
        nodes
    }

    fn is_orphan(&self, idx: NodeIndex) -> bool {
        let has_incoming = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .count()
            > 0;
        let has_outgoing = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .count()
            > 0;
        !has_incoming && !has_outgoing
    }

    /// Distinct edges with their multiplicity, sorted by source then target path.
    fn collect_edges(&self) -> Vec<(T, T, usize)> {
        let mut counts: HashMap<(NodeIndex, NodeIndex), usize> = HashMap::new();
        for edge in self.graph.edge_indices() {
            if let Some(endpoints) = self.graph.edge_endpoints(edge) {
                *counts.entry(endpoints).or_default() += 1;
            }
        }

        let mut edges: Vec<(T, T, usize)> = counts
            .into_iter()
            .map(|((from, to), count)| (self.graph[from].clone(), self.graph[to].clone(), count))
            .collect();

        edges.sort_by(|a, b| {
            a.0.to_path()
                .cmp(&b.0.to_path())
                .then_with(|| a.1.to_path().cmp(&b.1.to_path()))
        });
        edges
    }

    /// Groups of two or more packages that import each other, directly or
    /// transitively. Self-imports are left out: external test packages
    /// routinely import the package they sit next to.
    pub fn import_cycles(&self) -> Vec<Vec<T>> {
        let mut cycles: Vec<Vec<T>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut members: Vec<T> = component
                    .iter()
                    .map(|idx| self.graph[*idx].clone())
                    .collect();
                members.sort_by_key(GraphId::to_path);
                members
            })
            .collect();

        cycles.sort_by_key(|members| members.first().map(GraphId::to_path));
        cycles
    }

    fn dot_spec_for_node(&self, node: &T) -> DotNodeSpec {
        let attrs = match (self.is_highlighted(node), self.is_import_only(node)) {
            (true, true) => "[fillcolor=red, style=\"filled,dashed\"]",
            (true, false) => "[fillcolor=red, style=filled]",
            (false, true) => "[style=dashed]",
            (false, false) => "",
        };

        DotNodeSpec {
            name: node.label(),
            attrs,
        }
    }

    /// Render the graph as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        let mut output = String::from("digraph packages {\n");
        output.push_str("    rankdir=LR;\n");

        for idx in self.sorted_nodes() {
            output.push_str(&self.dot_spec_for_node(&self.graph[idx]).render());
        }

        for (from, to, count) in self.collect_edges() {
            let attrs = if count > 1 {
                format!(" [label=\"{count}\"]")
            } else {
                String::new()
            };
            output.push_str(&format!(
                "    \"{}\" -> \"{}\"{attrs};\n",
                escape_dot(&from.label()),
                escape_dot(&to.label())
            ));
        }

        output.push_str("}\n");
        output
    }

    /// Mermaid ids for `nodes`, assigned in order. Paths that sanitize to an
    /// id already taken get a numeric suffix so every node keeps its own id.
    fn mermaid_ids(&self, nodes: &[NodeIndex]) -> HashMap<NodeIndex, String> {
        let mut taken: HashSet<String> = HashSet::new();
        let mut ids = HashMap::new();

        for &idx in nodes {
            let base = sanitize_mermaid_id(&self.graph[idx].to_path());
            let mut id = base.clone();
            let mut suffix = 2;
            while taken.contains(&id) {
                id = format!("{base}_{suffix}");
                suffix += 1;
            }
            taken.insert(id.clone());
            ids.insert(idx, id);
        }

        ids
    }

    fn mermaid_spec_for_node(&self, node: &T, id: String) -> MermaidNodeSpec {
        let shape = if self.is_import_only(node) {
            MermaidShape::ImportOnly
        } else {
            MermaidShape::Package
        };

        MermaidNodeSpec {
            id,
            label: node.label(),
            shape,
        }
    }

    /// Render the graph as a Mermaid flowchart.
    pub fn to_mermaid(&self) -> String {
        let mut output = String::from("graph LR\n");
        let nodes = self.sorted_nodes();
        let ids = self.mermaid_ids(&nodes);
        let id_of = |node: &T| {
            self.node_indices
                .get(node)
                .and_then(|idx| ids.get(idx))
                .cloned()
                .unwrap_or_else(|| sanitize_mermaid_id(&node.to_path()))
        };

        for idx in nodes.iter().copied() {
            let node = &self.graph[idx];
            let spec = self.mermaid_spec_for_node(node, id_of(node));
            output.push_str(&spec.render_definition(self.is_highlighted(node)));
        }

        for (from, to, count) in self.collect_edges() {
            let arrow = if count > 1 {
                format!("-->|{count}|")
            } else {
                "-->".to_string()
            };
            output.push_str(&format!(
                "    {} {arrow} {}\n",
                id_of(&from),
                id_of(&to)
            ));
        }

        output.push_str("    classDef highlighted fill:#ffcdd2,stroke:#c62828,stroke-width:2px\n");
        output
    }

    /// Build the serializable payload consumed by the Cytoscape frontend.
    pub fn to_graph_data(&self) -> GraphData {
        let nodes: Vec<GraphNode> = self
            .sorted_nodes()
            .into_iter()
            .map(|idx| {
                let node = &self.graph[idx];
                let node_type = if self.is_import_only(node) {
                    "import_only"
                } else {
                    "package"
                };

                GraphNode {
                    id: node.to_path(),
                    label: node.label(),
                    node_type: node_type.to_string(),
                    is_orphan: self.is_orphan(idx),
                    highlighted: self.is_highlighted(node).then_some(true),
                }
            })
            .collect();

        let edges: Vec<GraphEdge> = self
            .collect_edges()
            .into_iter()
            .map(|(from, to, count)| GraphEdge {
                source: from.to_path(),
                target: to.to_path(),
                count,
            })
            .collect();

        let mut highlighted_packages: Vec<String> =
            self.highlighted.iter().map(GraphId::to_path).collect();
        highlighted_packages.sort();

        GraphData {
            nodes,
            edges,
            config: Some(GraphConfig {
                highlighted_packages,
            }),
        }
    }
}

impl<T: GraphId> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

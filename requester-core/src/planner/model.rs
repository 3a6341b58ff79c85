use std::collections::BTreeMap;

/// Static execution plan for one endpoint, ignoring anything already cached.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Plan {
    pub target: String,
    pub graph: DependencyGraph,
    /// Input names each endpoint in the plan will prompt for.
    pub prompts: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DependencyGraph {
    /// For each endpoint, the producer endpoints it depends on.
    pub depends_on: BTreeMap<String, Vec<String>>,
    /// Producers first; the target endpoint is last.
    pub topo_order: Vec<String>,
}

impl DependencyGraph {
    pub fn to_dot(&self, target: &str) -> String {
        let mut out = String::new();
        out.push_str("digraph requester {\n");
        out.push_str(&format!("  label=\"endpoint: {target}\";\n"));
        out.push_str("  labelloc=t;\n");
        out.push_str("  rankdir=LR;\n");

        for (endpoint, deps) in &self.depends_on {
            if deps.is_empty() {
                out.push_str(&format!("  \"{endpoint}\";\n"));
            } else {
                for dep in deps {
                    out.push_str(&format!("  \"{dep}\" -> \"{endpoint}\";\n"));
                }
            }
        }

        out.push_str("}\n");
        out
    }
}

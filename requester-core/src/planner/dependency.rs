use std::collections::{BTreeMap, VecDeque};

/// Deterministic Kahn ordering: dependencies before dependents, ties broken by name.
pub(crate) fn topo_sort(depends_on: &BTreeMap<String, Vec<String>>) -> Result<Vec<String>, String> {
    let mut indeg: BTreeMap<String, usize> = depends_on.keys().map(|n| (n.clone(), 0)).collect();
    let mut outgoing: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (n, deps) in depends_on {
        for d in deps {
            if !depends_on.contains_key(d) {
                continue;
            }
            if let Some(e) = indeg.get_mut(n) {
                *e += 1;
            }
            outgoing.entry(d.clone()).or_default().push(n.clone());
        }
    }

    for v in outgoing.values_mut() {
        v.sort();
    }

    let mut q: VecDeque<String> = indeg
        .iter()
        .filter(|(_, deg)| **deg == 0)
        .map(|(n, _)| n.clone())
        .collect();

    let mut out = Vec::with_capacity(depends_on.len());
    while let Some(n) = q.pop_front() {
        if let Some(nexts) = outgoing.get(&n) {
            for m in nexts {
                if let Some(e) = indeg.get_mut(m) {
                    *e -= 1;
                    if *e == 0 {
                        q.push_back(m.clone());
                    }
                }
            }
        }
        out.push(n);
    }

    if out.len() != depends_on.len() {
        let stuck: Vec<&str> = depends_on
            .keys()
            .filter(|n| !out.contains(*n))
            .map(String::as_str)
            .collect();
        return Err(format!("cycle between endpoints: {}", stuck.join(", ")));
    }
    Ok(out)
}

mod dependency;
mod model;

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::catalog::EndpointCatalog;
use crate::tokens::{tokens_in, TokenError};
use crate::types::Endpoint;

pub use model::{DependencyGraph, Plan};

/// Tokens an endpoint needs from other endpoints: everything it references minus its own inputs.
pub fn external_tokens(endpoint: &Endpoint) -> Result<BTreeSet<String>, TokenError> {
    let mut tokens = tokens_in(endpoint)?;
    for input in endpoint.input_names() {
        tokens.remove(input);
    }
    Ok(tokens)
}

/// Walk producers transitively from `target` and order them so producers run first.
pub fn plan_endpoint(catalog: &EndpointCatalog, target: &str) -> Result<Plan, PlannerError> {
    let root = catalog
        .get(target)
        .ok_or_else(|| PlannerError::UnknownEndpoint(target.to_string()))?;

    let mut depends_on = BTreeMap::<String, Vec<String>>::new();
    let mut prompts = BTreeMap::<String, Vec<String>>::new();
    let mut queue = VecDeque::from([root]);

    while let Some(ep) = queue.pop_front() {
        if depends_on.contains_key(&ep.name) {
            continue;
        }
        let mut deps = BTreeSet::new();
        for token in external_tokens(ep)? {
            let producer =
                catalog
                    .find_producer(&token)
                    .ok_or_else(|| PlannerError::MissingProducer {
                        endpoint: ep.name.clone(),
                        token: token.clone(),
                    })?;
            deps.insert(producer.name.clone());
            queue.push_back(producer);
        }
        depends_on.insert(ep.name.clone(), deps.into_iter().collect());
        if !ep.inputs.is_empty() {
            prompts.insert(ep.name.clone(), ep.input_names().map(str::to_string).collect());
        }
    }

    let topo_order = dependency::topo_sort(&depends_on).map_err(PlannerError::DependencyGraph)?;

    Ok(Plan {
        target: target.to_string(),
        graph: DependencyGraph {
            depends_on,
            topo_order,
        },
        prompts,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("endpoint for token not found: {token} (needed by {endpoint})")]
    MissingProducer { endpoint: String, token: String },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("unable to build dependency graph: {0}")]
    DependencyGraph(String),
}

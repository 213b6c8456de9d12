//! Configuration hierarchies and dependency-configuration tokens.
//!
//! A configuration's closure is the configuration itself plus every
//! configuration it transitively extends. Closures are pure functions of
//! (module, configuration name) and are memoized per conversion in a
//! [`ClosureCache`].

use std::collections::{BTreeSet, HashMap, HashSet};

use depgraph_core::report::{CallerEdge, Configurations, ReportNode};
use depgraph_util::errors::DepgraphError;
use indexmap::IndexSet;

/// Compute the closure of `name` on `source`.
///
/// Fails with a structural error when `name` (or anything it extends) is not
/// declared, or when the `extends` chain leads back to a configuration that is
/// still being expanded.
pub fn closure<C>(source: &C, name: &str) -> Result<BTreeSet<String>, DepgraphError>
where
    C: Configurations + ?Sized,
{
    let mut closure = BTreeSet::new();
    let mut path = Vec::new();
    expand(source, name, &mut path, &mut closure)?;
    Ok(closure)
}

fn expand<C>(
    source: &C,
    name: &str,
    path: &mut Vec<String>,
    closure: &mut BTreeSet<String>,
) -> Result<(), DepgraphError>
where
    C: Configurations + ?Sized,
{
    if path.iter().any(|p| p == name) {
        return Err(DepgraphError::Structural {
            module: source.describe(),
            configuration: name.to_string(),
            message: format!(
                "configuration '{name}' extends itself through {}",
                path.join(" -> ")
            ),
        });
    }
    let extends = source
        .extends_of(name)
        .ok_or_else(|| unknown_configuration(source, name))?;
    closure.insert(name.to_string());
    path.push(name.to_string());
    for parent in extends {
        // Shared ancestors (X extends Y, Z; Y and Z extend W) are expanded once.
        if !closure.contains(parent) || path.contains(parent) {
            expand(source, parent, path, closure)?;
        }
    }
    path.pop();
    Ok(())
}

fn unknown_configuration<C>(source: &C, name: &str) -> DepgraphError
where
    C: Configurations + ?Sized,
{
    DepgraphError::Structural {
        module: source.describe(),
        configuration: name.to_string(),
        message: format!("unknown configuration '{name}'"),
    }
}

/// Memoized closures, keyed by module and configuration name.
#[derive(Debug, Default)]
pub struct ClosureCache {
    closures: HashMap<(String, String), BTreeSet<String>>,
}

impl ClosureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn closure<C>(&mut self, source: &C, name: &str) -> Result<BTreeSet<String>, DepgraphError>
    where
        C: Configurations + ?Sized,
    {
        let key = (source.describe(), name.to_string());
        if let Some(cached) = self.closures.get(&key) {
            return Ok(cached.clone());
        }
        let computed = closure(source, name)?;
        self.closures.insert(key, computed.clone());
        Ok(computed)
    }

    pub fn len(&self) -> usize {
        self.closures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closures.is_empty()
    }
}

/// Resolve raw dependency-configuration tokens to configuration names on `node`.
///
/// - `*` expands to every public configuration of `node`
/// - `!name` removes `name` from the result
/// - `@` is the caller configuration itself
/// - `#` is the root configuration being converted
/// - `name(fallback)` is `name` if declared, otherwise `fallback`
///
/// Any other token must name a configuration declared on `node`.
pub fn resolve_tokens(
    node: &ReportNode,
    tokens: &[String],
    caller_configuration: &str,
    root_configuration: &str,
) -> Result<IndexSet<String>, DepgraphError> {
    let mut resolved = IndexSet::new();
    let mut excluded = HashSet::new();
    for token in tokens {
        let token = token.trim();
        if let Some(name) = token.strip_prefix('!') {
            excluded.insert(name.to_string());
            continue;
        }
        resolve_token(
            node,
            token,
            caller_configuration,
            root_configuration,
            &mut resolved,
        )?;
    }
    resolved.retain(|c| !excluded.contains(c));
    Ok(resolved)
}

fn resolve_token(
    node: &ReportNode,
    token: &str,
    caller_configuration: &str,
    root_configuration: &str,
    resolved: &mut IndexSet<String>,
) -> Result<(), DepgraphError> {
    let name = match token {
        "*" => {
            resolved.extend(node.public_configurations().map(str::to_string));
            return Ok(());
        }
        "@" => caller_configuration,
        "#" => root_configuration,
        _ => {
            if let Some((name, fallback)) = split_fallback(token) {
                if node.has_configuration(name) {
                    name
                } else {
                    return resolve_token(
                        node,
                        fallback,
                        caller_configuration,
                        root_configuration,
                        resolved,
                    );
                }
            } else {
                token
            }
        }
    };
    if !node.has_configuration(name) {
        return Err(unknown_configuration(node, name));
    }
    resolved.insert(name.to_string());
    Ok(())
}

/// Split `name(fallback)` into its parts.
fn split_fallback(token: &str) -> Option<(&str, &str)> {
    let inner = token.strip_suffix(')')?;
    let (name, fallback) = inner.split_once('(')?;
    Some((name.trim(), fallback.trim()))
}

/// All configurations of `node` an edge pulls in, across every caller configuration.
pub fn dependency_configurations(
    node: &ReportNode,
    edge: &CallerEdge,
    root_configuration: &str,
) -> Result<IndexSet<String>, DepgraphError> {
    let mut all = IndexSet::new();
    for caller_configuration in &edge.caller_configurations {
        all.extend(resolve_tokens(
            node,
            edge.dependency_tokens(caller_configuration),
            caller_configuration,
            root_configuration,
        )?);
    }
    Ok(all)
}

/// The caller configurations through which an edge pulls in `dependency_configuration`.
pub fn caller_configurations_for(
    node: &ReportNode,
    edge: &CallerEdge,
    dependency_configuration: &str,
    root_configuration: &str,
) -> Result<IndexSet<String>, DepgraphError> {
    let mut callers = IndexSet::new();
    for caller_configuration in &edge.caller_configurations {
        let resolved = resolve_tokens(
            node,
            edge.dependency_tokens(caller_configuration),
            caller_configuration,
            root_configuration,
        )?;
        if resolved.contains(dependency_configuration) {
            callers.insert(caller_configuration.clone());
        }
    }
    Ok(callers)
}

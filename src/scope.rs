/// Keep only the scopes namespaced for `resource_server_id`, without the namespace.
///
/// With an empty `resource_server_id` every scope is returned untouched. Otherwise
/// only entries starting with `"<resource_server_id>."` survive, stripped of that
/// prefix, in input order.
pub fn filter_scopes(scopes: &[String], resource_server_id: &str) -> Vec<String> {
    if resource_server_id.is_empty() {
        return scopes.to_vec();
    }

    let prefix = format!("{resource_server_id}.");

    scopes
        .iter()
        .filter_map(|scope| scope.strip_prefix(prefix.as_str()))
        .map(String::from)
        .collect()
}

use gatherly_entities::location::Location;

/// Resolves free-text location queries into places.
pub trait GeoCodingGateway {
    /// `Ok(None)` if nothing matches the query.
    fn resolve_location(&self, query: &str) -> anyhow::Result<Option<Location>>;
}

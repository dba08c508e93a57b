//! Configuration for the address resolver.

/// Defaulting policy applied when an address is created from partial input.
///
/// The shipped defaults match the municipality the registry was seeded for;
/// deployments covering another district override them via
/// [`with_config`](crate::resolve::AddressResolver::with_config).
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Zip code substituted when the input carries none
    pub default_zip: String,
    /// City name substituted when the input carries none
    pub default_city: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_zip: "97451".to_string(),
            default_city: "Culver".to_string(),
        }
    }
}

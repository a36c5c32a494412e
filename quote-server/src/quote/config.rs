//! Quotation configuration.

/// Configuration parameters for quoting and best-price search.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Fixed conversion rate used for every single-currency total.
    pub rub_per_usd: f64,

    /// Maximum number of best-price candidates to return.
    pub max_candidates: usize,
}

impl QuoteConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(rub_per_usd: f64, max_candidates: usize) -> Self {
        Self {
            rub_per_usd,
            max_candidates,
        }
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            rub_per_usd: 95.0,
            max_candidates: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuoteConfig::default();

        assert_eq!(config.rub_per_usd, 95.0);
        assert_eq!(config.max_candidates, 6);
    }

    #[test]
    fn custom_config() {
        let config = QuoteConfig::new(100.0, 3);

        assert_eq!(config.rub_per_usd, 100.0);
        assert_eq!(config.max_candidates, 3);
    }
}

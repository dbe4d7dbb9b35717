//! Claims validation options and configuration.

use chrono::Duration;

/// Claims validation options.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Leeway for time-based claims.
    pub leeway: Duration,
    /// Validate expiry.
    pub validate_exp: bool,
    /// Validate not-before.
    pub validate_nbf: bool,
    /// Validate issued-at.
    pub validate_iat: bool,
    /// Required claims.
    pub required_claims: Vec<String>,
    /// Expected issuer.
    pub expected_issuer: Option<String>,
    /// Accepted audiences; the token must name at least one.
    pub expected_audience: Option<Vec<String>>,
    /// Header parameters this application understands when listed in `crit`.
    pub supported_critical_headers: Vec<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            leeway: Duration::seconds(60),
            validate_exp: true,
            validate_nbf: true,
            validate_iat: true,
            required_claims: vec![],
            expected_issuer: None,
            expected_audience: None,
            supported_critical_headers: vec![],
        }
    }
}

impl ValidationOptions {
    /// Create strict validation options with no leeway.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            leeway: Duration::zero(),
            required_claims: vec!["exp".to_string()],
            ..Self::default()
        }
    }

    /// Set the time leeway for validation.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Set whether to validate expiration.
    #[must_use]
    pub fn validate_expiration(mut self, validate: bool) -> Self {
        self.validate_exp = validate;
        self
    }

    /// Set whether to validate not-before.
    #[must_use]
    pub fn validate_not_before(mut self, validate: bool) -> Self {
        self.validate_nbf = validate;
        self
    }

    /// Set whether to validate issued-at.
    #[must_use]
    pub fn validate_issued_at(mut self, validate: bool) -> Self {
        self.validate_iat = validate;
        self
    }

    /// Add a required claim.
    #[must_use]
    pub fn require_claim(mut self, claim: impl Into<String>) -> Self {
        self.required_claims.push(claim.into());
        self
    }

    /// Set expected issuer.
    #[must_use]
    pub fn expect_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Set expected audience.
    #[must_use]
    pub fn expect_audience(mut self, audience: Vec<String>) -> Self {
        self.expected_audience = Some(audience);
        self
    }

    /// Accept `name` when a token lists it in `crit`.
    #[must_use]
    pub fn support_critical_header(mut self, name: impl Into<String>) -> Self {
        self.supported_critical_headers.push(name.into());
        self
    }
}

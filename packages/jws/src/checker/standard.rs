//! Registered claim and `crit` header validation

use super::{ClaimsChecker, ValidationOptions};
use crate::error::ClaimsError;
use crate::token::Jws;
use chrono::Utc;
use serde_json::{Map, Value};

/// Validates the `crit` header and the registered JWT claims.
///
/// Claims are only inspected when the payload is a JSON object; any other
/// payload passes the claim checks untouched. The `crit` header is always
/// checked and must be protected.
#[derive(Debug, Clone, Default)]
pub struct StandardClaimsChecker {
    options: ValidationOptions,
}

impl StandardClaimsChecker {
    /// Create a checker with `options`.
    #[must_use]
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    #[must_use]
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    fn check_critical_headers(&self, jws: &Jws) -> Result<(), ClaimsError> {
        if jws.unprotected_headers().contains_key("crit") {
            return Err(ClaimsError::CriticalHeader(
                "crit must be in the protected header".to_string(),
            ));
        }
        let Some(crit) = jws.protected_headers().get("crit") else {
            return Ok(());
        };
        let names = match crit {
            Value::Array(names) if !names.is_empty() => names,
            _ => {
                return Err(ClaimsError::CriticalHeader(
                    "crit must be a non-empty array".to_string(),
                ));
            }
        };
        for name in names {
            let Some(name) = name.as_str() else {
                return Err(ClaimsError::CriticalHeader(
                    "crit entries must be strings".to_string(),
                ));
            };
            if !jws.protected_headers().contains_key(name) {
                return Err(ClaimsError::CriticalHeader(format!(
                    "'{name}' is not in the protected header"
                )));
            }
            if !self
                .options
                .supported_critical_headers
                .iter()
                .any(|supported| supported == name)
            {
                return Err(ClaimsError::CriticalHeader(format!(
                    "'{name}' is not supported"
                )));
            }
        }
        Ok(())
    }

    fn check_time_claims(&self, claims: &Map<String, Value>) -> Result<(), ClaimsError> {
        let now = Utc::now().timestamp();
        let leeway = self.options.leeway.num_seconds();

        if self.options.validate_exp
            && let Some(exp) = numeric_date(claims, "exp")?
            && now > exp.saturating_add(leeway)
        {
            return Err(ClaimsError::Expired);
        }

        if self.options.validate_nbf
            && let Some(nbf) = numeric_date(claims, "nbf")?
            && now < nbf.saturating_sub(leeway)
        {
            return Err(ClaimsError::NotYetValid);
        }

        if self.options.validate_iat
            && let Some(iat) = numeric_date(claims, "iat")?
            && now < iat.saturating_sub(leeway)
        {
            return Err(ClaimsError::IssuedInFuture);
        }

        Ok(())
    }

    fn check_issuer(&self, claims: &Map<String, Value>) -> Result<(), ClaimsError> {
        let Some(expected) = &self.options.expected_issuer else {
            return Ok(());
        };
        match claims.get("iss") {
            Some(Value::String(iss)) if iss == expected => Ok(()),
            Some(Value::String(_)) | None => Err(ClaimsError::InvalidIssuer),
            Some(_) => Err(ClaimsError::invalid_claim("iss", "must be a string")),
        }
    }

    fn check_audience(&self, claims: &Map<String, Value>) -> Result<(), ClaimsError> {
        let Some(expected) = &self.options.expected_audience else {
            return Ok(());
        };
        let audiences: Vec<&str> = match claims.get("aud") {
            None => return Err(ClaimsError::InvalidAudience),
            Some(Value::String(aud)) => vec![aud.as_str()],
            Some(Value::Array(items)) => {
                let mut audiences = Vec::with_capacity(items.len());
                for item in items {
                    let Some(aud) = item.as_str() else {
                        return Err(ClaimsError::invalid_claim(
                            "aud",
                            "array items must be strings",
                        ));
                    };
                    audiences.push(aud);
                }
                audiences
            }
            Some(_) => {
                return Err(ClaimsError::invalid_claim(
                    "aud",
                    "must be a string or array of strings",
                ));
            }
        };
        if audiences
            .iter()
            .any(|aud| expected.iter().any(|wanted| wanted == aud))
        {
            Ok(())
        } else {
            Err(ClaimsError::InvalidAudience)
        }
    }
}

impl ClaimsChecker for StandardClaimsChecker {
    fn check(&self, jws: &Jws) -> Result<(), ClaimsError> {
        self.check_critical_headers(jws)?;

        let claims = match serde_json::from_slice::<Value>(jws.payload()) {
            Ok(Value::Object(claims)) => claims,
            _ => return Ok(()),
        };

        for required in &self.options.required_claims {
            if !claims.contains_key(required) {
                return Err(ClaimsError::MissingClaim(required.clone()));
            }
        }

        self.check_time_claims(&claims)?;
        self.check_issuer(&claims)?;
        self.check_audience(&claims)
    }
}

/// Read a NumericDate claim, truncating fractional seconds.
fn numeric_date(claims: &Map<String, Value>, name: &str) -> Result<Option<i64>, ClaimsError> {
    match claims.get(name) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_f64().map(|secs| secs as i64))
            .map(Some)
            .ok_or_else(|| ClaimsError::invalid_claim(name, "must be a number")),
    }
}

//! Declarative field validation.
//!
//! Request types list their [`Constraint`]s; the [`Validator`] looks each rule
//! up by name and reports the first violation as `handler.2`. The validator is
//! immutable once built and shared through application state.

use std::collections::HashMap;

use bank_types::HandlerError;

/// A single rule applied to one field.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Wire name of the field
    pub field: &'static str,
    /// Textual rendering of the decoded value
    pub value: String,
    /// Registered rule name
    pub rule: &'static str,
    /// Rule parameter, e.g. the floor for `min`
    pub param: Option<&'static str>,
}

impl Constraint {
    pub fn new(field: &'static str, value: impl ToString, rule: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            rule,
            param: None,
        }
    }

    pub fn with_param(mut self, param: &'static str) -> Self {
        self.param = Some(param);
        self
    }
}

/// Something that declares constraints over its fields.
pub trait Validate {
    fn constraints(&self) -> Vec<Constraint>;
}

/// A named validation rule.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `InvalidPayload` on a violation, `Unknown` if the rule is misused.
    fn check(&self, constraint: &Constraint) -> Result<(), HandlerError>;
}

/// Rejects empty strings.
pub struct NotEmpty;

impl Rule for NotEmpty {
    fn name(&self) -> &'static str {
        "not_empty"
    }

    fn check(&self, c: &Constraint) -> Result<(), HandlerError> {
        if c.value.is_empty() {
            return Err(HandlerError::invalid_payload(
                format!("field {} cannot be empty", c.field),
                c.field,
            ));
        }
        Ok(())
    }
}

/// Requires a number greater than or equal to the parameter.
pub struct Min;

impl Rule for Min {
    fn name(&self) -> &'static str {
        "min"
    }

    fn check(&self, c: &Constraint) -> Result<(), HandlerError> {
        let floor_text = c
            .param
            .ok_or_else(|| HandlerError::Unknown(format!("rule min on {} needs a floor", c.field)))?;
        let floor: f64 = floor_text.parse().map_err(|_| {
            HandlerError::Unknown(format!("rule min on {} has bad floor {floor_text}", c.field))
        })?;

        match c.value.parse::<f64>() {
            Ok(v) if v >= floor => Ok(()),
            _ => Err(HandlerError::invalid_payload(
                format!("field {} must be greater than or equal to {floor_text}", c.field),
                c.field,
            )),
        }
    }
}

/// Requires a parsable, non-zero number.
pub struct NotZero;

impl Rule for NotZero {
    fn name(&self) -> &'static str {
        "not_zero"
    }

    fn check(&self, c: &Constraint) -> Result<(), HandlerError> {
        match c.value.parse::<f64>() {
            Ok(v) if v.is_finite() && v != 0.0 => Ok(()),
            _ => Err(HandlerError::invalid_payload(
                "this value can't be zero",
                c.field,
            )),
        }
    }
}

/// Registry of rules, built once at startup.
pub struct Validator {
    rules: HashMap<&'static str, Box<dyn Rule>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::empty()
            .with_rule(NotEmpty)
            .with_rule(Min)
            .with_rule(NotZero)
    }
}

impl Validator {
    /// Creates a validator with the standard rules registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with no rules.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.insert(rule.name(), Box::new(rule));
        self
    }

    /// Checks constraints in declaration order, stopping at the first failure.
    pub fn validate<T: Validate>(&self, target: &T) -> Result<(), HandlerError> {
        for constraint in target.constraints() {
            let rule = self.rules.get(constraint.rule).ok_or_else(|| {
                HandlerError::Unknown(format!("unknown validation rule {}", constraint.rule))
            })?;
            rule.check(&constraint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Form(Vec<Constraint>);

    impl Validate for Form {
        fn constraints(&self) -> Vec<Constraint> {
            self.0.clone()
        }
    }

    fn run(constraints: Vec<Constraint>) -> Result<(), HandlerError> {
        Validator::new().validate(&Form(constraints))
    }

    #[test]
    fn test_not_empty() {
        assert!(run(vec![Constraint::new("document_number", "10", "not_empty")]).is_ok());
        assert_eq!(
            run(vec![Constraint::new("document_number", "", "not_empty")]).unwrap_err(),
            HandlerError::invalid_payload("field document_number cannot be empty", "document_number")
        );
    }

    #[test]
    fn test_min() {
        let min = |v: &str| Constraint::new("account_id", v, "min").with_param("0");
        assert!(run(vec![min("0")]).is_ok());
        assert!(run(vec![min("12")]).is_ok());
        assert_eq!(
            run(vec![min("-1")]).unwrap_err(),
            HandlerError::invalid_payload(
                "field account_id must be greater than or equal to 0",
                "account_id"
            )
        );
        assert!(run(vec![min("x")]).is_err());
    }

    #[test]
    fn test_not_zero() {
        let nz = |v: &str| Constraint::new("amount", v, "not_zero");
        assert!(run(vec![nz("-15.45")]).is_ok());
        assert!(run(vec![nz("0.01")]).is_ok());
        for bad in ["0", "0.0", "-0", "", "abc", "NaN"] {
            assert_eq!(
                run(vec![nz(bad)]).unwrap_err(),
                HandlerError::invalid_payload("this value can't be zero", "amount"),
                "value {bad:?}"
            );
        }
    }

    #[test]
    fn test_first_violation_wins() {
        let err = run(vec![
            Constraint::new("account_id", "-1", "min").with_param("0"),
            Constraint::new("amount", "0", "not_zero"),
        ])
        .unwrap_err();

        assert!(matches!(err, HandlerError::InvalidPayload { ref field, .. } if field == "account_id"));
    }

    #[test]
    fn test_unknown_rule_is_internal() {
        let err = run(vec![Constraint::new("amount", "1", "positive")]).unwrap_err();
        assert!(matches!(err, HandlerError::Unknown(_)));
    }

    #[test]
    fn test_min_without_floor_is_internal() {
        let err = run(vec![Constraint::new("account_id", "1", "min")]).unwrap_err();
        assert!(matches!(err, HandlerError::Unknown(_)));
    }

    #[test]
    fn test_custom_rule_registration() {
        struct Digits;
        impl Rule for Digits {
            fn name(&self) -> &'static str {
                "digits"
            }
            fn check(&self, c: &Constraint) -> Result<(), HandlerError> {
                if c.value.chars().all(|ch| ch.is_ascii_digit()) {
                    Ok(())
                } else {
                    Err(HandlerError::invalid_payload("digits only", c.field))
                }
            }
        }

        let validator = Validator::new().with_rule(Digits);
        assert!(validator
            .validate(&Form(vec![Constraint::new("document_number", "123", "digits")]))
            .is_ok());
        assert!(validator
            .validate(&Form(vec![Constraint::new("document_number", "12a", "digits")]))
            .is_err());
    }
}

use thiserror::Error;

/// What exactly went wrong while scanning a formula string
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unknown element symbol '{0}'")]
    UnknownElement(String),
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    #[error("invalid count '{0}' (zero or leading zero)")]
    InvalidCount(String),
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("empty formula")]
    EmptyFormula,
    #[error("empty parenthesized group")]
    EmptyGroup,
    #[error("equation has no reaction arrow ('=', '->', '=>', '→' or '⇌')")]
    MissingArrow,
}

/// Error type for the formula parser. Carries the offending formula,
/// the byte position where scanning stopped and the concrete failure kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse formula '{formula}' at position {position}: {kind}")]
pub struct ParseError {
    pub formula: String,
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(formula: &str, position: usize, kind: ParseErrorKind) -> Self {
        Self {
            formula: formula.to_string(),
            position,
            kind,
        }
    }
}

/// Error types for the balancing pipeline
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BalancerError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("equation contains no species")]
    NoElements,
    #[error("equation cannot be balanced with positive coefficients (null space dimension {nullity})")]
    Unbalanceable { nullity: usize },
    #[error(
        "equation is underdetermined: {degrees_of_freedom} degrees of freedom; fix one coefficient and balance the rest"
    )]
    Ambiguous { degrees_of_freedom: usize },
    #[error("solver step budget of {budget} exceeded")]
    Timeout { budget: usize },
    #[error("balanced coefficient does not fit into u64")]
    CoefficientOverflow,
    #[error("conservation check failed for element '{element}'")]
    ConservationViolated { element: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = ParseError::new("Xx2O", 0, ParseErrorKind::UnknownElement("Xx".to_string()));
        let msg = err.to_string();
        assert!(msg.contains("Xx2O"));
        assert!(msg.contains("position 0"));
        assert!(msg.contains("unknown element symbol 'Xx'"));
    }

    #[test]
    fn test_balancer_error_from_parse_error() {
        let err = ParseError::new("H2O)", 3, ParseErrorKind::UnbalancedParenthesis);
        let balancer_err: BalancerError = err.clone().into();
        assert_eq!(balancer_err, BalancerError::Parse(err));
    }

    #[test]
    fn test_ambiguous_message_suggests_pinning() {
        let err = BalancerError::Ambiguous {
            degrees_of_freedom: 2,
        };
        assert!(err.to_string().contains("fix one coefficient"));
    }
}

//! Module to calculate the atomic composition and molar mass of a chemical formula.
//!
//! The formula parser is strict: element symbols are validated against the
//! built-in periodic table, counts must be positive without leading zeros and
//! parentheses must be balanced. Any violation is reported as a structured
//! [`ParseError`] with the byte position where scanning stopped.

use crate::Balancer::errors::{ParseError, ParseErrorKind};
use nalgebra::DMatrix;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

// Define a struct to hold element data
pub struct Element {
    pub name: &'static str,
    pub atomic_mass: f64,
}

// Define a list of elements and their atomic masses
pub const ELEMENTS: &[Element] = &[
    Element { name: "H", atomic_mass: 1.008 },
    Element { name: "He", atomic_mass: 4.0026 },
    Element { name: "Li", atomic_mass: 6.94 },
    Element { name: "Be", atomic_mass: 9.0122 },
    Element { name: "B", atomic_mass: 10.81 },
    Element { name: "C", atomic_mass: 12.011 },
    Element { name: "N", atomic_mass: 14.007 },
    Element { name: "O", atomic_mass: 15.999 },
    Element { name: "F", atomic_mass: 18.998 },
    Element { name: "Ne", atomic_mass: 20.18 },
    Element { name: "Na", atomic_mass: 22.99 },
    Element { name: "Mg", atomic_mass: 24.305 },
    Element { name: "Al", atomic_mass: 26.98 },
    Element { name: "Si", atomic_mass: 28.085 },
    Element { name: "P", atomic_mass: 30.974 },
    Element { name: "S", atomic_mass: 32.065 },
    Element { name: "Cl", atomic_mass: 35.45 },
    Element { name: "Ar", atomic_mass: 39.948 },
    Element { name: "K", atomic_mass: 39.102 },
    Element { name: "Ca", atomic_mass: 40.08 },
    Element { name: "Sc", atomic_mass: 44.9559 },
    Element { name: "Ti", atomic_mass: 47.867 },
    Element { name: "V", atomic_mass: 50.9415 },
    Element { name: "Cr", atomic_mass: 51.9961 },
    Element { name: "Mn", atomic_mass: 54.938 },
    Element { name: "Fe", atomic_mass: 55.845 },
    Element { name: "Co", atomic_mass: 58.933 },
    Element { name: "Ni", atomic_mass: 58.69 },
    Element { name: "Cu", atomic_mass: 63.546 },
    Element { name: "Zn", atomic_mass: 65.38 },
    Element { name: "Ga", atomic_mass: 69.723 },
    Element { name: "Ge", atomic_mass: 72.64 },
    Element { name: "As", atomic_mass: 74.9216 },
    Element { name: "Se", atomic_mass: 78.96 },
    Element { name: "Br", atomic_mass: 79.904 },
    Element { name: "Kr", atomic_mass: 83.798 },
    Element { name: "Rb", atomic_mass: 85.4678 },
    Element { name: "Sr", atomic_mass: 87.62 },
    Element { name: "Y", atomic_mass: 88.9059 },
    Element { name: "Zr", atomic_mass: 91.224 },
    Element { name: "Nb", atomic_mass: 92.9064 },
    Element { name: "Mo", atomic_mass: 95.94 },
    Element { name: "Tc", atomic_mass: 98.0 },
    Element { name: "Ru", atomic_mass: 101.07 },
    Element { name: "Rh", atomic_mass: 102.9055 },
    Element { name: "Pd", atomic_mass: 106.42 },
    Element { name: "Ag", atomic_mass: 107.8682 },
    Element { name: "Cd", atomic_mass: 112.411 },
    Element { name: "In", atomic_mass: 114.818 },
    Element { name: "Sn", atomic_mass: 118.71 },
    Element { name: "Sb", atomic_mass: 121.76 },
    Element { name: "Te", atomic_mass: 127.6 },
    Element { name: "I", atomic_mass: 126.9045 },
    Element { name: "Xe", atomic_mass: 131.293 },
    Element { name: "Cs", atomic_mass: 132.9055 },
    Element { name: "Ba", atomic_mass: 137.327 },
    Element { name: "La", atomic_mass: 138.9055 },
    Element { name: "Ce", atomic_mass: 140.116 },
    Element { name: "Pr", atomic_mass: 140.9077 },
    Element { name: "Nd", atomic_mass: 144.24 },
    Element { name: "Pm", atomic_mass: 145.0 },
    Element { name: "Sm", atomic_mass: 150.36 },
    Element { name: "Eu", atomic_mass: 151.964 },
    Element { name: "Gd", atomic_mass: 157.25 },
    Element { name: "Tb", atomic_mass: 158.9253 },
    Element { name: "Dy", atomic_mass: 162.5 },
    Element { name: "Ho", atomic_mass: 164.9303 },
    Element { name: "Er", atomic_mass: 167.259 },
    Element { name: "Tm", atomic_mass: 168.9342 },
    Element { name: "Yb", atomic_mass: 173.04 },
    Element { name: "Lu", atomic_mass: 174.967 },
    Element { name: "Hf", atomic_mass: 178.49 },
    Element { name: "Ta", atomic_mass: 180.9479 },
    Element { name: "W", atomic_mass: 183.84 },
    Element { name: "Re", atomic_mass: 186.207 },
    Element { name: "Os", atomic_mass: 190.23 },
    Element { name: "Ir", atomic_mass: 192.217 },
    Element { name: "Pt", atomic_mass: 195.078 },
    Element { name: "Au", atomic_mass: 196.9665 },
    Element { name: "Hg", atomic_mass: 200.59 },
    Element { name: "Tl", atomic_mass: 204.3833 },
    Element { name: "Pb", atomic_mass: 207.2 },
    Element { name: "Bi", atomic_mass: 208.9804 },
    Element { name: "Po", atomic_mass: 209.0 },
    Element { name: "At", atomic_mass: 210.0 },
    Element { name: "Rn", atomic_mass: 222.0 },
    Element { name: "Fr", atomic_mass: 223.0 },
    Element { name: "Ra", atomic_mass: 226.0 },
    Element { name: "Ac", atomic_mass: 227.0 },
    Element { name: "Th", atomic_mass: 232.0381 },
    Element { name: "Pa", atomic_mass: 231.0359 },
    Element { name: "U", atomic_mass: 238.0289 },
    Element { name: "Np", atomic_mass: 237.0 },
    Element { name: "Pu", atomic_mass: 244.0 },
    Element { name: "Am", atomic_mass: 243.0 },
    Element { name: "Cm", atomic_mass: 247.0 },
    Element { name: "Bk", atomic_mass: 247.0 },
    Element { name: "Cf", atomic_mass: 251.0 },
    Element { name: "Es", atomic_mass: 252.0 },
    Element { name: "Fm", atomic_mass: 257.0 },
    Element { name: "Md", atomic_mass: 258.0 },
    Element { name: "No", atomic_mass: 259.0 },
    Element { name: "Lr", atomic_mass: 262.0 },
];

/// Returns the atomic mass of an element symbol, if the symbol is known.
pub fn atomic_mass_of(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|e| e.name == symbol)
        .map(|e| e.atomic_mass)
}

fn is_known_element(symbol: &str) -> bool {
    ELEMENTS.iter().any(|e| e.name == symbol)
}

static PHASE_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?:aq|[gGlLsScC])\)$").unwrap());

/// Thermochemical tables often annotate formulas with a trailing phase mark
/// like "H2O(g)" or "NaCl(s)". The mark carries no compositional information,
/// so it is stripped before parsing.
pub fn filter_phase_marks(formula: &str) -> String {
    PHASE_MARK.replace(formula.trim(), "").to_string()
}

// Scans a digit run at position *i, returns 1 when no digits are present.
// Counts of zero and counts with a leading zero are rejected.
fn scan_count(chars: &[char], i: &mut usize, formula: &str) -> Result<usize, ParseError> {
    if *i >= chars.len() || !chars[*i].is_ascii_digit() {
        return Ok(1);
    }
    let start = *i;
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        *i += 1;
    }
    let digits: String = chars[start..*i].iter().collect();
    if digits.starts_with('0') {
        return Err(ParseError::new(
            formula,
            start,
            ParseErrorKind::InvalidCount(digits),
        ));
    }
    digits.parse::<usize>().map_err(|_| {
        ParseError::new(
            formula,
            start,
            ParseErrorKind::InvalidCount(chars[start..*i].iter().collect()),
        )
    })
}

/// Parses a chemical formula and returns a map of element symbols to their
/// counts. An element token is one uppercase letter optionally followed by one
/// lowercase letter; a digit run after a token (default 1) is its multiplier.
/// Parenthesized groups multiply every count inside by the digit run after the
/// closing parenthesis, with arbitrary nesting. Repeated elements are summed.
///
/// ```
/// use ChemBal::Balancer::molmass::parse_formula;
/// let counts = parse_formula("Ca(OH)2").unwrap();
/// assert_eq!(counts.get("Ca"), Some(&1));
/// assert_eq!(counts.get("O"), Some(&2));
/// assert_eq!(counts.get("H"), Some(&2));
/// ```
pub fn parse_formula(formula: &str) -> Result<HashMap<String, usize>, ParseError> {
    let cleaned = formula.replace(' ', "");
    let chars: Vec<char> = cleaned.chars().collect();
    if chars.is_empty() {
        return Err(ParseError::new(&cleaned, 0, ParseErrorKind::EmptyFormula));
    }

    // One scope per open parenthesis; the bottom scope is the formula itself.
    let mut stack: Vec<HashMap<String, usize>> = vec![HashMap::new()];
    let mut open_positions: Vec<usize> = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '(' {
            stack.push(HashMap::new());
            open_positions.push(i);
            i += 1;
        } else if c == ')' {
            if stack.len() == 1 {
                return Err(ParseError::new(
                    &cleaned,
                    i,
                    ParseErrorKind::UnbalancedParenthesis,
                ));
            }
            let group = stack.pop().unwrap();
            open_positions.pop();
            if group.is_empty() {
                return Err(ParseError::new(&cleaned, i, ParseErrorKind::EmptyGroup));
            }
            i += 1;
            let multiplier = scan_count(&chars, &mut i, &cleaned)?;
            let parent = stack.last_mut().unwrap();
            for (element, count) in group {
                *parent.entry(element).or_insert(0) += count * multiplier;
            }
        } else if c.is_ascii_uppercase() {
            let start = i;
            i += 1;
            let mut symbol = c.to_string();
            if i < chars.len() && chars[i].is_ascii_lowercase() {
                symbol.push(chars[i]);
                i += 1;
            }
            if !is_known_element(&symbol) {
                return Err(ParseError::new(
                    &cleaned,
                    start,
                    ParseErrorKind::UnknownElement(symbol),
                ));
            }
            let count = scan_count(&chars, &mut i, &cleaned)?;
            *stack.last_mut().unwrap().entry(symbol).or_insert(0) += count;
        } else {
            return Err(ParseError::new(
                &cleaned,
                i,
                ParseErrorKind::UnexpectedChar(c),
            ));
        }
    }
    if stack.len() != 1 {
        let position = open_positions.last().copied().unwrap_or(0);
        return Err(ParseError::new(
            &cleaned,
            position,
            ParseErrorKind::UnbalancedParenthesis,
        ));
    }
    Ok(stack.pop().unwrap())
}

/// Calculates the molar mass of a substance given its chemical formula.
/// Returns the molar mass together with the parsed atomic composition.
pub fn calculate_molar_mass(formula: &str) -> Result<(f64, HashMap<String, usize>), ParseError> {
    let counts = parse_formula(formula)?;
    let mut molar_mass = 0.0;
    for (element, count) in counts.iter() {
        for e in ELEMENTS {
            if e.name == element {
                molar_mass += e.atomic_mass * *count as f64;
                break;
            }
        }
    }
    Ok((molar_mass, counts))
}

/// Calculates the molar mass of every formula in a vector.
pub fn calculate_molar_mass_of_vector_of_subs(
    vec_of_formulae: Vec<&str>,
) -> Result<Vec<f64>, ParseError> {
    let mut molar_masses = Vec::new();
    for formula in vec_of_formulae {
        let (molar_mass, _) = calculate_molar_mass(formula)?;
        molar_masses.push(molar_mass);
    }
    Ok(molar_masses)
}

/// Builds the element composition matrix for a vector of formulas:
/// one row per substance, one column per element. The element column order is
/// deterministic first-seen order over the input formulas, returned alongside
/// the matrix.
pub fn create_elem_composition_matrix(
    vec_of_formulae: Vec<&str>,
) -> Result<(DMatrix<f64>, Vec<String>), ParseError> {
    let mut elements: Vec<String> = Vec::new();
    let mut vec_of_compositions = Vec::new();
    for formula in vec_of_formulae.iter() {
        let counts = parse_formula(formula)?;
        let mut seen: Vec<&String> = counts.keys().collect();
        // HashMap iteration order is arbitrary; sort the per-formula keys so
        // first-seen order is stable across runs
        seen.sort();
        for element in seen {
            if !elements.contains(element) {
                elements.push(element.clone());
            }
        }
        vec_of_compositions.push(counts);
    }
    let num_rows = vec_of_compositions.len();
    let num_cols = elements.len();
    let mut matrix = DMatrix::zeros(num_rows, num_cols);
    for (i, composition) in vec_of_compositions.iter().enumerate() {
        for (j, element) in elements.iter().enumerate() {
            if let Some(count) = composition.get(element) {
                matrix[(i, j)] = *count as f64;
            }
        }
    }
    Ok((matrix, elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_formula() {
        let expected_counts = HashMap::from([
            ("C".to_string(), 6),
            ("H".to_string(), 8),
            ("O".to_string(), 6),
        ]);
        assert_eq!(parse_formula("C6H8O6").unwrap(), expected_counts);

        let expected_counts = HashMap::from([
            ("Na".to_string(), 1),
            ("N".to_string(), 2),
            ("O".to_string(), 6),
        ]);
        assert_eq!(parse_formula("Na(NO3)2").unwrap(), expected_counts);

        let expected_counts = HashMap::from([("H".to_string(), 2), ("O".to_string(), 1)]);
        assert_eq!(parse_formula("H2O").unwrap(), expected_counts);

        let expected_counts = HashMap::from([
            ("C".to_string(), 5),
            ("H".to_string(), 7),
            ("O".to_string(), 2),
        ]);
        assert_eq!(parse_formula("C5H6OOH").unwrap(), expected_counts);
    }

    #[test]
    fn test_parse_formula_with_groups() {
        let expected_counts = HashMap::from([
            ("Ca".to_string(), 1),
            ("O".to_string(), 2),
            ("H".to_string(), 2),
        ]);
        assert_eq!(parse_formula("Ca(OH)2").unwrap(), expected_counts);

        // nested groups: K4(ON(SO3)2)2
        let expected_counts = HashMap::from([
            ("K".to_string(), 4),
            ("O".to_string(), 14),
            ("N".to_string(), 2),
            ("S".to_string(), 4),
        ]);
        assert_eq!(parse_formula("K4(ON(SO3)2)2").unwrap(), expected_counts);
    }

    #[test]
    fn test_parse_formula_errors() {
        let err = parse_formula("Ca(OH").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnbalancedParenthesis);
        assert_eq!(err.position, 2);

        let err = parse_formula("CaOH)2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnbalancedParenthesis);
        assert_eq!(err.position, 4);

        let err = parse_formula("XxO2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownElement("Xx".to_string()));
        assert_eq!(err.position, 0);

        let err = parse_formula("H0").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidCount("0".to_string()));

        let err = parse_formula("H02O").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidCount("02".to_string()));

        let err = parse_formula("").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyFormula);

        let err = parse_formula("H2()O").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyGroup);

        let err = parse_formula("h2o").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('h'));
    }

    #[test]
    fn test_filter_phase_marks() {
        assert_eq!(filter_phase_marks("H2O(g)"), "H2O");
        assert_eq!(filter_phase_marks("NaCl(s)"), "NaCl");
        assert_eq!(filter_phase_marks("HCl(aq)"), "HCl");
        // inner groups are not phase marks
        assert_eq!(filter_phase_marks("Ca(OH)2"), "Ca(OH)2");
    }

    #[test]
    fn test_calculate_molar_mass() {
        let (molar_mass, _) = calculate_molar_mass("H2O").unwrap();
        assert_relative_eq!(molar_mass, 18.015, epsilon = 1e-2);

        let (molar_mass, _) = calculate_molar_mass("NaCl").unwrap();
        assert_relative_eq!(molar_mass, 58.44, epsilon = 1e-2);

        let (molar_mass, _) = calculate_molar_mass("C6H8O6").unwrap();
        assert_relative_eq!(molar_mass, 176.12, epsilon = 1e-2);

        let (molar_mass, _) = calculate_molar_mass("Ca(NO3)2").unwrap();
        assert_relative_eq!(molar_mass, 164.09, epsilon = 1e-2);
    }

    #[test]
    fn test_calculate_molar_mass_of_vector_of_substances() {
        let vec_of_formulae = vec!["H2O", "NaCl", "C6H8O6", "Ca(NO3)2"];
        let expected_molar_masses = [18.01528, 58.44316, 176.12, 164.093];

        let calculated = calculate_molar_mass_of_vector_of_subs(vec_of_formulae).unwrap();
        for (i, &expected) in expected_molar_masses.iter().enumerate() {
            assert_relative_eq!(calculated[i], expected, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_element_matrix() {
        let vec_of_formulae = vec!["H2O", "NaCl", "C3H8", "CH4"]; // 5 elements
        let (matrix, elements) = create_elem_composition_matrix(vec_of_formulae).unwrap();
        assert_eq!(matrix.nrows(), 4);
        assert_eq!(matrix.ncols(), 5);
        assert_eq!(elements[0], "H");
        assert_eq!(elements[1], "O");
        let h_col = elements.iter().position(|e| e == "H").unwrap();
        assert_eq!(matrix[(0, h_col)], 2.0);
        assert_eq!(matrix[(3, h_col)], 4.0);
    }
}

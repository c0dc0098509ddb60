//! The module takes a vector of reactant formulas and a vector of product
//! formulas and produces the following data:
//! 1) the parsed atomic composition of every species
//! 2) the vector of elements taking part in the reaction, in deterministic
//!    first-seen order (reactants scanned before products)
//! 3) the stoichiometric matrix: one row per element, one column per species,
//!    reactant entries holding the element count and product entries its
//!    negation, so that a coefficient vector in the right null space satisfies
//!    conservation of atoms for every element.

use crate::Balancer::errors::{BalancerError, ParseError, ParseErrorKind};
use crate::Balancer::molmass::{filter_phase_marks, parse_formula};
use crate::settings::BalancerSettings;
use log::info;
use nalgebra::DMatrix;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A chemical equation: ordered reactant and product species together with
/// their parsed compositions. Species order is insertion order from the input
/// and is preserved in every output of the balancer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChemEquation {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    /// parsed compositions, reactants first, then products
    pub compositions: Vec<HashMap<String, usize>>,
    /// union of all elements, first-seen order
    pub elements: Vec<String>,
}

static REACTION_ARROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"->|=>|→|⇌|=").unwrap());

/// Splits a raw equation string like `"H2 + O2 = H2O"` into reactant and
/// product formula lists. Accepts `=`, `->`, `=>`, `→` and `⇌` as the
/// reaction arrow; species within a side are separated by `+`.
pub fn split_equation_string(input: &str) -> Result<(Vec<String>, Vec<String>), ParseError> {
    let Some(arrow) = REACTION_ARROW.find(input) else {
        return Err(ParseError::new(input, 0, ParseErrorKind::MissingArrow));
    };
    let lhs = &input[..arrow.start()];
    let rhs = &input[arrow.end()..];
    let split_side = |side: &str| -> Vec<String> {
        side.split('+').map(|s| s.trim().to_string()).collect()
    };
    Ok((split_side(lhs), split_side(rhs)))
}

impl ChemEquation {
    /// Parses all species with default settings (phase marks stripped).
    pub fn new(reactants: Vec<String>, products: Vec<String>) -> Result<Self, ParseError> {
        Self::with_settings(reactants, products, &BalancerSettings::default())
    }

    /// Parses all species; `settings.strip_phase_marks` controls whether
    /// trailing phase annotations like `(g)` are removed first.
    pub fn with_settings(
        reactants: Vec<String>,
        products: Vec<String>,
        settings: &BalancerSettings,
    ) -> Result<Self, ParseError> {
        let mut compositions = Vec::new();
        let mut elements: Vec<String> = Vec::new();
        for formula in reactants.iter().chain(products.iter()) {
            let cleaned = if settings.strip_phase_marks {
                filter_phase_marks(formula)
            } else {
                formula.trim().to_string()
            };
            let counts = parse_formula(&cleaned)?;
            let mut keys: Vec<&String> = counts.keys().collect();
            // stable first-seen order regardless of HashMap iteration order
            keys.sort();
            for element in keys {
                if !elements.contains(element) {
                    elements.push(element.clone());
                }
            }
            compositions.push(counts);
        }
        Ok(Self {
            reactants,
            products,
            compositions,
            elements,
        })
    }

    /// Parses a full equation string, e.g. `"Fe + O2 -> Fe2O3"`.
    pub fn from_equation_string(input: &str) -> Result<Self, ParseError> {
        let (reactants, products) = split_equation_string(input)?;
        Self::new(reactants, products)
    }

    pub fn species_count(&self) -> usize {
        self.reactants.len() + self.products.len()
    }

    /// All species names in matrix column order, reactants then products.
    pub fn species(&self) -> Vec<String> {
        let mut all = self.reactants.clone();
        all.extend(self.products.clone());
        all
    }

    /// Builds the stoichiometric matrix: rows indexed by element (first-seen
    /// order), columns by species. Reactant columns carry the element counts,
    /// product columns their negation.
    pub fn build_matrix(&self) -> Result<DMatrix<f64>, BalancerError> {
        if self.species_count() == 0 {
            return Err(BalancerError::NoElements);
        }
        let num_rows = self.elements.len();
        let num_cols = self.species_count();
        let mut matrix = DMatrix::zeros(num_rows, num_cols);
        for (j, composition) in self.compositions.iter().enumerate() {
            let sign = if j < self.reactants.len() { 1.0 } else { -1.0 };
            for (i, element) in self.elements.iter().enumerate() {
                if let Some(count) = composition.get(element) {
                    matrix[(i, j)] = sign * *count as f64;
                }
            }
        }
        info!(
            "stoichiometric matrix built: {} elements x {} species",
            num_rows, num_cols
        );
        Ok(matrix)
    }
}

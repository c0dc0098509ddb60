//! # Balancer API
//!
//! ## Aim
//! THE STRUCT BalanceTask COLLECTS ALL THE INFORMATION ABOUT ONE BALANCING
//! REQUEST, so this is the API for almost all features of the Balancer
//! module. The pipeline is:
//!
//! 1) parse reactant and product formulas into atomic compositions
//! 2) build the stoichiometric matrix (elements x species, products negated)
//! 3) compute the integer null-space vector over exact rationals
//! 4) verify conservation of atoms element by element and expose the
//!    per-element conserved totals
//!
//! Every stage stores its output in an `Option` field; `balance()` runs the
//! whole pipeline. Presentation helpers render the result as a plain
//! equation string, a subscript-digit equation, a pretty table or JSON.

use crate::Balancer::errors::{BalancerError, ParseError};
use crate::Balancer::molmass::calculate_molar_mass;
use crate::Balancer::rational_nullspace::balance_coefficients;
use crate::Balancer::stoichiometry::ChemEquation;
use crate::settings::BalancerSettings;
use log::info;
use nalgebra::DMatrix;
use prettytable::{Cell, Row, Table};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Structure to store one balancing request and everything computed for it.
#[derive(Debug, Clone)]
pub struct BalanceTask {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    /// parsed equation: compositions + element order
    pub equation: Option<ChemEquation>,
    /// stoichiometric matrix, elements x species
    pub matrix: Option<DMatrix<f64>>,
    /// balanced coefficients, reactants then products
    pub coefficients: Option<Vec<u64>>,
    /// per-element conserved atom totals of the balanced equation
    pub element_check: Option<HashMap<String, u64>>,
    pub settings: BalancerSettings,
}

impl BalanceTask {
    pub fn new(reactants: Vec<String>, products: Vec<String>) -> Self {
        Self {
            reactants,
            products,
            equation: None,
            matrix: None,
            coefficients: None,
            element_check: None,
            settings: BalancerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: BalancerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds a task from a raw equation string like `"H2 + O2 = H2O"`.
    pub fn from_equation_string(input: &str) -> Result<Self, ParseError> {
        let (reactants, products) = crate::Balancer::stoichiometry::split_equation_string(input)?;
        Ok(Self::new(reactants, products))
    }

    /////////////////////////////////PIPELINE STAGES///////////////////////////////////////////

    /// Parses every species formula and records the element order.
    pub fn parse_species(&mut self) -> Result<(), BalancerError> {
        let equation = ChemEquation::with_settings(
            self.reactants.clone(),
            self.products.clone(),
            &self.settings,
        )?;
        info!(
            "parsed {} species over elements {:?}",
            equation.species_count(),
            equation.elements
        );
        self.equation = Some(equation);
        Ok(())
    }

    /// Builds the stoichiometric matrix, parsing species first if needed.
    pub fn create_stoichiometric_matrix(&mut self) -> Result<(), BalancerError> {
        if self.equation.is_none() {
            self.parse_species()?;
        }
        let equation = self.equation.as_ref().ok_or(BalancerError::NoElements)?;
        self.matrix = Some(equation.build_matrix()?);
        Ok(())
    }

    /// Runs the null-space solver and verifies conservation of atoms.
    pub fn compute_coefficients(&mut self) -> Result<(), BalancerError> {
        if self.matrix.is_none() {
            self.create_stoichiometric_matrix()?;
        }
        let matrix = self.matrix.as_ref().ok_or(BalancerError::NoElements)?;
        let coefficients = balance_coefficients(matrix, self.settings.step_budget)?;
        let equation = self.equation.as_ref().ok_or(BalancerError::NoElements)?;
        self.element_check = Some(conservation_check(equation, &coefficients)?);
        info!("balanced coefficients: {:?}", coefficients);
        self.coefficients = Some(coefficients);
        Ok(())
    }

    /// Full pipeline: parse, build matrix, solve, verify.
    pub fn balance(&mut self) -> Result<(), BalancerError> {
        self.parse_species()?;
        self.create_stoichiometric_matrix()?;
        self.compute_coefficients()?;
        Ok(())
    }

    /////////////////////////////////PRESENTATION///////////////////////////////////////////

    /// `"2H2 + O2 = 2H2O"`; unit coefficients are omitted by convention.
    /// `None` until the task has been balanced.
    pub fn format_equation(&self) -> Option<String> {
        let coefficients = self.coefficients.as_ref()?;
        let (lhs, rhs) = coefficients.split_at(self.reactants.len());
        Some(format!(
            "{} = {}",
            format_side(&self.reactants, lhs),
            format_side(&self.products, rhs)
        ))
    }

    /// `"2H₂ + O₂ → 2H₂O"`: digit runs inside formulas are rendered as
    /// unicode subscripts, coefficients stay full-size.
    pub fn format_equation_subscripts(&self) -> Option<String> {
        let coefficients = self.coefficients.as_ref()?;
        let (lhs, rhs) = coefficients.split_at(self.reactants.len());
        let render = |species: &[String], coeffs: &[u64]| {
            species
                .iter()
                .zip(coeffs)
                .map(|(formula, &c)| {
                    if c == 1 {
                        to_subscript(formula)
                    } else {
                        format!("{}{}", c, to_subscript(formula))
                    }
                })
                .collect::<Vec<_>>()
                .join(" + ")
        };
        Some(format!(
            "{} → {}",
            render(&self.reactants, lhs),
            render(&self.products, rhs)
        ))
    }

    /// Prints the balanced equation and a per-species table with
    /// coefficients and molar masses.
    pub fn pretty_print_result(&self) {
        let Some(coefficients) = self.coefficients.as_ref() else {
            println!("BalanceTask::pretty_print_result: task is not balanced yet");
            return;
        };
        if let Some(equation) = self.format_equation() {
            println!("{}", equation);
        }
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("species"),
            Cell::new("side"),
            Cell::new("coefficient"),
            Cell::new("molar mass, g/mol"),
        ]));
        for (j, formula) in self
            .reactants
            .iter()
            .chain(self.products.iter())
            .enumerate()
        {
            let side = if j < self.reactants.len() {
                "reactant"
            } else {
                "product"
            };
            let molar_mass = match calculate_molar_mass(formula) {
                Ok((m, _)) => format!("{:.3}", m),
                Err(_) => "-".to_string(),
            };
            table.add_row(Row::new(vec![
                Cell::new(formula),
                Cell::new(side),
                Cell::new(&coefficients[j].to_string()),
                Cell::new(&molar_mass),
            ]));
        }
        table.printstd();
        if let Some(check) = self.element_check.as_ref() {
            let mut elements: Vec<_> = check.iter().collect();
            elements.sort();
            for (element, total) in elements {
                println!("{}: {} atoms on each side", element, total);
            }
        }
    }

    /// JSON view of the balanced task.
    pub fn to_json(&self) -> Value {
        json!({
            "reactants": self.reactants,
            "products": self.products,
            "coefficients": self.coefficients,
            "element_check": self.element_check,
            "equation": self.format_equation(),
        })
    }
}

// Sums coefficient-weighted atom counts per element on both sides and makes
// sure they agree; returns the conserved totals.
fn conservation_check(
    equation: &ChemEquation,
    coefficients: &[u64],
) -> Result<HashMap<String, u64>, BalancerError> {
    let mut check = HashMap::new();
    for element in equation.elements.iter() {
        let mut lhs: u64 = 0;
        let mut rhs: u64 = 0;
        for (j, composition) in equation.compositions.iter().enumerate() {
            let count = composition.get(element).copied().unwrap_or(0) as u64;
            if j < equation.reactants.len() {
                lhs += coefficients[j] * count;
            } else {
                rhs += coefficients[j] * count;
            }
        }
        if lhs != rhs {
            return Err(BalancerError::ConservationViolated {
                element: element.clone(),
            });
        }
        check.insert(element.clone(), lhs);
    }
    Ok(check)
}

fn format_side(species: &[String], coefficients: &[u64]) -> String {
    species
        .iter()
        .zip(coefficients)
        .map(|(formula, &c)| {
            if c == 1 {
                formula.clone()
            } else {
                format!("{}{}", c, formula)
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

fn to_subscript(formula: &str) -> String {
    formula
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => SUBSCRIPT_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Balances an equation given as separate reactant and product formula lists.
/// Returns the coefficient vector (reactants then products, gcd 1, all
/// positive) together with the per-element conserved atom totals.
///
/// ```
/// use ChemBal::Balancer::balancer_api::balance;
/// let (coefficients, check) = balance(vec!["H2", "O2"], vec!["H2O"]).unwrap();
/// assert_eq!(coefficients, vec![2, 1, 2]);
/// assert_eq!(check.get("H"), Some(&4));
/// assert_eq!(check.get("O"), Some(&2));
/// ```
pub fn balance(
    reactants: Vec<&str>,
    products: Vec<&str>,
) -> Result<(Vec<u64>, HashMap<String, u64>), BalancerError> {
    let mut task = BalanceTask::new(
        reactants.iter().map(|s| s.to_string()).collect(),
        products.iter().map(|s| s.to_string()).collect(),
    );
    task.balance()?;
    // both fields are set by a successful balance()
    match (task.coefficients, task.element_check) {
        (Some(coefficients), Some(check)) => Ok((coefficients, check)),
        _ => Err(BalancerError::NoElements),
    }
}

/// Balances a raw equation string and returns it formatted,
/// e.g. `"2H2 + O2 = 2H2O"`.
pub fn balance_equation_string(input: &str) -> Result<String, BalancerError> {
    let mut task = BalanceTask::from_equation_string(input)?;
    task.balance()?;
    task.format_equation().ok_or(BalancerError::NoElements)
}

/// Structured error types of the balancing pipeline: formula parse errors
/// with position information, and the balancing outcome errors (no species,
/// unbalanceable, ambiguous/underdetermined, solver timeout).
pub mod errors;
/// Module to calculate the atomic composition and molar mass of a chemical
/// formula. Element symbols are validated against the built-in periodic
/// table; parentheses nest arbitrarily.
///
///  # Examples
/// ```
/// use ChemBal::Balancer::molmass::calculate_molar_mass;
/// let formula = "C6H8O6";
/// let (molar_mass, element_composition) = calculate_molar_mass(formula).unwrap();
/// println!("Element counts: {:?}", element_composition);
/// println!("Molar mass: {:?} g/mol", molar_mass);
/// use ChemBal::Balancer::molmass::parse_formula;
/// let atomic_composition = parse_formula("Na(NO3)2").unwrap();
/// println!("{:?}", atomic_composition);
/// ```
pub mod molmass;
/// The module takes a vector of reactant formulas and a vector of product
/// formulas and produces the following data:
/// 1) the parsed atomic composition of every species
/// 2) the vector of elements in deterministic first-seen order
/// 3) the stoichiometric matrix (one row per element, one column per species,
///    product entries negated) whose right null space holds the balanced
///    coefficient vectors
///
///  # Examples
/// ```
/// use ChemBal::Balancer::stoichiometry::ChemEquation;
/// let eq = ChemEquation::from_equation_string("H2 + O2 = H2O").unwrap();
/// let matrix = eq.build_matrix().unwrap();
/// assert_eq!(matrix.nrows(), 2); // H, O
/// assert_eq!(matrix.ncols(), 3); // H2, O2, H2O
/// ```
pub mod stoichiometry;
/// Null-space computation over exact rational arithmetic: Gauss-Jordan
/// elimination with `BigRational` entries, LCM/GCD normalization to the
/// minimal positive integer coefficient vector, and a defensive step budget.
pub mod rational_nullspace;
/// High-level API: the `BalanceTask` pipeline struct and the `balance`
/// convenience function.
///
///  # Examples
/// ```
/// use ChemBal::Balancer::balancer_api::balance;
/// let (coefficients, check) = balance(vec!["Fe", "O2"], vec!["Fe2O3"]).unwrap();
/// assert_eq!(coefficients, vec![4, 3, 2]);
/// assert_eq!(check.get("Fe"), Some(&4));
/// ```
pub mod balancer_api;

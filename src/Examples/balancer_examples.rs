pub fn balancer_examples(task: usize) {
    match task {
        0 => {
            // WATER FORMATION
            use crate::Balancer::balancer_api::balance;
            let (coefficients, check) = balance(vec!["H2", "O2"], vec!["H2O"]).unwrap();
            assert_eq!(coefficients, vec![2, 1, 2]);
            println!("coefficients: {:?}", coefficients);
            println!("conserved atoms per side: {:?}", check);
        }
        1 => {
            // IRON OXIDATION, full task pipeline with all renderings
            use crate::Balancer::balancer_api::BalanceTask;
            let mut task = BalanceTask::from_equation_string("Fe + O2 -> Fe2O3").unwrap();
            task.balance().unwrap();
            task.pretty_print_result();
            println!("{}", task.format_equation_subscripts().unwrap());
            println!("{}", serde_json::to_string_pretty(&task.to_json()).unwrap());
        }
        2 => {
            // PERMANGANATE REDOX - a 5-element, 6-species system
            use crate::Balancer::balancer_api::balance_equation_string;
            let balanced =
                balance_equation_string("KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2").unwrap();
            assert_eq!(balanced, "2KMnO4 + 16HCl = 2KCl + 2MnCl2 + 8H2O + 5Cl2");
            println!("{}", balanced);
        }
        3 => {
            // Calculation of atomic composition, molar masses and matrix of atomic composition
            use crate::Balancer::molmass::{
                calculate_molar_mass, calculate_molar_mass_of_vector_of_subs,
                create_elem_composition_matrix, parse_formula,
            };
            let formula = "C6H8O6";
            let (molar_mass, element_composition) = calculate_molar_mass(formula).unwrap();
            println!("Element counts: {:?}", element_composition);
            println!("Molar mass: {:?} g/mol", molar_mass);

            let atomic_composition = parse_formula("Na(NO3)2").unwrap();
            println!("{:?}", atomic_composition);

            let vec_of_formulae = vec!["H2O", "NaCl", "C3H8", "CH4"];
            let masses = calculate_molar_mass_of_vector_of_subs(vec_of_formulae.clone()).unwrap();
            println!("molar masses: {:?}", masses);
            let (matrix, elements) = create_elem_composition_matrix(vec_of_formulae).unwrap();
            println!("elements: {:?}", elements);
            println!("composition matrix: {}", matrix);
        }
        4 => {
            // FAILURE MODES: unbalanceable, ambiguous, parse error
            use crate::Balancer::balancer_api::balance;
            let err = balance(vec!["H2"], vec!["O2"]).unwrap_err();
            println!("H2 = O2: {}", err);

            let err = balance(vec!["H2", "O2"], vec!["H2O2", "O3"]).unwrap_err();
            println!("H2 + O2 = H2O2 + O3: {}", err);

            let err = balance(vec!["Xy2"], vec!["Xy2"]).unwrap_err();
            println!("Xy2 = Xy2: {}", err);
        }
        _ => {
            println!("there is no example with number {}", task);
        }
    }
}

use crate::Balancer::balancer_api::BalanceTask;
use crate::Balancer::molmass::calculate_molar_mass;
use crate::Examples::balancer_examples::balancer_examples;
use crate::cli::balancer_help::{BALANCER_ENG_HELPER, BALANCER_RU_HELPER};
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => balance_dialog(),
            "2" => molar_mass_dialog(),
            "3" => examples_menu(),
            "4" => println!("{}", BALANCER_ENG_HELPER),
            "5" => println!("{}", BALANCER_RU_HELPER),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - "Enter your choice:" prompt

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to ChemBal: chemical equation balancer \n
    formula parsing, stoichiometric matrices and exact integer balancing \n \x1b[0m"
    );
    println!("\x1b[33m1. Balance an equation\x1b[0m");
    println!("\x1b[33m2. Molar mass of a formula\x1b[0m");
    println!("\x1b[33m3. Examples\x1b[0m");
    println!("\x1b[33m4. Help (eng)\x1b[0m");
    println!("\x1b[33m5. Help (ru)\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}

fn balance_dialog() {
    print!("\x1b[36mEnter equation (e.g. H2 + O2 = H2O): \x1b[0m");
    io::stdout().flush().unwrap();
    let input = get_user_input();

    let mut task = match BalanceTask::from_equation_string(input.trim()) {
        Ok(task) => task,
        Err(e) => {
            println!("\x1b[31m{}\x1b[0m", e);
            return;
        }
    };
    match task.balance() {
        Ok(()) => {
            task.pretty_print_result();
            if let Some(pretty) = task.format_equation_subscripts() {
                println!("{}", pretty);
            }
        }
        Err(e) => println!("\x1b[31m{}\x1b[0m", e),
    }
}

fn molar_mass_dialog() {
    print!("\x1b[36mEnter formula (e.g. Ca(NO3)2): \x1b[0m");
    io::stdout().flush().unwrap();
    let input = get_user_input();

    match calculate_molar_mass(input.trim()) {
        Ok((molar_mass, composition)) => {
            println!("Element counts: {:?}", composition);
            println!("Molar mass: {:.3} g/mol", molar_mass);
        }
        Err(e) => println!("\x1b[31m{}\x1b[0m", e),
    }
}

fn examples_menu() {
    println!("\n=== Balancer Examples ===");
    println!("\x1b[33m0. Water formation\x1b[0m");
    println!("\x1b[33m1. Iron oxidation\x1b[0m");
    println!("\x1b[33m2. Permanganate redox\x1b[0m");
    println!("\x1b[33m3. Molar masses and composition matrix\x1b[0m");
    println!("\x1b[33m4. Failure modes\x1b[0m");
    print!("\x1b[36mEnter example number: \x1b[0m");
    io::stdout().flush().unwrap();

    let choice = get_user_input();
    match choice.trim().parse::<usize>() {
        Ok(task) if task <= 4 => balancer_examples(task),
        _ => println!("Invalid example number."),
    }
}

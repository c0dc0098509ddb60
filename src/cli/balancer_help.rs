pub const BALANCER_ENG_HELPER: &str = r#"
CHEMICAL EQUATION BALANCER - HELP

Input syntax
------------
Enter the whole equation in one line, for example:
    H2 + O2 = H2O
    Fe + O2 -> Fe2O3
    KMnO4 + HCl => KCl + MnCl2 + H2O + Cl2

Accepted reaction arrows: '=', '->', '=>', '→', '⇌'.
Species on one side are separated by '+'.

Formulas
--------
An element symbol is one uppercase letter optionally followed by one
lowercase letter (Fe, O, Cl). A digit run after a symbol is its count,
default 1. Parentheses group atoms and may be nested: Ca(OH)2, K4(ON(SO3)2)2.
Trailing phase marks (g), (l), (s), (c), (aq) are stripped automatically.

Results
-------
The balancer finds the smallest positive whole-number coefficients that
conserve every element, for example 2H2 + O2 = 2H2O. If no such coefficients
exist the equation is reported as unbalanceable; if several independent
balances exist (too generic a species set) it is reported as ambiguous and
one coefficient must be fixed by hand.
"#;

pub const BALANCER_RU_HELPER: &str = r#"
БАЛАНСИРОВКА ХИМИЧЕСКИХ УРАВНЕНИЙ - СПРАВКА

Ввод
----
Введите уравнение целиком одной строкой, например:
    H2 + O2 = H2O
    Fe + O2 -> Fe2O3
    KMnO4 + HCl => KCl + MnCl2 + H2O + Cl2

Допустимые стрелки реакции: '=', '->', '=>', '→', '⇌'.
Вещества в одной части уравнения разделяются знаком '+'.

Формулы
-------
Символ элемента - одна заглавная буква, за которой может следовать одна
строчная (Fe, O, Cl). Число после символа - количество атомов, по умолчанию 1.
Скобки группируют атомы и могут быть вложенными: Ca(OH)2, K4(ON(SO3)2)2.
Обозначения фаз (g), (l), (s), (c), (aq) в конце формулы отбрасываются.

Результат
---------
Программа находит наименьшие целые положительные коэффициенты, сохраняющие
количество каждого элемента, например 2H2 + O2 = 2H2O. Если таких
коэффициентов не существует, уравнение признается несбалансируемым; если
независимых решений несколько, уравнение недоопределено и один коэффициент
нужно задать вручную.
"#;

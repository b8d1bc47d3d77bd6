//! Arithmetic word problems sized for young players.

use std::fmt;

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];

    pub fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
        };
        f.write_str(symbol)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathProblem {
    pub question: String,
    pub answer: i32,
    pub operation: Operation,
}

impl MathProblem {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let operation = Operation::ALL[rng.random_range(0..Operation::ALL.len())];
        Self::generate_for(operation, rng)
    }

    pub fn generate_for<R: Rng>(operation: Operation, rng: &mut R) -> Self {
        let (a, b) = sample_operands(operation, rng);
        let template = rng.random_range(0..3);
        let question = match (operation, template) {
            (Operation::Add, 0) => format!(
                "You have {a} marbles and find {b} more. How many marbles do you have now?"
            ),
            (Operation::Add, 1) => format!(
                "There are {a} birds in a tree and {b} more join them. How many birds are there now?"
            ),
            (Operation::Subtract, 0) => format!(
                "You have {a} cookies and eat {b} of them. How many cookies are left?"
            ),
            (Operation::Subtract, 1) => format!(
                "There are {a} kids playing and {b} go home. How many kids are still playing?"
            ),
            (Operation::Multiply, 0) => format!(
                "There are {a} baskets with {b} apples in each. How many apples are there in total?"
            ),
            (Operation::Multiply, 1) => format!("{a} groups of {b} = ?"),
            (operation, _) => format!("{a} {operation} {b} = ?"),
        };

        Self {
            question,
            answer: operation.apply(a, b),
            operation,
        }
    }

    /// Exact numeric comparison; `"7.0"` matches an answer of 7.
    pub fn is_correct(&self, value: f64) -> bool {
        value == f64::from(self.answer)
    }
}

/// Operand ranges keep sums around 20, differences non-negative and products small.
pub fn sample_operands<R: Rng>(operation: Operation, rng: &mut R) -> (i32, i32) {
    match operation {
        Operation::Add => (rng.random_range(5..=15), rng.random_range(0..=5)),
        Operation::Subtract => (rng.random_range(10..=20), rng.random_range(1..=6)),
        Operation::Multiply => (rng.random_range(1..=5), rng.random_range(2..=4)),
    }
}

/// Parse a typed answer. Anything that is not a finite number yields `None`.
pub fn parse_answer(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn every_operation_shows_up() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let problem = MathProblem::generate(&mut rng);
            let idx = Operation::ALL
                .iter()
                .position(|op| *op == problem.operation)
                .unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn answers_match_stated_operands() {
        let mut rng = SmallRng::seed_from_u64(12);
        for _ in 0..500 {
            let problem = MathProblem::generate(&mut rng);
            match problem.operation {
                Operation::Add => assert!((5..=20).contains(&problem.answer)),
                Operation::Subtract => assert!((4..=19).contains(&problem.answer)),
                Operation::Multiply => assert!((2..=20).contains(&problem.answer)),
            }
        }
    }

    #[test]
    fn symbolic_template_renders_operator() {
        let mut rng = SmallRng::seed_from_u64(4);
        let symbolic = (0..100)
            .map(|_| MathProblem::generate_for(Operation::Multiply, &mut rng))
            .find(|p| p.question.contains('×'))
            .unwrap();
        assert!(symbolic.question.ends_with("= ?"));
    }

    #[test]
    fn parse_rejects_non_numeric_input() {
        assert_eq!(parse_answer(" 12 "), Some(12.0));
        assert_eq!(parse_answer("7.0"), Some(7.0));
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer("twelve"), None);
        assert_eq!(parse_answer("inf"), None);
        assert_eq!(parse_answer("NaN"), None);
    }

    #[test]
    fn correctness_is_exact() {
        let problem = MathProblem {
            question: "3 + 4 = ?".into(),
            answer: 7,
            operation: Operation::Add,
        };
        assert!(problem.is_correct(7.0));
        assert!(!problem.is_correct(7.5));
        assert!(!problem.is_correct(-7.0));
    }
}

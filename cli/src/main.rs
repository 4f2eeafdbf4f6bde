//! `calc`: a small calculator demonstrating the commandeer framework.
//!
//! Each operation is a subcommand; the two operand arguments are
//! declared once on [`Operands`] and inherited by every operation
//! through [`Declaration::extend`]. With no arguments on the root
//! command, picking an operation is mandatory.

use commandeer::{Argument, Command, Declaration, Failure, warning};

/// Shared operand declarations for the binary operations.
#[derive(Default)]
struct Operands {
    first: i64,
    second: i64,
}

impl Command for Operands {
    fn declaration() -> Declaration<Self> {
        Declaration::new()
            .arg(
                "first",
                Argument::integer()
                    .positional()
                    .required()
                    .with_help("The first number"),
                |cmd: &mut Self, value: i64| cmd.first = value,
            )
            .arg(
                "second",
                Argument::integer()
                    .positional()
                    .required()
                    .with_help("The second number"),
                |cmd: &mut Self, value: i64| cmd.second = value,
            )
    }

    fn main(&mut self) -> Result<(), Failure> {
        Ok(())
    }
}

#[derive(Default)]
struct Add {
    operands: Operands,
}

impl Command for Add {
    fn declaration() -> Declaration<Self> {
        Declaration::new()
            .with_description("Add two numbers")
            .extend(Operands::declaration(), |cmd| &mut cmd.operands)
    }

    fn main(&mut self) -> Result<(), Failure> {
        println!("{}", self.operands.first + self.operands.second);
        Ok(())
    }
}

#[derive(Default)]
struct Subtract {
    operands: Operands,
}

impl Command for Subtract {
    fn declaration() -> Declaration<Self> {
        Declaration::new()
            .with_description("Subtract the second number from the first")
            .extend(Operands::declaration(), |cmd| &mut cmd.operands)
    }

    fn main(&mut self) -> Result<(), Failure> {
        println!("{}", self.operands.first - self.operands.second);
        Ok(())
    }
}

#[derive(Default)]
struct Multiply {
    operands: Operands,
}

impl Command for Multiply {
    fn declaration() -> Declaration<Self> {
        Declaration::new()
            .with_description("Multiply two numbers")
            .extend(Operands::declaration(), |cmd| &mut cmd.operands)
    }

    fn main(&mut self) -> Result<(), Failure> {
        println!("{}", self.operands.first * self.operands.second);
        Ok(())
    }
}

#[derive(Default)]
struct Divide {
    operands: Operands,
}

impl Command for Divide {
    fn declaration() -> Declaration<Self> {
        Declaration::new()
            .with_description("Divide the first number by the second")
            .extend(Operands::declaration(), |cmd| &mut cmd.operands)
    }

    fn main(&mut self) -> Result<(), Failure> {
        let (first, second) = (self.operands.first, self.operands.second);
        if second == 0 {
            return Err(Failure::new("cannot divide by zero"));
        }
        if first % second != 0 {
            warning("result is truncated toward zero");
        }
        println!("{}", first / second);
        Ok(())
    }
}

#[derive(Default)]
struct Calc;

impl Command for Calc {
    fn declaration() -> Declaration<Self> {
        Declaration::new()
            .with_name("calc")
            .with_description("Performs arithmetic on numbers provided on the command line")
            .with_subcommand_label("operation")
            .subcommand::<Add>("add")
            .subcommand::<Subtract>("subtract")
            .subcommand::<Multiply>("multiply")
            .subcommand::<Divide>("divide")
    }

    fn main(&mut self) -> Result<(), Failure> {
        Ok(())
    }
}

fn main() {
    Calc::run();
}

//! Minimal commandeer program: one optional positional argument.
//!
//! ```text
//! cargo run --example hello            # Hello, everybody!
//! cargo run --example hello -- Ada     # Hello, Ada!
//! ```

use commandeer::{Argument, Command, Declaration, Failure};

#[derive(Default)]
struct HelloWorld {
    name: String,
}

impl Command for HelloWorld {
    fn declaration() -> Declaration<Self> {
        Declaration::new()
            .with_description(
                "This program says hello to whomever you want. If no argument is \
                 provided, it will say hello to everybody.",
            )
            .arg(
                "name",
                Argument::new()
                    .positional()
                    .with_default("everybody")
                    .with_help("Who to greet"),
                |cmd: &mut Self, value: String| cmd.name = value,
            )
    }

    fn main(&mut self) -> Result<(), Failure> {
        println!("Hello, {}!", self.name);
        Ok(())
    }
}

fn main() {
    HelloWorld::run();
}

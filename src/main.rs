use std::io::{stdin, stdout};

use enigma_bombe::cli;

fn main() {
    env_logger::init();
    cli::run_repl(stdin().lock(), stdout().lock());
}

//! rbooks-check - Check that every transaction balances.

fn main() -> std::process::ExitCode {
    rbooks::cmd::check::main()
}

//! rbooks-accounts - Check that every used account is declared.

fn main() -> std::process::ExitCode {
    rbooks::cmd::accounts::main()
}

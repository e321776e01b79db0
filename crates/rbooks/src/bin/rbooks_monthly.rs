//! rbooks-monthly - Summarize one month of income, expenses and balances.

fn main() -> std::process::ExitCode {
    rbooks::cmd::monthly::main()
}

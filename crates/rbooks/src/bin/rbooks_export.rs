//! rbooks-export - Export transactions as CSV or raw register text.

fn main() -> std::process::ExitCode {
    rbooks::cmd::export::main()
}

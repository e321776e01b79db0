//! rbooks-yearly - Year-end profit and loss statement and balance sheet.

fn main() -> std::process::ExitCode {
    rbooks::cmd::yearly::main()
}

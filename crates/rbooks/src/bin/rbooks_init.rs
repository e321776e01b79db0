//! rbooks-init - Create a year directory with opening, closing and month files.

fn main() -> std::process::ExitCode {
    rbooks::cmd::init::main()
}

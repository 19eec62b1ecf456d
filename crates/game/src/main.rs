mod app;

use std::process::ExitCode;

use app::bootstrap::{build_app, Launch};

fn main() -> ExitCode {
    match build_app(std::env::args().skip(1)) {
        Launch::Run(wiring) => app::loop_runner::run(wiring),
        Launch::Exit(code) => code,
    }
}

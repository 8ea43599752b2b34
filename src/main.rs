use rating_ledger::{console, handle_process, interpret};

fn main() {
    setup_logging();
    let cli = interpret();

    let code = match handle_process(&cli) {
        Ok(outcome) => {
            console::report_outcome(&outcome);
            0
        }
        Err(e) => {
            console::report_error(&e);
            1
        }
    };

    if !cli.no_pause {
        console::wait_for_acknowledgement();
    }
    std::process::exit(code);
}

fn setup_logging() {
    sensible_env_logger::init!();
}

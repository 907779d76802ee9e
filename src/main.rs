use book_search_client::configs;
use std::env;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let _guard = match configs::set_global_logging_config() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Logging is disabled: {}", err);
            None
        }
    };

    let tokens: Vec<String> = env::args().skip(1).collect();
    let mut stdout = io::stdout().lock();

    match book_search_client::run(&tokens, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

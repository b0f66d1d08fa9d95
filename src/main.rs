use std::process::ExitCode;

fn main() -> ExitCode {
    match revops::run() {
        Ok(code) => exit_code(code),
        Err(err) => {
            eprintln!("Error: {}", err);
            exit_code(err.exit_code())
        }
    }
}

/// Codes outside 0..=255 cannot be reported by the OS; they collapse to 1.
fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map(ExitCode::from).unwrap_or(ExitCode::FAILURE)
}

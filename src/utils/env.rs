// src/utils/env.rs - Environment loading

use log::debug;

/// Load a `.env` file when present; the process environment always wins.
pub fn load_env() {
    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(_) => debug!("No .env file found, using process environment"),
    }
}

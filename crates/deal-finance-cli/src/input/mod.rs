pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load a typed input record from `--input <file>` or, failing that, from
/// piped stdin. `Ok(None)` means neither source supplied anything.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_input(path).map(Some);
    }
    stdin::read_stdin()
}

use anyhow::{anyhow, Result};
use std::{fs, io::Read};

/// Resolves a command line argument that is either inline json, a path to a
/// `.json` file, or `-` for stdin.
pub fn read_json_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else if source.ends_with(".json") {
        fs::read_to_string(source).map_err(|e| anyhow!("Failed to read file {}: {}", source, e))
    } else {
        Ok(source.to_string())
    }
}

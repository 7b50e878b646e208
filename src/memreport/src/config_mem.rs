//! Config-memory table grammar (`ConfigMem` category).
//!
//! Fixed, small table: three echo lines, then one line per loaded config
//! file (`<file> <bytes> <max bytes>`), then a trailing total line. The
//! format does not vary, so shape violations are fatal rather than
//! tolerated.

use serde::Serialize;

use crate::error::CategoryError;

const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// One loaded config file and its memory footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigMemEntry {
    pub file_name: String,
    pub num_mega_bytes: f64,
    pub max_mega_bytes: f64,
}

/// Parse one `ConfigMem` block.
pub fn parse(lines: &[String]) -> Result<Vec<ConfigMemEntry>, CategoryError> {
    let mut entries = Vec::new();

    let end = lines.len().saturating_sub(1);
    for line in lines.iter().take(end).skip(3) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(CategoryError::MalformedConfigLine(line.to_string()));
        }

        let bytes: f64 = tokens[1]
            .parse()
            .map_err(|_| CategoryError::MalformedConfigLine(line.to_string()))?;
        let max_bytes: f64 = tokens[2]
            .parse()
            .map_err(|_| CategoryError::MalformedConfigLine(line.to_string()))?;

        entries.push(ConfigMemEntry {
            file_name: tokens[0].to_string(),
            num_mega_bytes: bytes / BYTES_PER_MEGABYTE,
            max_mega_bytes: max_bytes / BYTES_PER_MEGABYTE,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn sample() -> Vec<String> {
        block(&[
            "Config memory usage:",
            "Current and peak bytes held per file:",
            "FileName NumBytes MaxBytes",
            "FooBar 2097152 4194304",
            "../../../Engine/Config/BaseEngine.ini 524288 1048576",
            "Total 2621440 5242880",
        ])
    }

    #[test]
    fn test_bytes_convert_to_megabytes() {
        let entries = parse(&sample()).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].file_name, "FooBar");
        assert_eq!(entries[0].num_mega_bytes, 2.0);
        assert_eq!(entries[0].max_mega_bytes, 4.0);

        assert_eq!(entries[1].file_name, "../../../Engine/Config/BaseEngine.ini");
        assert_eq!(entries[1].num_mega_bytes, 0.5);
        assert_eq!(entries[1].max_mega_bytes, 1.0);
    }

    #[test]
    fn test_trailing_total_line_is_not_an_entry() {
        let entries = parse(&sample()).unwrap();
        assert!(entries.iter().all(|e| e.file_name != "Total"));
    }

    #[test]
    fn test_wrong_token_count_is_fatal() {
        let mut lines = sample();
        lines[3] = "FooBar 2097152".to_string();
        assert!(matches!(
            parse(&lines).unwrap_err(),
            CategoryError::MalformedConfigLine(_)
        ));
    }

    #[test]
    fn test_non_numeric_byte_count_is_fatal() {
        let mut lines = sample();
        lines[4] = "BaseEngine.ini lots 1048576".to_string();
        assert!(matches!(
            parse(&lines).unwrap_err(),
            CategoryError::MalformedConfigLine(_)
        ));
    }

    #[test]
    fn test_short_block_yields_no_entries() {
        let lines = block(&["Config memory usage:", "no table follows"]);
        assert_eq!(parse(&lines).unwrap(), Vec::new());
    }
}

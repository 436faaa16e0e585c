use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::database::StorageError;

const SLED_SCHEME: &str = "sled://";
const MEMORY_SCHEME: &str = "memory://";

/// Where the document store lives, parsed from the connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// On-disk store rooted at this directory
    Sled(PathBuf),
    /// Temporary store removed when the process exits
    Memory,
}

impl FromStr for StoreLocation {
    type Err = StorageError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        let uri = uri.trim();
        if let Some(path) = uri.strip_prefix(SLED_SCHEME) {
            if path.is_empty() {
                return Err(StorageError::InvalidUri(format!(
                    "'{uri}' has no database path"
                )));
            }
            return Ok(StoreLocation::Sled(PathBuf::from(path)));
        }
        if uri.strip_prefix(MEMORY_SCHEME).is_some() {
            return Ok(StoreLocation::Memory);
        }
        Err(StorageError::InvalidUri(format!(
            "'{uri}' must start with {SLED_SCHEME} or {MEMORY_SCHEME}"
        )))
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreLocation::Sled(path) => write!(f, "{}{}", SLED_SCHEME, path.display()),
            StoreLocation::Memory => f.write_str(MEMORY_SCHEME),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sled_paths() {
        assert_eq!(
            "sled:///var/lib/emogo".parse::<StoreLocation>().unwrap(),
            StoreLocation::Sled(PathBuf::from("/var/lib/emogo"))
        );
        assert_eq!(
            "sled://data/emogo".parse::<StoreLocation>().unwrap(),
            StoreLocation::Sled(PathBuf::from("data/emogo"))
        );
    }

    #[test]
    fn test_parse_memory() {
        assert_eq!("memory://".parse::<StoreLocation>().unwrap(), StoreLocation::Memory);
    }

    #[test]
    fn test_rejects_unknown_schemes() {
        assert!("mongodb+srv://user:pw@cluster0".parse::<StoreLocation>().is_err());
        assert!("sled://".parse::<StoreLocation>().is_err());
        assert!("".parse::<StoreLocation>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let location = StoreLocation::Sled(PathBuf::from("/tmp/emogo"));
        assert_eq!(location.to_string().parse::<StoreLocation>().unwrap(), location);
    }
}

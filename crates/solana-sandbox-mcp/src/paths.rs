use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SandboxPaths {
    base: PathBuf,
}

impl SandboxPaths {
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base_dir(&self) -> PathBuf {
        self.base.clone()
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs").join("mcp")
    }
}

pub fn default_paths() -> SandboxPaths {
    let base = std::env::var("SOLANA_SANDBOX_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".solana-sandbox")
        });
    SandboxPaths::from_base(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_dir_under_base() {
        let paths = SandboxPaths::from_base("/tmp/sandbox");
        assert_eq!(paths.base_dir(), PathBuf::from("/tmp/sandbox"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/tmp/sandbox/logs/mcp"));
    }
}

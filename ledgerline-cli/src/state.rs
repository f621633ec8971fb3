use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub fn ledgerline_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ledgerline"))
}

pub fn ensure_ledgerline_home() -> Result<PathBuf> {
    let dir = ledgerline_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Read a file, or stdin when `path` is absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if !is_stdio(Some(p)) => {
            fs::read_to_string(p).with_context(|| format!("read {}", p.display()))
        }
        _ => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s).context("read stdin")?;
            Ok(s)
        }
    }
}

/// Write to a file, or stdout when `path` is absent or `-`.
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(p) if !is_stdio(Some(p)) => {
            fs::write(p, contents).with_context(|| format!("write {}", p.display()))
        }
        _ => {
            let mut out = io::stdout().lock();
            out.write_all(contents.as_bytes()).context("write stdout")?;
            out.flush().context("flush stdout")
        }
    }
}

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::FileError;

/// One entry per line, trimmed; blank lines are skipped.
pub fn read_list(path: &Path) -> Result<Vec<String>, FileError> {
    let content = fs::read_to_string(path).map_err(|err| FileError::read(path, err))?;
    let items: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    debug!(path = %path.display(), entries = items.len(), "list loaded");
    Ok(items)
}

/// Replace the file at `path` with one entry per line.
pub fn write_list<'a, I>(path: &Path, items: I) -> Result<(), FileError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buf = String::new();
    for item in items {
        buf.push_str(item);
        buf.push('\n');
    }
    write_all_atomically(path, buf.as_bytes())
}

pub(crate) fn write_all_atomically(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);
    {
        let mut f = fs::File::create(tmp).map_err(|err| FileError::write(tmp, err))?;
        f.write_all(bytes).map_err(|err| FileError::write(tmp, err))?;
        f.sync_all().map_err(|err| FileError::write(tmp, err))?;
    }
    fs::rename(tmp, path).map_err(|err| FileError::write(path, err))
}

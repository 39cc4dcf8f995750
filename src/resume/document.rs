use std::fs;
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};

use crate::error::StoreError;

/// Sectioned key/value document backing `config.ini`.
///
/// Plain INI: `;`/`#` comment lines, `=` or `:` between key and value,
/// values taken verbatim (no quoting, no escapes). Section and key lookups
/// ignore ASCII case; writers have been known to lower-case option names.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    ini: Ini,
}

impl ConfigDocument {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, origin: &Path) -> Result<Self, StoreError> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, opt).map_err(|source| StoreError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        Ok(Self { ini })
    }

    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        let section = self.section_name(section)?;
        let props = self.ini.section(Some(section))?;
        props
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.trim().to_owned())
    }

    pub fn get_u32(&self, section: &str, key: &str) -> Result<u32, StoreError> {
        let raw = self
            .get(section, key)
            .ok_or_else(|| StoreError::missing(section, key))?;
        raw.parse::<u32>().map_err(|_| StoreError::InvalidValue {
            section: section.to_owned(),
            key: key.to_owned(),
            value: raw,
        })
    }

    /// Replaces the value under the existing spelling of `section`/`key`,
    /// creating either when absent.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let section = self
            .section_name(section)
            .unwrap_or(section)
            .to_owned();
        let key = self
            .ini
            .section(Some(section.as_str()))
            .and_then(|props| props.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)))
            .map(|(k, _)| k)
            .unwrap_or(key)
            .to_owned();
        self.ini.with_section(Some(section)).set(key, value.into());
    }

    pub fn to_text(&self) -> Result<String, StoreError> {
        let opt = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            kv_separator: " = ",
            ..WriteOption::default()
        };
        let mut buf = Vec::new();
        self.ini.write_to_opt(&mut buf, opt)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Atomic replace via a sibling temp file.
    pub fn write_to(&self, path: &Path) -> Result<(), StoreError> {
        let text = self.to_text()?;
        let tmp = tmp_path(path);
        fs::write(&tmp, text)?;
        if let Err(e) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(path);
            fs::rename(&tmp, path).map_err(|_| e)?;
        }
        Ok(())
    }

    fn section_name(&self, name: &str) -> Option<&str> {
        self.ini
            .sections()
            .flatten()
            .find(|s| s.eq_ignore_ascii_case(name))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

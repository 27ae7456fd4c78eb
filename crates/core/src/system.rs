// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! Host platform tags, resolved at compile time.
//!
//! [`OsTag`]/[`ArchTag`] are the vocabulary the RuleEngine (`picomc-vspec`)
//! matches against and the vocabulary LibraryResolver uses to pick native
//! classifiers. Both carry the upstream-canonical string via `Display`.

use std::fmt::Display;

use serde::Deserialize;

use crate::errors::{SystemError, SystemResult};

pub const OS: OsTag = if cfg!(target_os = "windows") {
    OsTag::Windows
} else if cfg!(target_os = "macos") {
    OsTag::Osx
} else if cfg!(target_os = "linux") {
    OsTag::Linux
} else {
    OsTag::Unknown
};

pub const ARCHITECTURE: ArchTag = if cfg!(target_arch = "x86") {
    ArchTag::X86
} else if cfg!(target_arch = "x86_64") {
    ArchTag::X64
} else if cfg!(target_arch = "arm") {
    ArchTag::Arm
} else if cfg!(target_arch = "aarch64") {
    ArchTag::Aarch64
} else {
    ArchTag::Unknown
};

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OsTag {
    #[serde(rename = "windows")]
    Windows,
    #[serde(rename = "linux")]
    Linux,
    #[serde(rename = "osx")]
    Osx,
    #[serde(rename = "unknown")]
    Unknown,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ArchTag {
    #[serde(rename = "x86")]
    X86,
    #[serde(rename = "x64")]
    X64,
    #[serde(rename = "arm")]
    Arm,
    #[serde(rename = "aarch64")]
    Aarch64,
    #[serde(rename = "unknown")]
    Unknown,
}

impl OsTag {
    /// Name as it appears in `rules[].os.name` / `natives{}` keys upstream.
    pub fn get_vanilla_os(&self) -> SystemResult<&'static str> {
        match self {
            OsTag::Windows => Ok("windows"),
            OsTag::Linux => Ok("linux"),
            OsTag::Osx => Ok("osx"),
            OsTag::Unknown => Err(SystemError::UnsupportedOS),
        }
    }

    pub fn get_adoptium_name(&self) -> SystemResult<&'static str> {
        match self {
            OsTag::Windows => Ok("windows"),
            OsTag::Linux => Ok("linux"),
            OsTag::Osx => Ok("mac"),
            OsTag::Unknown => Err(SystemError::UnsupportedOS),
        }
    }

    pub fn get_archive_type(&self) -> SystemResult<&'static str> {
        match self {
            OsTag::Windows => Ok("zip"),
            OsTag::Linux | OsTag::Osx => Ok("tar.gz"),
            OsTag::Unknown => Err(SystemError::UnsupportedOS),
        }
    }

    /// Name as it appears in Oracle's GraalVM download URLs.
    pub fn get_graal_name(&self) -> SystemResult<&'static str> {
        match self {
            OsTag::Windows => Ok("windows"),
            OsTag::Linux => Ok("linux"),
            OsTag::Osx => Ok("macos"),
            OsTag::Unknown => Err(SystemError::UnsupportedOS),
        }
    }

    /// Name as Azul's Zulu API (`os=`) and BellSoft's Foojay API
    /// (`operating_system=`) expect it.
    pub fn get_zulu_name(&self) -> SystemResult<&'static str> {
        match self {
            OsTag::Windows => Ok("windows"),
            OsTag::Linux => Ok("linux"),
            OsTag::Osx => Ok("macos"),
            OsTag::Unknown => Err(SystemError::UnsupportedOS),
        }
    }

    /// `archive_type=` value for the Zulu API; same mapping as
    /// [`Self::get_archive_type`] under the name that endpoint's query
    /// parameter uses.
    pub fn get_zulu_ext(&self) -> SystemResult<&'static str> {
        self.get_archive_type()
    }

    pub fn path_separator(&self) -> char {
        match self {
            OsTag::Windows => ';',
            _ => ':',
        }
    }
}

impl Display for OsTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsTag::Windows => f.write_str("windows"),
            OsTag::Linux => f.write_str("linux"),
            OsTag::Osx => f.write_str("osx"),
            OsTag::Unknown => f.write_str("unknown"),
        }
    }
}

impl ArchTag {
    pub fn get_simple_name(&self) -> SystemResult<&'static str> {
        match self {
            ArchTag::X86 => Ok("x86"),
            ArchTag::X64 => Ok("x64"),
            ArchTag::Arm => Ok("arm"),
            ArchTag::Aarch64 => Ok("aarch64"),
            ArchTag::Unknown => Err(SystemError::UnsupportedArchitecture),
        }
    }

    /// Suffix used to build legacy `natives-<os><arch>` classifiers; empty
    /// for the default 64-bit case.
    pub fn get_vanilla_arch(&self) -> SystemResult<&'static str> {
        match self {
            ArchTag::X86 => Ok("-x86"),
            ArchTag::X64 => Ok(""),
            ArchTag::Arm => Ok("-arm"),
            ArchTag::Aarch64 => Ok("-arm64"),
            ArchTag::Unknown => Err(SystemError::UnsupportedArchitecture),
        }
    }

    /// `arch=` value for the Zulu/Foojay APIs.
    pub fn get_zulu_arch(&self) -> SystemResult<&'static str> {
        match self {
            ArchTag::X86 => Ok("x86"),
            ArchTag::X64 => Ok("x64"),
            ArchTag::Arm => Ok("arm"),
            ArchTag::Aarch64 => Ok("arm64"),
            ArchTag::Unknown => Err(SystemError::UnsupportedArchitecture),
        }
    }

    /// "32" / "64", used to resolve the `${arch}` placeholder in older
    /// per-OS `natives{}` classifier templates.
    pub fn get_arch_bits(&self) -> SystemResult<&'static str> {
        match self {
            ArchTag::X86 => Ok("32"),
            ArchTag::X64 => Ok("64"),
            ArchTag::Arm => Ok("32"),
            ArchTag::Aarch64 => Ok("64"),
            ArchTag::Unknown => Err(SystemError::UnsupportedArchitecture),
        }
    }
}

impl Display for ArchTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchTag::X86 => f.write_str("x86"),
            ArchTag::X64 => f.write_str("x86_64"),
            ArchTag::Arm => f.write_str("arm"),
            ArchTag::Aarch64 => f.write_str("aarch64"),
            ArchTag::Unknown => f.write_str("unknown"),
        }
    }
}

/// Host OS version string as reported by `os_info`, used for `os.version`
/// regex matching in RuleEngine rules.
pub fn os_version_string() -> String {
    os_info::get().version().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_tag_display_matches_vanilla_name() {
        assert_eq!(OsTag::Linux.to_string(), "linux");
        assert_eq!(OsTag::Linux.get_vanilla_os().unwrap(), "linux");
    }

    #[test]
    fn path_separator_matches_host_convention() {
        assert_eq!(OsTag::Windows.path_separator(), ';');
        assert_eq!(OsTag::Linux.path_separator(), ':');
    }
}

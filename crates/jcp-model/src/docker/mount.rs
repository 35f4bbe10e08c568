use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Kind of a structured `--mount` entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountKind {
    Bind,
    Volume,
    Tmpfs,
}

impl MountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MountKind::Bind => "bind",
            MountKind::Volume => "volume",
            MountKind::Tmpfs => "tmpfs",
        }
    }
}

impl FromStr for MountKind {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bind" => Ok(MountKind::Bind),
            "volume" => Ok(MountKind::Volume),
            "tmpfs" => Ok(MountKind::Tmpfs),
            other => Err(ModelError::UnknownMountKind(other.to_string())),
        }
    }
}

/// One `--mount` entry of a docker run specification.
///
/// Values are rendered verbatim; nothing is quoted or escaped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mount {
    pub kind: MountKind,
    /// Host path (bind) or volume name (volume). Unused for tmpfs.
    #[serde(default)]
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub read_only: bool,
    /// Size limit in bytes, tmpfs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmpfs_size: Option<u64>,
    /// Octal file mode, tmpfs only (e.g. `1770`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmpfs_mode: Option<String>,
}

impl Mount {
    pub fn bind(source: impl Into<String>, target: impl Into<String>, read_only: bool) -> Self {
        Self {
            kind: MountKind::Bind,
            source: source.into(),
            target: target.into(),
            read_only,
            tmpfs_size: None,
            tmpfs_mode: None,
        }
    }

    pub fn volume(source: impl Into<String>, target: impl Into<String>, read_only: bool) -> Self {
        Self {
            kind: MountKind::Volume,
            ..Self::bind(source, target, read_only)
        }
    }

    pub fn tmpfs(target: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            kind: MountKind::Tmpfs,
            tmpfs_size: size,
            ..Self::bind("", target, false)
        }
    }
}

/// Renders the value of a `--mount` flag:
/// `type=<kind>,source=<src>,target=<tgt>[,readonly]` for bind and volume
/// mounts, `type=tmpfs,target=<tgt>[,tmpfs-size=N][,tmpfs-mode=M]` for tmpfs.
impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type={}", self.kind.as_str())?;
        if self.kind != MountKind::Tmpfs {
            write!(f, ",source={}", self.source)?;
        }
        write!(f, ",target={}", self.target)?;
        if self.kind == MountKind::Tmpfs {
            if let Some(size) = self.tmpfs_size {
                write!(f, ",tmpfs-size={size}")?;
            }
            if let Some(mode) = &self.tmpfs_mode {
                write!(f, ",tmpfs-mode={mode}")?;
            }
        } else if self.read_only {
            f.write_str(",readonly")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_mount_renders_readonly_suffix() {
        assert_eq!(
            Mount::bind("/a", "/b", true).to_string(),
            "type=bind,source=/a,target=/b,readonly"
        );
        assert_eq!(
            Mount::bind("/a", "/b", false).to_string(),
            "type=bind,source=/a,target=/b"
        );
    }

    #[test]
    fn volume_mount_uses_volume_type() {
        assert_eq!(
            Mount::volume("scratch", "/scratch", false).to_string(),
            "type=volume,source=scratch,target=/scratch"
        );
    }

    #[test]
    fn tmpfs_mount_skips_source_and_readonly() {
        let mut m = Mount::tmpfs("/tmp", Some(1024));
        m.read_only = true;
        m.tmpfs_mode = Some("1770".into());
        assert_eq!(
            m.to_string(),
            "type=tmpfs,target=/tmp,tmpfs-size=1024,tmpfs-mode=1770"
        );
    }

    #[test]
    fn mount_kind_parses() {
        assert_eq!("BIND".parse::<MountKind>().unwrap(), MountKind::Bind);
        assert!("nfs".parse::<MountKind>().is_err());
    }
}

use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
};

/// Mount point the mesh directory is exposed at inside the container
pub const INPUT_MOUNT: &str = "/input";
/// Mount point the converter writes to inside the container
pub const OUTPUT_MOUNT: &str = "/output";

/// Bind mount of a host directory onto a fixed container path
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Mount {
    pub source: PathBuf,
    pub target: &'static str,
}

impl Mount {
    pub fn bind<P: Into<PathBuf>>(source: P, target: &'static str) -> Mount {
        Mount {
            source: source.into(),
            target,
        }
    }

    /// Value for docker's `--mount` option. Kept as an `OsString` so non utf-8 host paths
    /// reach the runtime untouched.
    pub fn to_os_string(&self) -> OsString {
        let mut spec = OsString::from("src=");
        spec.push(self.source.as_os_str());
        spec.push(",target=");
        spec.push(self.target);
        spec.push(",type=bind");
        spec
    }

    /// Path of `file_name` as seen from inside the container.
    pub fn container_path(&self, file_name: &OsStr) -> OsString {
        // container paths are always posix, whatever the host uses
        let mut path = OsString::from(self.target);
        path.push("/");
        path.push(file_name);
        path
    }

    pub fn host_path(&self) -> &Path { &self.source }
}

impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "src={},target={},type=bind", self.source.display(), self.target)
    }
}

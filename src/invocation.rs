//! Translation of a mesh conversion request into a single container launch.
//!
//! The mesh's directory and the output directory are bind mounted at [`INPUT_MOUNT`] and
//! [`OUTPUT_MOUNT`]; the converter only ever sees container paths.

use crate::{
    mount::{Mount, INPUT_MOUNT, OUTPUT_MOUNT},
    rover::Rover,
    settings::Settings,
};
use log::{debug, info};
use std::{
    env,
    ffi::{OsStr, OsString},
    fmt, fs, io,
    path::{Path, PathBuf},
    process::Command,
};
use thiserror::Error;

#[derive(Error, Debug)]
/// Error types for building and running the converter invocation
pub enum InvocationError {
    #[error("file does not exist: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("No output directory given")]
    MissingOutput,
    #[error("Exactly one of --mer or --msl must be given")]
    AmbiguousPlatform,
    #[error("Couldn't create output directory {}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Couldn't resolve the working directory")]
    WorkingDirectory(#[source] io::Error),
    #[error("Couldn't launch {program}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Converter exited with status {0}")]
    ExternalProcessFailure(i32),
}

impl InvocationError {
    /// Process exit code for this failure. The converter's own code is passed through.
    pub fn exit_code(&self) -> i32 {
        match self {
            InvocationError::ExternalProcessFailure(code) => *code,
            _ => 1,
        }
    }
}

/// A validated conversion request
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub mesh_path: PathBuf,
    pub output_directory: PathBuf,
    pub rover: Rover,
}

impl InvocationRequest {
    /// Checks the inputs without touching the filesystem beyond a stat of the mesh.
    pub fn validate(
        mesh_path: Option<&Path>,
        output_directory: Option<&Path>,
        rover: Option<Rover>,
    ) -> Result<InvocationRequest, InvocationError> {
        let mesh_path = match mesh_path {
            Some(path) if path.is_file() => path,
            Some(path) => return Err(InvocationError::MissingInput(path.to_path_buf())),
            None => return Err(InvocationError::MissingInput(PathBuf::new())),
        };
        let output_directory = match output_directory {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err(InvocationError::MissingOutput),
        };
        let rover = rover.ok_or(InvocationError::AmbiguousPlatform)?;

        Ok(InvocationRequest {
            mesh_path: mesh_path.to_path_buf(),
            output_directory: output_directory.to_path_buf(),
            rover,
        })
    }

    /// Creates the output directory if it's missing. Only the last path segment is
    /// created, a missing parent is an error.
    pub fn prepare_output_directory(&self) -> Result<(), InvocationError> {
        let path = &self.output_directory;
        if path.is_dir() {
            return Ok(());
        }
        fs::create_dir(path).map_err(|source| InvocationError::DirectoryCreate {
            path: path.clone(),
            source,
        })?;
        info!("Created output directory {}", path.display());
        Ok(())
    }

    pub fn build(&self, settings: &Settings) -> Result<Invocation, InvocationError> {
        let mesh_path = absolute(&self.mesh_path)?;
        let mesh_file_name = match mesh_path.file_name() {
            Some(name) => name.to_os_string(),
            None => return Err(InvocationError::MissingInput(self.mesh_path.clone())),
        };
        // a bare file name has an empty parent, absolute() already anchored it to the cwd
        let mesh_directory = mesh_path.parent().map(Path::to_path_buf).unwrap_or_else(|| mesh_path.clone());

        let input = Mount::bind(mesh_directory, INPUT_MOUNT);
        let output = Mount::bind(absolute(&self.output_directory)?, OUTPUT_MOUNT);

        Ok(Invocation {
            program: settings.docker.clone(),
            tty: settings.tty,
            container_input: input.container_path(&mesh_file_name),
            container_output: OsString::from(output.target),
            mounts: [input, output],
            image: settings.image.clone(),
            rover: self.rover,
        })
    }
}

/// Resolve `path` against the working directory, dropping `.` components.
fn absolute(path: &Path) -> Result<PathBuf, InvocationError> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_err(InvocationError::WorkingDirectory)?.join(path)
    };
    Ok(path.components().collect())
}

/// Launch descriptor for the converter container
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub program: String,
    pub tty: bool,
    pub mounts: [Mount; 2],
    pub image: String,
    pub container_input: OsString,
    pub container_output: OsString,
    pub rover: Rover,
}

impl Invocation {
    /// Arguments handed to the container runtime.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("run")];
        if self.tty {
            args.push(OsString::from("-it"));
        }
        for mount in &self.mounts {
            args.push(OsString::from("--mount"));
            args.push(mount.to_os_string());
        }
        args.push(OsString::from(&self.image));
        args.push(self.container_input.clone());
        args.push(self.container_output.clone());
        args.push(OsString::from(self.rover.tag()));
        args
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(self.args());
        command
    }

    /// Runs the converter and blocks until it exits. A non zero exit becomes
    /// [`InvocationError::ExternalProcessFailure`].
    pub fn run(&self) -> Result<(), InvocationError> {
        info!(
            "Converting {} for {} into {}",
            self.mounts[0].host_path().display(),
            self.rover,
            self.mounts[1].host_path().display()
        );
        debug!("{}", self);

        let status = self.command().status().map_err(|source| InvocationError::Launch {
            program: self.program.clone(),
            source,
        })?;
        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(InvocationError::ExternalProcessFailure(code)),
            // killed by a signal
            None => Err(InvocationError::ExternalProcessFailure(1)),
        }
    }
}

fn write_arg(f: &mut fmt::Formatter<'_>, arg: &OsStr) -> fmt::Result {
    let arg = arg.to_string_lossy();
    if arg.is_empty() || arg.contains(char::is_whitespace) {
        write!(f, "'{}'", arg)
    } else {
        f.write_str(&arg)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_arg(f, OsStr::new(&self.program))?;
        for arg in self.args() {
            f.write_str(" ")?;
            write_arg(f, &arg)?;
        }
        Ok(())
    }
}

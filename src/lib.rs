//! Wrapper that hands a MIPL mesh to the `mipl-mesh-converter` container and waits for the
//! `.obj` result.

pub mod config;
pub mod invocation;
pub mod mount;
pub mod rover;
pub mod settings;

use crate::{
    config::{ConfigError, Opt},
    invocation::InvocationError,
};
use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Invocation(err) => err.exit_code(),
            Error::Config(_) => 1,
        }
    }
}

/// Validate the options, create the output directory and run the converter to completion.
pub fn run(opt: &Opt) -> Result<(), Error> {
    let request = opt.request()?;
    let settings = opt.settings()?;

    if opt.dry_run {
        let invocation = request.build(&settings)?;
        println!("{}", invocation);
        return Ok(());
    }

    request.prepare_output_directory()?;
    let invocation = request.build(&settings)?;
    invocation.run()?;
    info!("Done converting {}", request.mesh_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use std::{ffi::OsString, fs, path::Path};

    fn opt(mesh: &Path, out: &Path, extra: &[&str]) -> Opt {
        let mut args = vec![
            OsString::from("convert-mipl-mesh"),
            OsString::from("-m"),
            mesh.as_os_str().to_os_string(),
            OsString::from("-d"),
            out.as_os_str().to_os_string(),
        ];
        args.extend(extra.iter().map(OsString::from));
        parse_config(args).unwrap()
    }

    #[test]
    fn missing_mesh_leaves_filesystem_alone() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let opt = opt(&dir.path().join("scan.pfb"), &out, &["--mer", "--docker", "true"]);

        let err = run(&opt).unwrap_err();
        assert!(matches!(err, Error::Invocation(InvocationError::MissingInput(_))));
        assert_eq!(err.exit_code(), 1);
        assert!(!out.exists());
    }

    #[test]
    fn ambiguous_rover_leaves_filesystem_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = dir.path().join("scan.pfb");
        fs::write(&mesh, b"pfb").unwrap();
        let out = dir.path().join("out");

        for flags in [&["--docker", "true"][..], &["--mer", "--msl", "--docker", "true"][..]].iter() {
            let err = run(&opt(&mesh, &out, flags)).unwrap_err();
            assert!(matches!(err, Error::Invocation(InvocationError::AmbiguousPlatform)));
            assert_eq!(err.exit_code(), 1);
            assert!(!out.exists());
        }
    }

    #[test]
    fn dry_run_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = dir.path().join("scan.pfb");
        fs::write(&mesh, b"pfb").unwrap();
        let out = dir.path().join("out");

        run(&opt(&mesh, &out, &["--msl", "--dry-run", "--docker", "false"])).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn bad_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = dir.path().join("scan.pfb");
        fs::write(&mesh, b"pfb").unwrap();
        let settings = dir.path().join("settings.json");
        fs::write(&settings, "not json").unwrap();

        let err = run(&opt(&mesh, &dir.path().join("out"), &["--mer", "-c", settings.to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Settings(_))));
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn creates_output_and_runs_converter() {
        let dir = tempfile::tempdir().unwrap();
        let mesh = dir.path().join("scan.pfb");
        fs::write(&mesh, b"pfb").unwrap();
        let out = dir.path().join("out");

        run(&opt(&mesh, &out, &["--mer", "--docker", "true"])).unwrap();
        assert!(out.is_dir());

        let err = run(&opt(&mesh, &out, &["--mer", "--docker", "false"])).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(matches!(err, Error::Invocation(InvocationError::ExternalProcessFailure(1))));
    }
}

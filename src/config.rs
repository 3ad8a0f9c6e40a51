use crate::{
    invocation::{InvocationError, InvocationRequest},
    rover::Rover,
    settings::{Settings, SettingsError},
};
use std::{ffi::OsString, path::PathBuf};
use structopt::StructOpt;
use thiserror::Error;

#[derive(Error, Debug)]
/// Error types for program configuration
pub enum ConfigError {
    #[error("Error parsing arguments")]
    Clap(#[from] clap::Error),
    #[error("Invalid settings file")]
    Settings(#[from] SettingsError),
}

// set up program arguments
#[derive(Debug, StructOpt)]
#[structopt(
    name = "convert-mipl-mesh",
    about = "Convert a MIPL .pfb or .iv mesh for MER or MSL to .obj format."
)]
pub struct Opt {
    /// The path of the mipl mesh to convert.
    #[structopt(short = "m", long, value_name = "MIPL_MESH_PATH", parse(from_os_str))]
    pub mipl_mesh_path: Option<PathBuf>,

    /// The directory to write the obj file to.
    #[structopt(short = "d", long, value_name = "OUTPUT_DIR", parse(from_os_str))]
    pub output_directory: Option<PathBuf>,

    /// Convert a MER mesh.
    #[structopt(long)]
    pub mer: bool,

    /// Convert an MSL mesh.
    #[structopt(long)]
    pub msl: bool,

    /// JSON settings file for the container launch.
    #[structopt(short, long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Container runtime executable.
    #[structopt(long)]
    pub docker: Option<String>,

    /// Converter image.
    #[structopt(long)]
    pub image: Option<String>,

    /// Don't allocate a tty for the converter.
    #[structopt(long)]
    pub no_tty: bool,

    /// Print the converter command instead of running it.
    #[structopt(long)]
    pub dry_run: bool,

    #[structopt(long)]
    pub debug: bool,
}

pub fn parse_config<I>(args: I) -> Result<Opt, ConfigError>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    Ok(Opt::from_iter_safe(args)?)
}

impl Opt {
    pub fn rover(&self) -> Option<Rover> { Rover::from_flags(self.mer, self.msl) }

    pub fn request(&self) -> Result<InvocationRequest, InvocationError> {
        InvocationRequest::validate(
            self.mipl_mesh_path.as_deref(),
            self.output_directory.as_deref(),
            self.rover(),
        )
    }

    /// Settings file overlaid with command line overrides.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        if let Some(docker) = &self.docker {
            settings.docker = docker.clone();
        }
        if let Some(image) = &self.image {
            settings.image = image.clone();
        }
        if self.no_tty {
            settings.tty = false;
        }
        Ok(settings)
    }
}
